use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::shuffle;
use crate::*;

/// Filler glyphs, none of them forms an idiom with the others by accident.
pub const FILLER_POOL: &str = "风云雨雷电山河湖海川日月星辰天地人和春秋冬夏东西南北金木水火土梅兰竹菊松柏桃李花鸟鱼虫龙凤鹤鹿琴棋书画诗词歌赋仁义礼智信忠孝勇勤俭";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridFillLayout {
    geometry: Geometry,
    glyphs: Array2<char>,
    target: Vec<char>,
}

impl GridFillLayout {
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn size(&self) -> Coord2 {
        (self.geometry.rows, self.geometry.columns)
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_word(&self) -> String {
        self.target.iter().collect()
    }

    /// `None` outside the board.
    pub fn glyph_at(&self, coords: Coord2) -> Option<char> {
        self.glyphs.get(coords.to_nd_index()).copied()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        if coords.0 < rows && coords.1 < columns {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn cell_rect(&self, coords: Coord2) -> Rect {
        self.geometry.cell_rect(coords)
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, char)> + '_ {
        self.glyphs.indexed_iter().map(|((row, col), &glyph)| {
            // dimensions come from a u8 geometry
            ((row as Coord, col as Coord), glyph)
        })
    }
}

pub(super) fn generate_grid_fill(
    rng: &mut SmallRng,
    payload: &GridFillPayload,
    geometry: Geometry,
) -> Result<GridFillLayout> {
    let target: Vec<char> = payload.target_word.chars().collect();
    if target.is_empty() {
        return Err(PuzzleError::MissingPayloadField {
            game: GameKind::GridFill,
            field: "target_word",
        });
    }

    let total = usize::from(geometry.total_cells());
    if total < target.len() {
        return Err(PuzzleError::GeometryOverflow {
            needed: target.len(),
            available: total,
        });
    }

    let pool: Vec<char> = FILLER_POOL.chars().filter(|c| !target.contains(c)).collect();
    let mut flat = target.clone();
    if flat.len() < total && pool.is_empty() {
        return Err(PuzzleError::InvalidBoardShape);
    }
    while flat.len() < total {
        flat.push(pool[rng.random_range(0..pool.len())]);
    }
    shuffle(rng, &mut flat);

    let shape = (usize::from(geometry.rows), usize::from(geometry.columns));
    let glyphs = Array2::from_shape_vec(shape, flat).map_err(|_| PuzzleError::InvalidBoardShape)?;
    log::debug!(
        "Generated {}x{} grid-fill board for {:?}",
        geometry.columns,
        geometry.rows,
        payload.target_word
    );

    Ok(GridFillLayout {
        geometry,
        glyphs,
        target,
    })
}
