use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixLayout {
    geometry: Geometry,
    base_glyph: String,
    variant_glyph: String,
    answer: Coord2,
}

impl MatrixLayout {
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn size(&self) -> Coord2 {
        (self.geometry.rows, self.geometry.columns)
    }

    pub fn answer(&self) -> Coord2 {
        self.answer
    }

    pub fn base_glyph(&self) -> &str {
        &self.base_glyph
    }

    pub fn variant_glyph(&self) -> &str {
        &self.variant_glyph
    }

    pub fn glyph_at(&self, coords: Coord2) -> &str {
        if coords == self.answer {
            &self.variant_glyph
        } else {
            &self.base_glyph
        }
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

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, columns) = self.size();
        (0..rows).flat_map(move |row| (0..columns).map(move |col| (row, col)))
    }
}

pub(super) fn generate_matrix_difference(
    rng: &mut SmallRng,
    payload: &MatrixDifferencePayload,
    geometry: Geometry,
) -> Result<MatrixLayout> {
    let missing = |field: &'static str| PuzzleError::MissingPayloadField {
        game: GameKind::MatrixDifference,
        field,
    };
    if payload.base_glyph.is_empty() {
        return Err(missing("base_glyph"));
    }
    if payload.variant_glyph.is_empty() {
        return Err(missing("variant_glyph"));
    }
    if payload.base_glyph == payload.variant_glyph {
        return Err(PuzzleError::IndistinctGlyphs);
    }
    if geometry.total_cells() == 0 {
        return Err(PuzzleError::GeometryOverflow {
            needed: 1,
            available: 0,
        });
    }

    let answer = match &payload.preset {
        Some(preset) => validate_preset(payload, preset, geometry)?,
        None => (
            rng.random_range(0..geometry.rows),
            rng.random_range(0..geometry.columns),
        ),
    };
    log::debug!(
        "Generated {}x{} matrix-difference board, variant at {:?}",
        geometry.columns,
        geometry.rows,
        answer
    );

    Ok(MatrixLayout {
        geometry,
        base_glyph: payload.base_glyph.clone(),
        variant_glyph: payload.variant_glyph.clone(),
        answer,
    })
}

/// A preset must match the board and differ from the base glyph in exactly its answer cell.
fn validate_preset(
    payload: &MatrixDifferencePayload,
    preset: &PresetMatrix,
    geometry: Geometry,
) -> Result<Coord2> {
    if preset.cells.len() != usize::from(geometry.rows)
        || preset
            .cells
            .iter()
            .any(|row| row.len() != usize::from(geometry.columns))
    {
        return Err(PuzzleError::InvalidBoardShape);
    }

    let mut variants = Vec::new();
    for (row, cells) in preset.cells.iter().enumerate() {
        for (col, glyph) in cells.iter().enumerate() {
            if *glyph == payload.variant_glyph {
                // bounded by the u8 geometry checked above
                variants.push((row as Coord, col as Coord));
            } else if *glyph != payload.base_glyph {
                return Err(PuzzleError::InvalidBoardShape);
            }
        }
    }

    match variants.as_slice() {
        [only] if *only == preset.answer => {
            log::debug!("Using preset matrix from level data");
            Ok(preset.answer)
        }
        _ => Err(PuzzleError::InvalidBoardShape),
    }
}
