use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Time limit used when a game has no entry for the requested tier nor for `Normal`.
pub const FALLBACK_TIME_LIMIT: u32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
    Hell,
}

impl DifficultyTier {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Hell];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Hell => "hell",
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty tier `{0}`")]
pub struct UnknownTier(pub String);

impl FromStr for DifficultyTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| UnknownTier(s.to_owned()))
    }
}

/// Maps a level number onto its tier: 1-3 easy, 4-6 normal, 7-10 hard, everything else hell.
pub const fn resolve_difficulty(level: u32) -> DifficultyTier {
    match level {
        1..=3 => DifficultyTier::Easy,
        4..=6 => DifficultyTier::Normal,
        7..=10 => DifficultyTier::Hard,
        _ => DifficultyTier::Hell,
    }
}

/// Optional value per tier, the shape both lookup tables share.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierMap<T> {
    pub easy: Option<T>,
    pub normal: Option<T>,
    pub hard: Option<T>,
    pub hell: Option<T>,
}

impl<T> Default for TierMap<T> {
    fn default() -> Self {
        Self {
            easy: None,
            normal: None,
            hard: None,
            hell: None,
        }
    }
}

impl<T: Copy> TierMap<T> {
    pub const fn new(easy: Option<T>, normal: Option<T>, hard: Option<T>, hell: Option<T>) -> Self {
        Self {
            easy,
            normal,
            hard,
            hell,
        }
    }

    pub fn get(&self, tier: DifficultyTier) -> Option<T> {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Normal => self.normal,
            DifficultyTier::Hard => self.hard,
            DifficultyTier::Hell => self.hell,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSize {
    pub columns: Coord,
    pub rows: Coord,
    pub cell_size: f32,
}

impl BoardSize {
    pub const fn new(columns: Coord, rows: Coord, cell_size: f32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }
}

/// Resolved board layout for the matrix games.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub columns: Coord,
    pub rows: Coord,
    pub cell_size: f32,
    pub gap: f32,
}

impl Geometry {
    pub const fn new(columns: Coord, rows: Coord, cell_size: f32, gap: f32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            gap,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.columns, self.rows)
    }

    /// Bounding box of a single cell, gaps excluded.
    pub fn cell_rect(&self, (row, col): Coord2) -> Rect {
        let pitch = self.cell_size + self.gap;
        Rect::square(f32::from(col) * pitch, f32::from(row) * pitch, self.cell_size)
    }

    pub fn width(&self) -> f32 {
        span(self.columns, self.cell_size, self.gap)
    }

    pub fn height(&self) -> f32 {
        span(self.rows, self.cell_size, self.gap)
    }

    /// Finds the cell under a local point, only the cell squares are clickable.
    pub fn point_to_cell(&self, x: f32, y: f32) -> Option<Coord2> {
        if x < 0. || y < 0. {
            return None;
        }
        let pitch = self.cell_size + self.gap;
        let col = (x / pitch) as u32;
        let row = (y / pitch) as u32;
        if col >= u32::from(self.columns) || row >= u32::from(self.rows) {
            return None;
        }
        // both lossless, checked against u8 bounds above
        let coords = (row as Coord, col as Coord);
        self.cell_rect(coords).contains(x, y).then_some(coords)
    }
}

fn span(count: Coord, size: f32, gap: f32) -> f32 {
    if count == 0 {
        0.
    } else {
        f32::from(count) * (size + gap) - gap
    }
}

/// Per-game geometry and time budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTable {
    pub gap: f32,
    pub geometry: TierMap<BoardSize>,
    pub time_limits: TierMap<u32>,
    /// Tier whose geometry is used when the requested one has no entry.
    pub fallback_tier: DifficultyTier,
}

impl Default for GameTable {
    fn default() -> Self {
        Self {
            gap: 0.,
            geometry: TierMap::default(),
            time_limits: TierMap::default(),
            fallback_tier: DifficultyTier::Normal,
        }
    }
}

/// Difficulty lookup tables for every game, deserializable so hosts can ship overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub grid_fill: GameTable,
    pub matrix_difference: GameTable,
    pub pair_matching: GameTable,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            grid_fill: GameTable {
                gap: 6.,
                geometry: TierMap::new(
                    Some(BoardSize::new(4, 4, 72.)),
                    Some(BoardSize::new(5, 5, 64.)),
                    Some(BoardSize::new(5, 7, 52.)),
                    None,
                ),
                time_limits: TierMap::new(Some(20), Some(30), Some(40), None),
                fallback_tier: DifficultyTier::Easy,
            },
            matrix_difference: GameTable {
                gap: 4.,
                geometry: TierMap::new(
                    Some(BoardSize::new(3, 3, 80.)),
                    Some(BoardSize::new(4, 4, 68.)),
                    Some(BoardSize::new(5, 5, 58.)),
                    Some(BoardSize::new(5, 8, 50.)),
                ),
                time_limits: TierMap::new(Some(5), Some(10), Some(15), Some(20)),
                fallback_tier: DifficultyTier::Normal,
            },
            pair_matching: GameTable {
                gap: 0.,
                geometry: TierMap::default(),
                time_limits: TierMap::new(Some(30), Some(45), Some(70), None),
                fallback_tier: DifficultyTier::Normal,
            },
        }
    }
}

impl DifficultyTable {
    pub fn game(&self, kind: GameKind) -> &GameTable {
        match kind {
            GameKind::GridFill => &self.grid_fill,
            GameKind::MatrixDifference => &self.matrix_difference,
            GameKind::PairMatching => &self.pair_matching,
        }
    }

    /// Board geometry for `tier`, falling back to the game's configured fallback tier.
    ///
    /// Returns `None` when neither entry exists, which is the normal case for pair-matching
    /// since its layout comes from the item count.
    pub fn geometry(&self, kind: GameKind, tier: DifficultyTier) -> Option<Geometry> {
        let table = self.game(kind);
        let size = match table.geometry.get(tier) {
            Some(size) => size,
            None => {
                let fallback = table.geometry.get(table.fallback_tier)?;
                log::warn!(
                    "No {} geometry for tier {}, using {} instead",
                    kind,
                    tier,
                    table.fallback_tier
                );
                fallback
            }
        };
        Some(Geometry::new(size.columns, size.rows, size.cell_size, table.gap))
    }

    /// Time budget in seconds; never fails, unknown entries fall back to `normal` and then to
    /// [`FALLBACK_TIME_LIMIT`].
    pub fn time_limit(&self, kind: GameKind, tier: DifficultyTier) -> u32 {
        let limits = &self.game(kind).time_limits;
        if let Some(secs) = limits.get(tier) {
            return secs;
        }
        match limits.normal {
            Some(secs) => {
                log::warn!("No {} time limit for tier {}, using normal ({}s)", kind, tier, secs);
                secs
            }
            None => {
                log::warn!(
                    "No {} time limit for tier {}, using {}s",
                    kind,
                    tier,
                    FALLBACK_TIME_LIMIT
                );
                FALLBACK_TIME_LIMIT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bands_partition_exactly() {
        use DifficultyTier::*;

        let expected = [
            (1, Easy),
            (3, Easy),
            (4, Normal),
            (6, Normal),
            (7, Hard),
            (10, Hard),
            (11, Hell),
            (500, Hell),
        ];
        for (level, tier) in expected {
            assert_eq!(resolve_difficulty(level), tier, "level {}", level);
        }
    }

    #[test]
    fn level_bands_are_monotonic() {
        let tiers: Vec<_> = (1..=40).map(resolve_difficulty).collect();
        assert!(tiers.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn tier_parses_wire_names() {
        assert_eq!("hell".parse::<DifficultyTier>(), Ok(DifficultyTier::Hell));
        let err = "expert".parse::<DifficultyTier>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty tier `expert`");
    }

    #[test]
    fn time_limit_falls_back_to_normal() {
        let table = DifficultyTable::default();

        assert_eq!(table.time_limit(GameKind::MatrixDifference, DifficultyTier::Hell), 20);
        assert_eq!(table.time_limit(GameKind::GridFill, DifficultyTier::Hell), 30);
        assert_eq!(table.time_limit(GameKind::PairMatching, DifficultyTier::Hell), 45);
    }

    #[test]
    fn time_limit_falls_back_to_absolute_default() {
        let mut table = DifficultyTable::default();
        table.pair_matching.time_limits = TierMap::default();

        assert_eq!(
            table.time_limit(GameKind::PairMatching, DifficultyTier::Hard),
            FALLBACK_TIME_LIMIT
        );
    }

    #[test]
    fn grid_fill_hell_uses_easy_geometry() {
        let table = DifficultyTable::default();
        let geometry = table.geometry(GameKind::GridFill, DifficultyTier::Hell).unwrap();

        assert_eq!((geometry.columns, geometry.rows), (4, 4));
        assert_eq!(geometry.gap, 6.);
        assert!(table.geometry(GameKind::PairMatching, DifficultyTier::Easy).is_none());
    }

    #[test]
    fn point_to_cell_skips_gaps() {
        let geometry = Geometry::new(4, 4, 72., 6.);

        assert_eq!(geometry.point_to_cell(0., 0.), Some((0, 0)));
        assert_eq!(geometry.point_to_cell(72., 72.), Some((0, 0)));
        assert_eq!(geometry.point_to_cell(75., 10.), None);
        assert_eq!(geometry.point_to_cell(78., 80.), Some((1, 1)));
        assert_eq!(geometry.point_to_cell(400., 10.), None);
        assert_eq!(geometry.point_to_cell(-1., 10.), None);
        assert_eq!(geometry.width(), 306.);
    }

    #[test]
    fn table_deserializes_partial_override() {
        let table: DifficultyTable = serde_json::from_str(
            r#"{"pair_matching": {"time_limits": {"easy": 10, "normal": 20, "hard": 30}}}"#,
        )
        .unwrap();

        assert_eq!(table.time_limit(GameKind::PairMatching, DifficultyTier::Easy), 10);
        assert_eq!(table.time_limit(GameKind::GridFill, DifficultyTier::Easy), 20);
    }
}
