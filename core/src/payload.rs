use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFillPayload {
    pub target_word: String,
}

/// A matrix generated by the level server instead of locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetMatrix {
    /// Row-major glyphs, every row must have the board's column count.
    pub cells: Vec<Vec<String>>,
    pub answer: Coord2,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDifferencePayload {
    pub base_glyph: String,
    pub variant_glyph: String,
    #[serde(default)]
    pub preset: Option<PresetMatrix>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRole {
    Upper,
    Lower,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairItem {
    pub id: ItemId,
    pub text: String,
    pub role: ItemRole,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMatchingPayload {
    pub items: Vec<PairItem>,
    pub correct_pairs: Vec<(ItemId, ItemId)>,
}

/// Raw puzzle content as supplied by the level server, before any layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzlePayload {
    GridFill(GridFillPayload),
    MatrixDifference(MatrixDifferencePayload),
    PairMatching(PairMatchingPayload),
}

impl PuzzlePayload {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::GridFill(_) => GameKind::GridFill,
            Self::MatrixDifference(_) => GameKind::MatrixDifference,
            Self::PairMatching(_) => GameKind::PairMatching,
        }
    }
}

impl From<GridFillPayload> for PuzzlePayload {
    fn from(payload: GridFillPayload) -> Self {
        Self::GridFill(payload)
    }
}

impl From<MatrixDifferencePayload> for PuzzlePayload {
    fn from(payload: MatrixDifferencePayload) -> Self {
        Self::MatrixDifference(payload)
    }
}

impl From<PairMatchingPayload> for PuzzlePayload {
    fn from(payload: PairMatchingPayload) -> Self {
        Self::PairMatching(payload)
    }
}
