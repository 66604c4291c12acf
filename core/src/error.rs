use thiserror::Error;

use crate::{GameKind, ItemId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("{game} payload is missing required field `{field}`")]
    MissingPayloadField {
        game: GameKind,
        field: &'static str,
    },
    #[error("Puzzle needs {needed} cells but the board only has {available}")]
    GeometryOverflow { needed: usize, available: usize },
    #[error("Base and variant glyphs must differ")]
    IndistinctGlyphs,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown item id {0}")]
    UnknownItem(ItemId),
    #[error("Item id {0} appears more than once")]
    DuplicateItem(ItemId),
    #[error("Puzzle already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
