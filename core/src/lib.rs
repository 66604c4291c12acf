use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use difficulty::*;
pub use draw::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use payload::*;
pub use score::*;
pub use session::*;
pub use theme::*;
pub use timer::*;
pub use types::*;

mod difficulty;
mod draw;
mod engine;
mod error;
#[cfg(test)]
mod fixtures;
mod generator;
mod payload;
mod score;
mod session;
mod theme;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "wordFind")]
    GridFill,
    #[serde(rename = "charDiff")]
    MatrixDifference,
    #[serde(rename = "poetryConnect")]
    PairMatching,
}

impl GameKind {
    pub const ALL: [Self; 3] = [Self::GridFill, Self::MatrixDifference, Self::PairMatching];

    /// Identifier used by the level server.
    pub const fn wire_id(self) -> &'static str {
        match self {
            Self::GridFill => "wordFind",
            Self::MatrixDifference => "charDiff",
            Self::PairMatching => "poetryConnect",
        }
    }

    pub fn from_wire_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wire_id() == id)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GridFill => "grid-fill",
            Self::MatrixDifference => "matrix-difference",
            Self::PairMatching => "pair-matching",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown game `{0}`")]
pub struct UnknownGame(pub String);

impl FromStr for GameKind {
    type Err = UnknownGame;

    /// Accepts both the wire id and the display name.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_id() == s || kind.display_name() == s)
            .ok_or_else(|| UnknownGame(s.to_owned()))
    }
}
