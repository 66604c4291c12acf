use moyun_core::{GameKind, Theme};
use serde::{Deserialize, Serialize};

pub use moyun_core::ProgressReport;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockKind {
    Game,
    Theme,
}

/// Unlocks a game or a theme; for themes `game_id` carries the theme id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequest {
    pub openid: String,
    pub game_id: String,
    #[serde(rename = "type")]
    pub kind: UnlockKind,
}

impl UnlockRequest {
    pub fn game(openid: impl Into<String>, game: GameKind) -> Self {
        Self {
            openid: openid.into(),
            game_id: game.wire_id().to_owned(),
            kind: UnlockKind::Game,
        }
    }

    pub fn theme(openid: impl Into<String>, theme: Theme) -> Self {
        Self {
            openid: openid.into(),
            game_id: theme.id().to_owned(),
            kind: UnlockKind::Theme,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenUnlockRequest {
    pub openid: String,
}
