use core::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Distinct unlocked themes needed before the hidden game opens.
pub const HIDDEN_UNLOCK_THEMES: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    Spring,
    MidAutumn,
    Child,
    Wuxia,
}

impl Theme {
    pub const ALL: [Self; 4] = [Self::Spring, Self::MidAutumn, Self::Child, Self::Wuxia];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::MidAutumn => "midAutumn",
            Self::Child => "child",
            Self::Wuxia => "wuxia",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "春节",
            Self::MidAutumn => "中秋",
            Self::Child => "儿童启蒙",
            Self::Wuxia => "古风武侠",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Spring => Color::CINNABAR,
            Self::MidAutumn => Color::INDIGO,
            Self::Child => Color::rgb(0x2E, 0x7D, 0x32),
            Self::Wuxia => Color::INK,
        }
    }

    pub fn covers(self, kind: GameKind) -> bool {
        themes_for_game(kind).contains(&self)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub const fn themes_for_game(kind: GameKind) -> &'static [Theme] {
    match kind {
        GameKind::GridFill => &[Theme::Spring, Theme::MidAutumn],
        GameKind::MatrixDifference => &[Theme::Spring, Theme::Child],
        GameKind::PairMatching => &[Theme::Spring, Theme::MidAutumn, Theme::Wuxia],
    }
}

/// Duplicates in `unlocked` count once.
pub fn can_unlock_hidden(unlocked: &[Theme]) -> bool {
    let distinct: HashSet<Theme> = unlocked.iter().copied().collect();
    distinct.len() >= HIDDEN_UNLOCK_THEMES
}
