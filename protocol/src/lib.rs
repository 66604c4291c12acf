//! Wire types exchanged with the level server.
//!
//! Field names follow the server's camelCase JSON. Nothing here performs I/O: hosts plug a
//! transport in through [`LevelSource`] and drive retries with [`RetryPolicy`].

pub use error::*;
pub use level::*;
pub use report::*;
pub use retry::*;

mod error;
mod level;
mod report;
mod retry;

pub const LEVEL_DATA_PATH: &str = "/api/level/getLevelData";
pub const THEME_DATA_PATH: &str = "/api/level/getThemeData";
pub const SAVE_PROGRESS_PATH: &str = "/api/user/saveProgress";
pub const UNLOCK_GAME_PATH: &str = "/api/user/unlockGame";
pub const UNLOCK_HIDDEN_PATH: &str = "/api/user/unlockHidden";
