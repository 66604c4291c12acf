use std::fs;
use std::path::PathBuf;

use moyun_protocol::*;

/// Serves a saved level response from disk, whatever the request asks for.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LevelSource for FileSource {
    fn fetch_level(&mut self, request: &LevelRequest) -> Result<LevelResponse> {
        log::debug!(
            "Loading {} level {} from {}",
            request.game_id,
            request.level,
            self.path.display()
        );
        let json = fs::read_to_string(&self.path).map_err(|err| {
            ProtocolError::Transport(TransportFailure::Network(format!(
                "{}: {}",
                self.path.display(),
                err
            )))
        })?;
        LevelResponse::from_json(&json)
    }
}
