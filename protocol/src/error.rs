use moyun_core::GameKind;
use thiserror::Error;

/// Failure reported by a transport, before any body was decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Network(String),
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unknown game id `{0}`")]
    UnknownGame(String),
    #[error("Unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    #[error("{game} level data is missing `{field}`")]
    MissingField {
        game: GameKind,
        field: &'static str,
    },
    #[error("Malformed level data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Request failed: {0}")]
    Transport(TransportFailure),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_read_well() {
        let messages: Vec<String> = [
            TransportFailure::Status(502),
            TransportFailure::Timeout,
            TransportFailure::Network("connection refused".into()),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(messages, ["HTTP 502", "request timed out", "connection refused"]);
        assert_eq!(
            ProtocolError::Transport(TransportFailure::Timeout).to_string(),
            "Request failed: request timed out"
        );
    }
}
