use std::time::Duration;

use crate::*;

/// Linear backoff: the `n`th retry waits `base_delay * n`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `attempt` (0-based) of a failed request, or `None` to give up.
    pub fn retry_delay(&self, attempt: u32, failure: &TransportFailure) -> Option<Duration> {
        let retryable = match failure {
            TransportFailure::Status(code) => *code >= 500,
            TransportFailure::Timeout => true,
            TransportFailure::Network(_) => false,
        };
        (retryable && attempt < self.max_retries).then(|| self.base_delay * (attempt + 1))
    }
}

/// Fetches a level, retrying transport failures as `policy` allows; `sleep` performs the wait.
pub fn fetch_with_retry(
    source: &mut impl LevelSource,
    request: &LevelRequest,
    policy: RetryPolicy,
    mut sleep: impl FnMut(Duration),
) -> Result<LevelResponse> {
    let mut attempt = 0;
    loop {
        match source.fetch_level(request) {
            Err(ProtocolError::Transport(failure)) => {
                match policy.retry_delay(attempt, &failure) {
                    Some(delay) => {
                        log::warn!("Level fetch failed ({}), retrying in {:?}", failure, delay);
                        sleep(delay);
                        attempt += 1;
                    }
                    None => return Err(ProtocolError::Transport(failure)),
                }
            }
            result => return result,
        }
    }
}
