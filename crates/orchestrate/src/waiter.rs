//! Bounded polling for resources that reach their terminal state
//! asynchronously.
//!
//! Every resource kind shares this one helper instead of hand-rolling its
//! own wait loop: poll a terminal-state predicate on a fixed delay until it
//! reports true or the attempt budget is exhausted.

use crate::error::{ResourceError, Result};
use std::thread;
use std::time::Duration;

/// Retry budget for a waiter: fixed delay x max attempts.
#[derive(Debug, Clone)]
pub struct WaiterConfig {
    /// Delay between polls
    pub delay: Duration,
    /// Maximum number of polls
    pub max_attempts: u32,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(15),
            max_attempts: 40,
        }
    }
}

impl WaiterConfig {
    /// Budget for cluster-class resources, which take minutes to settle.
    pub fn slow() -> Self {
        Self {
            delay: Duration::from_secs(30),
            max_attempts: 50,
        }
    }

    /// Budget with a custom delay and attempt count.
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts,
        }
    }
}

/// Poll `check` until it reports the terminal state or the budget runs out.
///
/// `what` and `state` only label the timeout error. Retryable errors from
/// the predicate (transient API failures) consume an attempt and keep
/// polling; anything else aborts the wait immediately.
pub fn wait_for<F>(config: &WaiterConfig, what: &str, state: &str, mut check: F) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    for attempt in 0..config.max_attempts {
        match check() {
            Ok(true) => {
                log::debug!("{what} reached {state} after {} poll(s)", attempt + 1);
                return Ok(());
            }
            Ok(false) => {
                log::debug!(
                    "{what} not yet {state} (attempt {}/{})",
                    attempt + 1,
                    config.max_attempts
                );
            }
            Err(e) if e.is_retryable() => {
                log::debug!("Retryable error while waiting for {what}: {e}");
            }
            Err(e) => return Err(e),
        }
        if attempt + 1 < config.max_attempts {
            thread::sleep(config.delay);
        }
    }

    Err(ResourceError::Timeout {
        resource: what.to_string(),
        state: state.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(max_attempts: u32) -> WaiterConfig {
        WaiterConfig::new(Duration::from_millis(1), max_attempts)
    }

    #[test]
    fn test_wait_succeeds_immediately() {
        let result = wait_for(&fast(3), "cluster:prod", "active", || Ok(true));
        assert!(result.is_ok());
    }

    #[test]
    fn test_wait_succeeds_after_polling() {
        let mut polls = 0;
        let result = wait_for(&fast(5), "cluster:prod", "active", || {
            polls += 1;
            Ok(polls >= 3)
        });
        assert!(result.is_ok());
        assert_eq!(polls, 3);
    }

    #[test]
    fn test_wait_times_out_when_budget_exhausted() {
        let mut polls = 0;
        let result = wait_for(&fast(4), "cluster:prod", "active", || {
            polls += 1;
            Ok(false)
        });
        assert!(matches!(result, Err(ResourceError::Timeout { .. })));
        assert_eq!(polls, 4);
    }

    #[test]
    fn test_retryable_errors_consume_attempts() {
        let mut polls = 0;
        let result = wait_for(&fast(3), "cluster:prod", "active", || {
            polls += 1;
            Err(ResourceError::api("throttled"))
        });
        assert!(matches!(result, Err(ResourceError::Timeout { .. })));
        assert_eq!(polls, 3);
    }

    #[test]
    fn test_fatal_errors_abort_the_wait() {
        let mut polls = 0;
        let result = wait_for(&fast(5), "cluster:prod", "active", || {
            polls += 1;
            Err(ResourceError::ValidationFailed {
                message: "bad state".into(),
            })
        });
        assert!(matches!(result, Err(ResourceError::ValidationFailed { .. })));
        assert_eq!(polls, 1);
    }
}
