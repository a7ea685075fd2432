//! Deadline guard for async operations.
//!
//! Races an operation against a timer. Whichever finishes first wins
//! and the loser is dropped: the timer when the operation completes,
//! the operation's future when the deadline expires.
//!
//! Cancellation is cooperative. A timed-out future stops at its
//! current suspension point, but anything it already set in motion
//! (an HTTP request the server is still handling, a spawned task, a
//! half-written file) is not rolled back.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The guarded operation did not finish before its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation timed out after {}ms", .duration.as_millis())]
pub struct TimeoutError {
    /// The configured deadline
    pub duration: Duration,
}

impl TimeoutError {
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

type TimeoutCallback = Box<dyn FnOnce(Duration) + Send>;

/// A single-use deadline with an optional expiry callback
///
/// ```
/// use linkweave::core::processing::TimeoutGuard;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let result = TimeoutGuard::new(Duration::from_millis(20))
///     .on_timeout(|d| eprintln!("gave up after {d:?}"))
///     .run(tokio::time::sleep(Duration::from_secs(5)))
///     .await;
/// assert!(result.is_err());
/// # }
/// ```
pub struct TimeoutGuard {
    duration: Duration,
    on_timeout: Option<TimeoutCallback>,
}

impl TimeoutGuard {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            on_timeout: None,
        }
    }

    /// Call `callback` with the deadline when it expires
    pub fn on_timeout<C>(mut self, callback: C) -> Self
    where
        C: FnOnce(Duration) + Send + 'static,
    {
        self.on_timeout = Some(Box::new(callback));
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Run `operation` under the deadline
    pub async fn run<F, T>(self, operation: F) -> Result<T, TimeoutError>
    where
        F: Future<Output = T>,
    {
        match tokio::time::timeout(self.duration, operation).await {
            Ok(value) => Ok(value),
            Err(_) => {
                if let Some(callback) = self.on_timeout {
                    callback(self.duration);
                }
                Err(TimeoutError {
                    duration: self.duration,
                })
            }
        }
    }
}

/// Run `operation` under `duration` without an expiry callback
pub async fn with_timeout<F, T>(operation: F, duration: Duration) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    TimeoutGuard::new(duration).run(operation).await
}
