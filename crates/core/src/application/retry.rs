use std::{future::Future, time::Duration};

use error_stack::Context;
use tracing::warn;

/// Retries an operation a fixed number of times with a constant delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBackoff {
    pub attempts: u32,
    pub delay: Duration,
}

impl FixedBackoff {
    pub const fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Runs `operation` until it succeeds or the attempts are used up; the
    /// last error is returned. At least one attempt is always made.
    pub async fn run<T, C, F, Fut>(&self, label: &str, mut operation: F) -> error_stack::Result<T, C>
    where
        C: Context,
        F: FnMut() -> Fut,
        Fut: Future<Output = error_stack::Result<T, C>>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(report) if attempt < attempts => {
                    warn!(
                        "{} failed (attempt {}/{}): {}",
                        label,
                        attempt,
                        attempts,
                        report.current_context()
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(report) => {
                    return Err(report.attach_printable(format!("Gave up after {attempts} attempts")))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_stack::report;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("flaky")]
    struct Flaky;

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = FixedBackoff::new(3, Duration::ZERO)
            .run("flaky", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(report!(Flaky))
                } else {
                    Ok(42)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: error_stack::Result<(), Flaky> = FixedBackoff::new(3, Duration::ZERO)
            .run("flaky", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(report!(Flaky))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = FixedBackoff::new(0, Duration::ZERO)
            .run("once", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, error_stack::Report<Flaky>>(())
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
