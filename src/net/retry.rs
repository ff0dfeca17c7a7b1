//! Exponential-backoff retry loop with cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use web_time::Instant;

use super::error::{RequestError, RequestFailure, RetryContext};

/// Shared cancellation flag for one generation of requests.
///
/// Cloning yields a handle to the same flag. Once cancelled a token stays
/// cancelled; callers install a fresh token to start a new generation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every operation holding this token and wake any waiters.
    pub fn cancel(&self) {
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.wake.notify_all();
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Block for up to `timeout`, returning early if the token is cancelled.
    /// Returns `true` if the full timeout elapsed without cancellation.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            guard = self
                .inner
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

/// Cancels whichever request generation is current when it fires.
///
/// Unlike a [`CancelToken`], a handle never goes stale: after an abort the
/// next generation is reachable through the same handle. Clones share state
/// and may be moved to other threads.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    current: Arc<Mutex<CancelToken>>,
}

impl AbortHandle {
    /// Cancel the current generation and start a new one.
    pub fn abort(&self) {
        let mut current =
            self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = CancelToken::new();
    }

    /// Token for the current generation.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Scheduler capability used for the delay between attempts.
pub trait Sleeper {
    /// Wait for `delay`. Returns `false` if `cancel` fired during the wait.
    fn sleep(&self, delay: Duration, cancel: &CancelToken) -> bool;
}

/// [`Sleeper`] that parks the calling thread on the cancel token.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration, cancel: &CancelToken) -> bool {
        cancel.wait_timeout(delay)
    }
}

/// Attempt ceiling and backoff base for one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each later attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exponent)
    }
}

/// Per-request retry bookkeeping, handed to each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Current attempt number, starting at 1.
    pub attempt: u32,
    /// Attempt ceiling for this request.
    pub max_attempts: u32,
    /// Delay waited before this attempt (zero for the first).
    pub last_delay: Duration,
}

/// Run `op` until it succeeds, fails with a non-retryable failure, the
/// attempt ceiling is reached, or `cancel` fires.
pub(crate) fn run_with_retry<T>(
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
    cancel: &CancelToken,
    label: &str,
    mut op: impl FnMut(&RetryState) -> Result<T, RequestFailure>,
) -> Result<T, RequestError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut state = RetryState {
        attempt: 1,
        max_attempts,
        last_delay: Duration::ZERO,
    };

    loop {
        let context = |exhausted| RetryContext {
            attempt: state.attempt,
            max_attempts,
            exhausted,
        };

        if cancel.is_cancelled() {
            return Err(RequestError::new(RequestFailure::Cancelled)
                .with_retry(context(false)));
        }

        let started = Instant::now();
        let failure = match op(&state) {
            Ok(value) => {
                log::debug!(
                    "{label}: attempt {}/{max_attempts} succeeded in {:?}",
                    state.attempt,
                    started.elapsed()
                );
                return Ok(value);
            }
            Err(failure) => failure,
        };

        if !failure.is_retryable() {
            return Err(RequestError::new(failure).with_retry(context(false)));
        }
        if state.attempt >= max_attempts {
            log::warn!(
                "{label}: giving up after {} attempts: {failure}",
                state.attempt
            );
            return Err(RequestError::new(failure).with_retry(context(true)));
        }

        let delay = policy.delay_after(state.attempt);
        log::warn!(
            "{label}: attempt {}/{max_attempts} failed ({failure}); retrying \
             in {delay:?}",
            state.attempt
        );
        if !sleeper.sleep(delay, cancel) {
            return Err(RequestError::new(RequestFailure::Cancelled)
                .with_retry(context(false)));
        }
        state.attempt += 1;
        state.last_delay = delay;
    }
}
