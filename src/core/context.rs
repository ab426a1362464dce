//! Per-request cancellation scope.
//!
//! Every store call runs inside a [`RequestContext`]. The context is cancelled
//! when the inbound request goes away or when its deadline passes, and the
//! in-flight query future is dropped at that point so its pooled connection
//! goes back to the pool.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::core::error::{AppError, Result};

/// Why a context stopped accepting work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for Cancellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cancellation::Cancelled => f.write_str("cancelled"),
            Cancellation::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline that only ends when cancelled explicitly
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    #[cfg(test)]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Guard that cancels this context when dropped.
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Returns the reason this context is finished, if it is.
    pub fn done(&self) -> Option<Cancellation> {
        if self.token.is_cancelled() {
            Some(Cancellation::Cancelled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(Cancellation::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Fail fast when the context is already finished.
    pub fn check(&self) -> Result<()> {
        match self.done() {
            Some(reason) => Err(AppError::Cancelled(reason)),
            None => Ok(()),
        }
    }

    /// Drive `fut` to completion unless the context finishes first.
    ///
    /// The future is not polled at all when the context is already done. When
    /// cancellation or the deadline wins the race, `fut` is dropped before this
    /// returns.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(AppError::Cancelled(Cancellation::Cancelled)),
            _ = sleep_until(self.deadline) => Err(AppError::Cancelled(Cancellation::DeadlineExceeded)),
            res = fut => res,
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
