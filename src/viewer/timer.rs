use std::future::pending;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// One-shot deadline owned by a single viewer. Arming always replaces the
/// previous deadline, so timers never stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn arm(&mut self, after: Duration) {
        self.at = Some(Instant::now() + after);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn at(&self) -> Option<Instant> {
        self.at
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Disarms, returning whether the deadline was armed.
    pub fn take(&mut self) -> bool {
        self.at.take().is_some()
    }
}

/// Resolves at `at`, or never when there is no deadline.
pub async fn expired(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        None => pending::<()>().await,
    }
}
