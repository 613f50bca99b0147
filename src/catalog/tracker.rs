//! Request bookkeeping shared by the controllers.
//!
//! Each controller owns one tracker. Issuing a request mints a fresh token and
//! forgets any earlier pending one, so only the latest request can complete.

use crate::api::RequestToken;
use crate::domain::ZcountriesError;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    token: RequestToken,
    deadline: DateTime<Utc>,
}

/// Tracks the single in-flight request of a controller.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    last: RequestToken,
    pending: Option<Pending>,
    timeout: Duration,
}

impl RequestTracker {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            last: RequestToken::default(),
            pending: None,
            timeout,
        }
    }

    /// Configured timeout in seconds, as handed to the host timer.
    #[must_use]
    pub fn timeout_secs(&self) -> f64 {
        self.timeout.num_milliseconds() as f64 / 1000.0
    }

    /// The error a request that outlived its deadline reports, in whole
    /// seconds rounded up.
    #[must_use]
    pub fn timeout_error(&self) -> ZcountriesError {
        let millis = u64::try_from(self.timeout.num_milliseconds()).unwrap_or(0);
        ZcountriesError::Timeout((millis + 999) / 1000)
    }

    /// Mints a new token with a deadline of `now + timeout`. Any earlier
    /// pending request becomes stale.
    pub fn issue(&mut self, now: DateTime<Utc>) -> RequestToken {
        self.last = self.last.next();
        if let Some(previous) = self.pending.take() {
            tracing::debug!(superseded = %previous.token, by = %self.last, "request superseded");
        }
        self.pending = Some(Pending {
            token: self.last,
            deadline: now + self.timeout,
        });
        self.last
    }

    /// Accepts a completion. Returns `true` and clears the pending slot only
    /// when `token` is the one currently awaited.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Expires the pending request if its deadline has passed, returning its token.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Option<RequestToken> {
        match self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending = None;
                Some(pending.token)
            }
            _ => None,
        }
    }

    /// Drops the pending request without completing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
