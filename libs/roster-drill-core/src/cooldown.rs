//! Short-lived guard against judging a card right after submitting it.
//!
//! Enter both submits and, once revealed, marks a card correct. A rapid
//! double press must not do both, so a submission arms a cooldown and
//! judgment keys are ignored until it expires.

use chrono::{DateTime, Duration, Utc};

/// Default cooldown window in milliseconds.
pub const DEFAULT_COOLDOWN_MS: u64 = 200;

/// Expiring submit token. Time is always supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitCooldown {
    window: Duration,
    expires_at: Option<DateTime<Utc>>,
}

impl Default for SubmitCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS)
    }
}

impl SubmitCooldown {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window: Duration::milliseconds(i64::try_from(window_ms).unwrap_or(i64::MAX)),
            expires_at: None,
        }
    }

    /// Start the window at `now`, replacing any earlier expiry. A window
    /// reaching past the representable range never expires.
    pub fn arm(&mut self, now: DateTime<Utc>) {
        let expires_at = now
            .checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.expires_at = Some(expires_at);
    }

    /// True strictly before the expiry.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now < expires_at)
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }
}
