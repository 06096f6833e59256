//! Validation context threaded through every rule.
//!
//! Rules that depend on the outside world (today's date, for the age check)
//! read it from [`ValidationContext`] instead of the system clock, so that
//! validating the same record with the same context always gives the same
//! errors.

use chrono::{NaiveDate, Utc};

/// Per-call inputs shared by all rules of one validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    today: NaiveDate,
}

impl ValidationContext {
    /// Creates a context that treats `today` as the current date.
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a context from the current UTC date.
    pub fn now() -> Self {
        Self::at(Utc::now().date_naive())
    }

    /// Returns the date that age rules measure against.
    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::now()
    }
}
