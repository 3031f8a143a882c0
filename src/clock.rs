//! Time source for purchase receipts.
//!
//! Receipts always use `dd.MM.yyyy HH:mm` on a 24-hour clock, independent of
//! the host locale.

use chrono::{Local, NaiveDateTime, ParseResult};

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        FixedClock(at)
    }

    /// Parses a timestamp written in receipt format.
    pub fn parse(text: &str) -> ParseResult<Self> {
        NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
