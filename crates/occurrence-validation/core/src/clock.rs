//! Reference "now" for date rules
//!
//! Every "today" comparison uses one explicit zone. The form defaults to
//! America/Recife, which has stayed on UTC-03:00 without daylight saving,
//! so a fixed offset describes it exactly.

use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const RECIFE_UTC_OFFSET_MINUTES: i32 = -180;

pub trait Clock {
    /// Current instant expressed in the form's zone
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock and shifts it into `offset`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn recife() -> Self {
        Self::new(recife_offset())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::recife()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

fn recife_offset() -> FixedOffset {
    // -180 minutes is always in range
    FixedOffset::east_opt(RECIFE_UTC_OFFSET_MINUTES * 60).unwrap_or_else(|| Utc.fix())
}
