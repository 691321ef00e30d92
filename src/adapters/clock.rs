use crate::domain::ports::Clock;
use crate::utils::error::{ActionError, Result};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Asia/Seoul has had no daylight saving since 1988.
pub const SEOUL_UTC_OFFSET_HOURS: i32 = 9;

fn offset_from_hours(hours: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(hours * 3600).ok_or_else(|| ActionError::InvalidConfigValueError {
        field: "locale.utc_offset_hours".to_string(),
        value: hours.to_string(),
        reason: "Offset must be within ±24 hours".to_string(),
    })
}

/// Wall-clock time shifted into a configured offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_offset_hours(hours: i32) -> Result<Self> {
        Ok(Self::new(offset_from_hours(hours)?))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always returns the same instant. For tests and replaying recorded trackers.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    pub fn seoul(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let offset = offset_from_hours(SEOUL_UTC_OFFSET_HOURS).ok()?;
        let now = offset
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()?;
        Some(Self::at(now))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}
