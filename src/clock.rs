use time::{OffsetDateTime, UtcOffset};

/// Wall clock used for heartbeats and message stamps.
///
/// Timestamps are milliseconds since the Unix epoch; `offset` only affects
/// the `HH:MM:SS` rendering shown on messages.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn with_offset_hours(hours: i8) -> anyhow::Result<Self> {
        Ok(Self::new(UtcOffset::from_hms(hours, 0, 0)?))
    }

    pub fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn format_hms(&self, millis: i64) -> String {
        let at = OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
            .to_offset(self.offset);
        format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}
