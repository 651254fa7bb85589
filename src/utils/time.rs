use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Shown instead of a countdown once a session has started.
pub const FINISHED_MARKER: &str = "✅";

/// Whole days, hours and minutes left until a session, rounded down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    /// `None` when `target` is now or in the past.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let remaining = target.signed_duration_since(now);
        if remaining <= chrono::Duration::zero() {
            return None;
        }

        let total_minutes = remaining.num_minutes();
        Some(Countdown {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        })
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

pub fn format_countdown(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match Countdown::until(target, now) {
        Some(countdown) => countdown.to_string(),
        None => FINISHED_MARKER.to_string(),
    }
}

/// Accepts RFC 3339 instants as-is; wall-clock strings without an offset are
/// read in `source_offset`.
pub fn parse_session_time(value: &str, source_offset: FixedOffset) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.to_utc());
    }

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return source_offset
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.to_utc())
                .ok_or_else(|| anyhow::anyhow!("Ambiguous local time: {}", value));
        }
    }

    Err(anyhow::anyhow!(
        "Invalid session time format. Use RFC 3339 or YYYY-MM-DD HH:MM"
    ))
}

/// Discord renders this token in each reader's local timezone.
pub fn discord_timestamp(instant: DateTime<Utc>) -> String {
    format!("<t:{}:f>", instant.timestamp())
}

pub fn format_datetime_in(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = instant.with_timezone(&offset);
    local.format("%a %d %b %Y %H:%M (UTC%:z)").to_string()
}
