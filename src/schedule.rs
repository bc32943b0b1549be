//! Projected start times for the rows of the queue.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::clients::entities::{CurrentTrack, PlayerState, Track};

/// Seconds until the head of the queue starts. Paused players keep their
/// remaining time, so projections simply stop moving forward.
pub fn start_offset(current: Option<&CurrentTrack>) -> f64 {
    match current {
        Some(c)
            if matches!(c.state, PlayerState::Playing | PlayerState::Paused)
                && c.remaining > 0.0 =>
        {
            c.remaining
        }
        _ => 0.0,
    }
}

/// Start time of every track: `now + offset + durations of the rows above`.
/// Rows that would start past the end of the calendar get `None`.
pub fn project_start_times(
    queue: &[Track],
    offset_secs: f64,
    now: DateTime<Utc>,
) -> Vec<Option<DateTime<Utc>>> {
    #[allow(clippy::cast_possible_truncation)]
    let mut cumulative_ms = (offset_secs * 1000.0).round() as i64;
    queue
        .iter()
        .map(|track| {
            let starts_at = TimeDelta::try_milliseconds(cumulative_ms)
                .and_then(|delta| now.checked_add_signed(delta));
            let duration_ms = i64::try_from(track.duration)
                .unwrap_or(i64::MAX)
                .saturating_mul(1000);
            cumulative_ms = cumulative_ms.saturating_add(duration_ms);
            starts_at
        })
        .collect()
}

pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// US-style 12 hour clock with seconds, e.g. `3:07:09 PM`.
pub fn format_clock_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%-I:%M:%S %p").to_string()
}
