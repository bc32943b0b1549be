//! Plain-text rendering of the player page.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::clients::entities::{CurrentTrack, Track};
use crate::preferences::Theme;
use crate::queue::Queue;
use crate::schedule::{format_clock_time, format_duration, project_start_times, start_offset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRow {
    /// 1-based, as shown to the user.
    pub position: usize,
    pub starts_at: String,
    pub track: Track,
    pub current: bool,
}

/// Everything the page shows at one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueView {
    pub theme: Theme,
    pub time_zone: String,
    pub now_playing: Option<CurrentTrack>,
    pub rows: Vec<QueueRow>,
    pub total_duration: u64,
    /// The player could not be reached, start times assume an idle player.
    pub status_unavailable: bool,
}

impl QueueView {
    pub fn build(
        queue: &Queue,
        current: Option<&CurrentTrack>,
        theme: Theme,
        time_zone: (&str, Tz),
        now: DateTime<Utc>,
    ) -> Self {
        let (zone_name, tz) = time_zone;
        let current_id = current.filter(|c| c.has_track()).map(|c| c.id.as_str());
        let starts = project_start_times(queue.tracks(), start_offset(current), now);

        let rows = queue
            .tracks()
            .iter()
            .zip(starts)
            .enumerate()
            .map(|(i, (track, starts_at))| QueueRow {
                position: i + 1,
                starts_at: starts_at
                    .map_or_else(|| "--:--".to_string(), |at| format_clock_time(at, tz)),
                track: track.clone(),
                current: current_id == Some(track.id.as_str()),
            })
            .collect();

        QueueView {
            theme,
            time_zone: zone_name.to_string(),
            now_playing: current.filter(|c| c.has_track()).cloned(),
            rows,
            total_duration: queue.total_duration(),
            status_unavailable: current.is_none(),
        }
    }

    pub fn now_playing_line(&self) -> String {
        match &self.now_playing {
            Some(c) => format!(
                "{} - {} ({}) [{}]",
                c.name,
                c.artist,
                c.album,
                format_duration(c.duration)
            ),
            None => "Nothing playing".to_string(),
        }
    }
}

impl fmt::Display for QueueRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.current { "▶" } else { " " };
        let name = if self.track.name.is_empty() {
            "Unknown Title"
        } else {
            self.track.name.as_str()
        };
        write!(
            f,
            "{marker} {:>11}  {}. {} - {} [{}]",
            self.starts_at,
            self.position,
            name,
            self.track.artist,
            format_duration(self.track.duration)
        )
    }
}

impl fmt::Display for QueueView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MixQ {}  {} mode, times in {}",
            self.theme.glyph(),
            self.theme,
            self.time_zone.replace('_', " ")
        )?;
        writeln!(f, "Now playing: {}", self.now_playing_line())?;
        if self.status_unavailable {
            writeln!(f, "(player status unavailable, start times assume an idle player)")?;
        }
        writeln!(f)?;

        if self.rows.is_empty() {
            return writeln!(f, "Queue is empty");
        }
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        writeln!(
            f,
            "\n{} tracks, {} total",
            self.rows.len(),
            format_duration(self.total_duration)
        )
    }
}
