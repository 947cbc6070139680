//! Data models for aircheck_fetcher
//!
//! Wire types mirror the schedule API's JSON contract (camelCase field
//! names, RFC 3339 date-times with UTC offsets). Matches are represented as
//! index pairs into a shared [`ScheduleSet`] rather than references into the
//! fetched collection, so they can cross task boundaries freely.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::api;

/// One calendar day of the broadcast schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySchedule {
    /// Day as an RFC 3339 date-time at midnight local time
    #[serde(rename = "dateISO")]
    pub date_iso: DateTime<FixedOffset>,
    /// Timezone offset of the day, in minutes
    #[serde(default)]
    pub date_offset: i32,
    /// Day of week (1 = Monday)
    #[serde(default)]
    pub day: u32,
    /// Day as a compact `YYYYMMDD` number
    #[serde(default)]
    pub date: u64,
    /// Scheduled broadcasts, in airing order
    #[serde(default)]
    pub broadcasts: Vec<BroadcastEntry>,
}

/// One scheduled program instance within a day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastEntry {
    /// Start timestamp in epoch milliseconds
    #[serde(default)]
    pub start: u64,
    #[serde(rename = "startISO")]
    pub start_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub start_offset: i32,
    /// End timestamp in epoch milliseconds
    #[serde(default)]
    pub end: u64,
    #[serde(rename = "endISO")]
    pub end_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_offset: i32,
    #[serde(default)]
    pub scheduled: u64,
    #[serde(default)]
    pub scheduled_offset: i32,
    /// API detail URL for this broadcast
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    /// Stable identifier of the recurring show, distinct from the title
    #[serde(default)]
    pub program_key: String,
    #[serde(default)]
    pub is_public: bool,
    /// True once the scheduled time has passed and playback data is
    /// expected to exist. Only aired entries are eligible for resolution.
    #[serde(rename = "isBroadcasted", default)]
    pub has_aired: bool,
}

impl BroadcastEntry {
    /// Day path segment (`YYYYMMDD`) for the channel detail endpoint,
    /// derived from the broadcast's start timestamp.
    pub fn start_day_segment(&self) -> String {
        self.start_iso.format(api::DAY_SEGMENT_FORMAT).to_string()
    }
}

/// Per-day, per-channel detail fetched on demand during resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDetail {
    #[serde(default)]
    pub program_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(rename = "isBroadcasted", default)]
    pub has_aired: bool,
    #[serde(default)]
    pub scheduled: u64,
    #[serde(default)]
    pub scheduled_offset: i32,
    #[serde(default)]
    pub start: u64,
    #[serde(rename = "startISO")]
    pub start_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub start_offset: i32,
    #[serde(default)]
    pub end: u64,
    #[serde(rename = "endISO")]
    pub end_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_offset: i32,
    #[serde(default)]
    pub url: String,
    /// Program segments (tracks, talk items). Part of the contract but
    /// unused by resolution.
    #[serde(default)]
    pub items: Vec<ProgramSegment>,
    /// Recorded stream segments advertised for this day and channel
    #[serde(default)]
    pub streams: Vec<StreamEntry>,
}

/// One item within a broadcast (a track or talk segment)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSegment {
    #[serde(default)]
    pub start: u64,
    #[serde(rename = "startISO")]
    pub start_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub start_offset: i32,
    #[serde(default)]
    pub end: u64,
    #[serde(rename = "endISO")]
    pub end_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_offset: i32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(rename = "isBroadcasted", default)]
    pub has_aired: bool,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub interpreter: String,
}

/// One recorded stream segment of a broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEntry {
    #[serde(default)]
    pub start: u64,
    #[serde(rename = "startISO")]
    pub start_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub start_offset: i32,
    #[serde(default)]
    pub end: u64,
    #[serde(rename = "endISO")]
    pub end_iso: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_offset: i32,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub title: String,
    /// Opaque token identifying one playable audio segment
    pub loop_stream_id: String,
}

/// Index pair locating one broadcast within a [`ScheduleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BroadcastRef {
    /// Index into the day list
    pub day: usize,
    /// Index into that day's broadcast list
    pub entry: usize,
}

/// Shared, immutable ownership of a fetched schedule collection.
///
/// Cloning is cheap; clones see the same underlying days. The set outlives
/// every [`BroadcastRef`] handed out by the matcher because refs are plain
/// indices resolved through [`ScheduleSet::get`].
#[derive(Debug, Clone)]
pub struct ScheduleSet {
    days: Arc<Vec<DailySchedule>>,
}

impl ScheduleSet {
    pub fn new(days: Vec<DailySchedule>) -> Self {
        Self {
            days: Arc::new(days),
        }
    }

    /// All days, in schedule order
    pub fn days(&self) -> &[DailySchedule] {
        &self.days
    }

    /// Resolve a match back to its broadcast entry.
    ///
    /// Returns `None` for an out-of-range ref, which can only happen if the
    /// ref was produced against a different set.
    pub fn get(&self, r: BroadcastRef) -> Option<&BroadcastEntry> {
        self.days.get(r.day)?.broadcasts.get(r.entry)
    }
}

/// A playback URL derived from a stream identifier.
///
/// Built by concatenating the loop base URL with the raw identifier; the
/// base URL carries any separator, nothing is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    url: String,
}

impl ResolvedStream {
    pub fn new(loop_base_url: &str, loop_stream_id: &str) -> Self {
        Self {
            url: format!("{loop_base_url}{loop_stream_id}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ResolvedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
