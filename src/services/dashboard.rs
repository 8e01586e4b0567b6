use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::database::{models::AttendanceEntry, store::AttendanceStore};
use crate::error::AppError;

pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const EXPORT_HEADERS: [&str; 7] = [
    "Team Code",
    "Team Name",
    "Round",
    "Round Time",
    "Check-in Time",
    "Location",
    "Notes",
];

/// Rendering used for the check-in time column, e.g. `6/1/2025, 9:05:07 AM`.
const CHECK_IN_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundFilter {
    #[default]
    All,
    Round(i32),
}

impl FromStr for RoundFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(RoundFilter::All);
        }
        match s.parse::<i32>() {
            Ok(round) if round > 0 => Ok(RoundFilter::Round(round)),
            _ => Err(AppError::BadRequest(format!(
                "round must be \"all\" or a positive number, got {:?}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttendanceFilter {
    pub search: String,
    pub round: RoundFilter,
}

impl AttendanceFilter {
    pub fn new(search: impl Into<String>, round: RoundFilter) -> Self {
        Self {
            search: search.into(),
            round,
        }
    }

    /// Case-insensitive substring of the team name, or substring of the code.
    /// An empty search matches everything.
    pub fn matches_text(&self, entry: &AttendanceEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();

        entry
            .team
            .as_ref()
            .is_some_and(|t| t.team_name.to_lowercase().contains(&term))
            || entry.record.team_code.to_string().contains(&term)
    }

    /// Records whose code resolves to no team never match a specific round.
    pub fn matches_round(&self, entry: &AttendanceEntry) -> bool {
        match self.round {
            RoundFilter::All => true,
            RoundFilter::Round(round) => entry.team.as_ref().is_some_and(|t| t.round == round),
        }
    }

    pub fn matches(&self, entry: &AttendanceEntry) -> bool {
        self.matches_text(entry) && self.matches_round(entry)
    }

    pub fn apply(&self, entries: &[AttendanceEntry]) -> Vec<AttendanceEntry> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Quote a field when it contains the delimiter, a quote or a line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize `entries` to CSV, rendering check-in times in `tz`. The header
/// row is always present and every row ends with `\n`.
pub fn export_csv<Tz>(entries: &[AttendanceEntry], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = EXPORT_HEADERS.join(",");
    out.push('\n');

    for entry in entries {
        let team = entry.team.as_ref();
        let row = [
            entry.record.team_code.to_string(),
            or_fallback(team.map(|t| t.team_name.clone()), "Unknown"),
            or_fallback(team.map(|t| t.round.to_string()), "N/A"),
            or_fallback(team.map(|t| t.round_time.clone()), "N/A"),
            entry
                .record
                .check_in_time
                .with_timezone(tz)
                .format(CHECK_IN_TIME_FORMAT)
                .to_string(),
            or_fallback(entry.record.location.clone(), "N/A"),
            entry.record.notes.clone().unwrap_or_default(),
        ];
        out.push_str(&csv_row(&row));
        out.push('\n');
    }

    out
}

pub fn export_filename(date: DateTime<Utc>) -> String {
    format!("attendance_export_{}.csv", date.format("%Y-%m-%d"))
}

#[derive(Clone)]
pub struct AttendanceDashboard {
    attendance: Arc<dyn AttendanceStore>,
}

impl AttendanceDashboard {
    pub fn new(attendance: Arc<dyn AttendanceStore>) -> Self {
        Self { attendance }
    }

    /// All records, newest first, joined with their teams.
    pub async fn load(&self) -> Result<Vec<AttendanceEntry>, AppError> {
        self.attendance
            .list_with_teams()
            .await
            .map_err(|e| AppError::store_read(e, "Error fetching attendance data. Please try again."))
    }

    pub async fn filtered(&self, filter: &AttendanceFilter) -> Result<Vec<AttendanceEntry>, AppError> {
        let entries = self.load().await?;
        Ok(filter.apply(&entries))
    }
}
