use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::team::TeamRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub team_code: i64, // references Team.code, not Team.id
    pub check_in_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

/// Insert payload. Id, timestamp and creator are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub team_code: i64,
    pub location: String,
    pub notes: String,
}

/// An attendance record joined with its team, if the code resolves to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub team: Option<TeamRef>,
}
