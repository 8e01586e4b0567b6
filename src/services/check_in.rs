use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::database::{
    models::{AttendanceRecord, NewAttendance, Team},
    store::{AttendanceStore, TeamStore},
};
use crate::error::AppError;
use crate::scanner::{CameraBackend, CameraSession};
use crate::services::code_input::{EntryMethod, read_code};

pub const RECORDED_MESSAGE: &str = "Attendance recorded successfully!";
pub const NOT_FOUND_MESSAGE: &str = "No team found with this code";

/// Secondary outcome of a check-in: whether the attendance write landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatus {
    pub recorded: bool,
    pub message: String,
    pub record: Option<AttendanceRecord>,
}

impl AttendanceStatus {
    pub fn from_result(result: Result<AttendanceRecord, AppError>) -> Self {
        match result {
            Ok(record) => Self {
                recorded: true,
                message: RECORDED_MESSAGE.to_string(),
                record: Some(record),
            },
            Err(err) => Self {
                recorded: false,
                message: err.to_string(),
                record: None,
            },
        }
    }
}

#[derive(Debug)]
pub struct CheckInOutcome {
    pub code: i64,
    pub team: Team,
    pub attendance: Result<AttendanceRecord, AppError>,
}

/// Looks a team up by access code and logs the check-in.
///
/// The read and the write are separate operations with separate outcomes: a
/// failed read blocks the check-in, a failed write is only reported.
#[derive(Clone)]
pub struct CheckInService {
    teams: Arc<dyn TeamStore>,
    attendance: Arc<dyn AttendanceStore>,
    location: String,
}

impl CheckInService {
    pub fn new(
        teams: Arc<dyn TeamStore>,
        attendance: Arc<dyn AttendanceStore>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            teams,
            attendance,
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn lookup(&self, code: i64) -> Result<Team, AppError> {
        self.teams
            .find_by_code(code)
            .await
            .map_err(|e| AppError::store_read(e, "Error fetching team data. Please try again."))?
            .ok_or_else(|| {
                log::info!("No team registered under code {}", code);
                AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
            })
    }

    pub async fn record_attendance(
        &self,
        code: i64,
        method: EntryMethod,
    ) -> Result<AttendanceRecord, AppError> {
        let record = self
            .attendance
            .record(NewAttendance {
                team_code: code,
                location: self.location.clone(),
                notes: method.note(),
            })
            .await
            .map_err(AppError::store_write)?;

        log::info!(
            "Recorded attendance {} for team code {} ({})",
            record.id,
            code,
            method
        );
        Ok(record)
    }

    /// Validate, look up, then record. Errors returned here all block display;
    /// the attendance write outcome travels inside [`CheckInOutcome`].
    pub async fn check_in(
        &self,
        candidate: &str,
        method: EntryMethod,
    ) -> Result<CheckInOutcome, AppError> {
        let code = read_code(candidate, method)?;
        let team = self.lookup(code).await?;
        let attendance = self.record_attendance(code, method).await;

        Ok(CheckInOutcome {
            code,
            team,
            attendance,
        })
    }

    /// Wait for the scanning session to decode a code, then check it in.
    pub async fn check_in_from_scanner<B: CameraBackend>(
        &self,
        session: &mut CameraSession<B>,
    ) -> Result<CheckInOutcome, AppError> {
        let payload = session.next_code().await?;
        self.check_in(&payload, EntryMethod::QrScan).await
    }
}
