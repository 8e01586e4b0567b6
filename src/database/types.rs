use chrono::{DateTime, Utc};

use super::models::{AttendanceEntry, AttendanceRecord, MemberProfile, Team, TeamRef};
use super::store::StoreError;

// Database row types that match the PostgreSQL schema column for column
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamRow {
    pub id: i64,
    pub team_name: String,
    pub full_name1: String,
    pub phone_num1: String,
    pub email1: String,
    pub full_name2: String,
    pub phone_num2: String,
    pub email2: String,
    pub code: i64,
    pub round: i32,
    pub round_time: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: i64,
    pub team_code: i64,
    pub check_in_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

/// One row of `attendance LEFT JOIN teams`; team columns are NULL when the
/// code does not resolve.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceWithTeamRow {
    pub id: i64,
    pub team_code: i64,
    pub check_in_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub team_name: Option<String>,
    pub round: Option<i32>,
    pub round_time: Option<String>,
}

fn check_round(round: i32, code: i64) -> Result<i32, StoreError> {
    if round > 0 {
        Ok(round)
    } else {
        Err(StoreError::Shape(format!(
            "team {} has non-positive round {}",
            code, round
        )))
    }
}

// Conversion functions
impl TryFrom<TeamRow> for Team {
    type Error = StoreError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        if row.code < 0 {
            return Err(StoreError::Shape(format!(
                "team {} has negative access code {}",
                row.id, row.code
            )));
        }
        let round = check_round(row.round, row.code)?;

        Ok(Self {
            id: row.id,
            team_name: row.team_name,
            members: [
                MemberProfile {
                    full_name: row.full_name1,
                    phone: row.phone_num1,
                    email: row.email1,
                },
                MemberProfile {
                    full_name: row.full_name2,
                    phone: row.phone_num2,
                    email: row.email2,
                },
            ],
            code: row.code,
            round,
            round_time: row.round_time,
            created_at: row.created_at,
        })
    }
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        Self {
            id: row.id,
            team_code: row.team_code,
            check_in_time: row.check_in_time,
            location: row.location,
            notes: row.notes,
            created_by: row.created_by,
        }
    }
}

impl TryFrom<AttendanceWithTeamRow> for AttendanceEntry {
    type Error = StoreError;

    fn try_from(row: AttendanceWithTeamRow) -> Result<Self, Self::Error> {
        let team = match (row.team_name, row.round, row.round_time) {
            (Some(team_name), Some(round), Some(round_time)) => Some(TeamRef {
                team_name,
                round: check_round(round, row.team_code)?,
                round_time,
            }),
            (None, None, None) => None,
            _ => {
                return Err(StoreError::Shape(format!(
                    "attendance {} joined a partial team row",
                    row.id
                )));
            }
        };

        Ok(Self {
            record: AttendanceRecord {
                id: row.id,
                team_code: row.team_code,
                check_in_time: row.check_in_time,
                location: row.location,
                notes: row.notes,
                created_by: row.created_by,
            },
            team,
        })
    }
}
