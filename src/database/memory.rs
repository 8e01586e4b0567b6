//! In-process store backing `DATABASE_URL=memory:` and the test suite.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::models::{AttendanceEntry, AttendanceRecord, NewAttendance, Team, TeamRef};
use super::store::{AttendanceStore, StoreError, TeamStore};

const CREATED_BY: &str = "memory";

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<Team>,
    attendance: Vec<AttendanceRecord>,
    next_attendance_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team, as the external registration process would.
    pub fn insert_team(&self, team: Team) -> Result<(), StoreError> {
        if team.round <= 0 {
            return Err(StoreError::Shape(format!(
                "team {} has non-positive round {}",
                team.code, team.round
            )));
        }
        let mut tables = self.write()?;
        if tables.teams.iter().any(|t| t.code == team.code) {
            return Err(StoreError::Conflict(format!(
                "team code {} is already registered",
                team.code
            )));
        }
        tables.teams.push(team);
        Ok(())
    }

    pub fn attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self.read()?.attendance.clone())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn find_by_code(&self, code: i64) -> Result<Option<Team>, StoreError> {
        Ok(self.read()?.teams.iter().find(|t| t.code == code).cloned())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn record(&self, input: NewAttendance) -> Result<AttendanceRecord, StoreError> {
        let mut tables = self.write()?;
        tables.next_attendance_id += 1;

        let record = AttendanceRecord {
            id: tables.next_attendance_id,
            team_code: input.team_code,
            check_in_time: Utc::now(),
            location: Some(input.location),
            notes: Some(input.notes),
            created_by: Some(CREATED_BY.to_string()),
        };
        tables.attendance.push(record.clone());

        Ok(record)
    }

    async fn list_with_teams(&self) -> Result<Vec<AttendanceEntry>, StoreError> {
        let tables = self.read()?;
        let mut entries: Vec<AttendanceEntry> = tables
            .attendance
            .iter()
            .map(|record| AttendanceEntry {
                record: record.clone(),
                team: tables
                    .teams
                    .iter()
                    .find(|t| t.code == record.team_code)
                    .map(TeamRef::from),
            })
            .collect();

        entries.sort_by(|a, b| {
            b.record
                .check_in_time
                .cmp(&a.record.check_in_time)
                .then_with(|| b.record.id.cmp(&a.record.id))
        });

        Ok(entries)
    }
}
