use async_trait::async_trait;
use thiserror::Error;

use super::models::{AttendanceEntry, AttendanceRecord, NewAttendance, Team};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row came back in a shape the domain model does not accept.
    #[error("Unexpected record shape: {0}")]
    Shape(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the team registry.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Access codes are unique, so this yields at most one team.
    async fn find_by_code(&self, code: i64) -> Result<Option<Team>, StoreError>;
}

/// Append-only attendance log.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn record(&self, input: NewAttendance) -> Result<AttendanceRecord, StoreError>;

    /// Every record joined with its team, most recent check-in first.
    async fn list_with_teams(&self) -> Result<Vec<AttendanceEntry>, StoreError>;
}
