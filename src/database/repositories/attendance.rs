use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{
    models::{AttendanceEntry, AttendanceRecord, NewAttendance},
    store::{AttendanceStore, StoreError},
    types::{AttendanceRow, AttendanceWithTeamRow},
    utils::sql,
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for AttendanceRepository {
    async fn record(&self, input: NewAttendance) -> Result<AttendanceRecord, StoreError> {
        let row = sqlx::query_as::<_, AttendanceRow>(&sql(r#"
                INSERT INTO
                    attendance (
                        team_code,
                        location,
                        notes
                    )
                VALUES
                    (?, ?, ?)
                RETURNING
                    id,
                    team_code,
                    check_in_time,
                    location,
                    notes,
                    created_by
            "#))
        .bind(input.team_code)
        .bind(input.location)
        .bind(input.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_with_teams(&self) -> Result<Vec<AttendanceEntry>, StoreError> {
        let rows = sqlx::query_as::<_, AttendanceWithTeamRow>(&sql(r#"
                SELECT
                    a.id,
                    a.team_code,
                    a.check_in_time,
                    a.location,
                    a.notes,
                    a.created_by,
                    t.team_name,
                    t.round,
                    t.round_time
                FROM
                    attendance a
                    LEFT JOIN teams t ON t.code = a.team_code
                ORDER BY
                    a.check_in_time DESC,
                    a.id DESC
            "#))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceEntry::try_from).collect()
    }
}
