use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{
    models::Team,
    store::{StoreError, TeamStore},
    types::TeamRow,
    utils::sql,
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for TeamRepository {
    async fn find_by_code(&self, code: i64) -> Result<Option<Team>, StoreError> {
        let row = sqlx::query_as::<_, TeamRow>(&sql(r#"
                SELECT
                    id,
                    team_name,
                    full_name1,
                    phone_num1,
                    email1,
                    full_name2,
                    phone_num2,
                    email2,
                    code,
                    round,
                    round_time,
                    created_at
                FROM
                    teams
                WHERE
                    code = ?
            "#))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Team::try_from).transpose()
    }
}
