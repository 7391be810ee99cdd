use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::student_repository::StudentRepository;
use crate::domain::users::{HoursError, Student};
use crate::infrastructure::db::PgPool;

pub struct SqlxStudentRepository {
    pub pool: PgPool,
}

impl SqlxStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_student(r: &PgRow) -> Student {
    Student {
        id: r.get("id"),
        username: r.get("username"),
        name: r.get("name"),
        total_hours: r.get("total_hours"),
        confirmation_requested: r.get("confirmation_requested"),
    }
}

#[async_trait]
impl StudentRepository for SqlxStudentRepository {
    async fn find_student(&self, id: i64) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query(
            r#"SELECT u.id, u.username, u.name, s.total_hours, s.confirmation_requested
               FROM students s JOIN users u ON u.id = s.user_id
               WHERE s.user_id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_student))
    }

    async fn add_hours(&self, id: i64, hours: i32) -> anyhow::Result<Option<Student>> {
        if hours < 0 {
            return Err(HoursError::Negative.into());
        }
        // the guard keeps the sum inside INTEGER range
        let row = sqlx::query(
            r#"UPDATE students s SET total_hours = s.total_hours + $2
               FROM users u
               WHERE s.user_id = $1 AND u.id = s.user_id
                 AND s.total_hours <= 2147483647 - $2
               RETURNING u.id, u.username, u.name, s.total_hours, s.confirmation_requested"#,
        )
        .bind(id)
        .bind(hours)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = row {
            return Ok(Some(map_student(&row)));
        }
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE user_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(HoursError::Overflow.into());
        }
        Ok(None)
    }

    async fn set_confirmation_requested(
        &self,
        id: i64,
        requested: bool,
    ) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query(
            r#"UPDATE students s SET confirmation_requested = $2
               FROM users u
               WHERE s.user_id = $1 AND u.id = s.user_id
               RETURNING u.id, u.username, u.name, s.total_hours, s.confirmation_requested"#,
        )
        .bind(id)
        .bind(requested)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_student))
    }

    async fn leaderboard(&self, limit: i64) -> anyhow::Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.username, u.name, s.total_hours, s.confirmation_requested
               FROM students s JOIN users u ON u.id = s.user_id
               ORDER BY s.total_hours DESC, u.id ASC
               LIMIT $1"#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_student).collect())
    }

    async fn pending_confirmations(&self) -> anyhow::Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.username, u.name, s.total_hours, s.confirmation_requested
               FROM students s JOIN users u ON u.id = s.user_id
               WHERE s.confirmation_requested
               ORDER BY u.id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_student).collect())
    }
}
