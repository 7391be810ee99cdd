use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::user_repository::{
    NewUser, UserRepository, UserRow, UsernameConflict,
};
use crate::domain::users::UserType;
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on `users.username` surface as `UsernameConflict`.
fn map_write_err(err: sqlx::Error) -> anyhow::Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => UsernameConflict.into(),
        _ => err.into(),
    }
}

fn map_row(r: &PgRow, with_hash: bool) -> anyhow::Result<UserRow> {
    let user_type: String = r.get("user_type");
    Ok(UserRow {
        id: r.get("id"),
        username: r.get("username"),
        name: r.get("name"),
        user_type: user_type.parse()?,
        created_at: r.get("created_at"),
        password_hash: if with_hash {
            r.try_get("password_hash").ok()
        } else {
            None
        },
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<UserRow> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"INSERT INTO users (username, name, password_hash, user_type) VALUES ($1, $2, $3, $4)
               RETURNING id, username, name, user_type, created_at"#,
        )
        .bind(&new_user.username)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .bind(new_user.user_type.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_err)?;
        let user = map_row(&row, false)?;
        let specialization = match new_user.user_type {
            UserType::Student => "INSERT INTO students (user_id) VALUES ($1)",
            UserType::Staff => "INSERT INTO staff (user_id) VALUES ($1)",
        };
        sqlx::query(specialization)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT id, username, name, user_type, created_at, password_hash
               FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| map_row(&r, true)).transpose()
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT id, username, name, user_type, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| map_row(&r, false)).transpose()
    }

    async fn list_users(&self) -> anyhow::Result<Vec<UserRow>> {
        let rows = sqlx::query(
            r#"SELECT id, username, name, user_type, created_at FROM users ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|r| map_row(r, false)).collect()
    }

    async fn update_username(&self, id: i64, username: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"UPDATE users SET username = $2 WHERE id = $1
               RETURNING id, username, name, user_type, created_at"#,
        )
        .bind(id)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_err)?;
        row.map(|r| map_row(&r, false)).transpose()
    }
}
