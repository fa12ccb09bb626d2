use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{User, UserRole},
    error::{AppError, Result},
    repository::UserRepository,
};

// Database row struct that matches SQLite schema
#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    club: String,
    is_active: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

const USER_COLUMNS: &str = "id, name, email, role, club, is_active, created_at, updated_at";

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: UserRow) -> Result<User> {
        Ok(User {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            email: row.email,
            role: UserRole::from_str(&row.role)
                .ok_or_else(|| AppError::Database(format!("Invalid user role: {}", row.role)))?,
            club: row.club,
            is_active: row.is_active != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn map_unique_violation(err: sqlx::Error) -> AppError {
        match &err {
            sqlx::Error::Database(db) if db.message().contains("UNIQUE") => {
                AppError::Conflict("User already exists".to_string())
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: User, password_hash: &str) -> Result<User> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, club, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(&user.club)
        .bind(user.is_active as i32)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Self::map_unique_violation)?;

        self.find_by_id(user.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created user".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS)
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS)
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            &format!("SELECT {}, password_hash FROM users WHERE email = ?", USER_COLUMNS)
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some((Self::row_to_user(r.user)?, r.password_hash))),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            &format!("SELECT {} FROM users ORDER BY created_at ASC", USER_COLUMNS)
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_user)
            .collect()
    }

    async fn club_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT club FROM users
            WHERE role = ? AND club != ''
            ORDER BY club ASC
            "#
        )
        .bind(UserRole::ClubAdmin.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn update_by_id(&self, id: Uuid, user: User) -> Result<User> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, role = ?, club = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.club)
        .bind(user.is_active as i32)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(Self::map_unique_violation)?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("User not found".to_string())
        })
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now().naive_utc())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
