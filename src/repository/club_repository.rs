use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Club, ClubCategory, ClubFilter},
    error::{AppError, Result},
    repository::{like_pattern, ClubRepository},
};

#[derive(FromRow)]
struct ClubRow {
    id: String,
    name: String,
    description: String,
    logo: String,
    category: String,
    role: String,
    is_recruiting: i32,
    recruitment_deadline: Option<NaiveDateTime>,
    requirements: Option<String>,
    contact_email: String,
    application_form_link: String,
    response_sheet_link: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const CLUB_COLUMNS: &str = r#"
    id, name, description, logo, category, role, is_recruiting,
    recruitment_deadline, requirements, contact_email,
    application_form_link, response_sheet_link, created_at, updated_at
"#;

pub struct SqliteClubRepository {
    pool: SqlitePool,
}

impl SqliteClubRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_club(row: ClubRow) -> Result<Club> {
        Ok(Club {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            description: row.description,
            logo: row.logo,
            category: ClubCategory::from_str(&row.category)
                .ok_or_else(|| AppError::Database(format!("Invalid club category: {}", row.category)))?,
            role: row.role,
            is_recruiting: row.is_recruiting != 0,
            recruitment_deadline: row.recruitment_deadline.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            requirements: row.requirements,
            contact_email: row.contact_email,
            application_form_link: row.application_form_link,
            response_sheet_link: row.response_sheet_link,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn map_unique_violation(err: sqlx::Error, name: &str) -> AppError {
        match &err {
            sqlx::Error::Database(db) if db.message().contains("UNIQUE") => AppError::Conflict(format!(
                "Club \"{}\" already exists. Update the existing club instead of creating a new one.",
                name
            )),
            _ => AppError::Database(err.to_string()),
        }
    }
}

#[async_trait]
impl ClubRepository for SqliteClubRepository {
    async fn insert(&self, club: Club) -> Result<Club> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO clubs (
                id, name, description, logo, category, role, is_recruiting,
                recruitment_deadline, requirements, contact_email,
                application_form_link, response_sheet_link, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(club.id.to_string())
        .bind(&club.name)
        .bind(&club.description)
        .bind(&club.logo)
        .bind(club.category.as_str())
        .bind(&club.role)
        .bind(club.is_recruiting as i32)
        .bind(club.recruitment_deadline.map(|dt| dt.naive_utc()))
        .bind(&club.requirements)
        .bind(&club.contact_email)
        .bind(&club.application_form_link)
        .bind(&club.response_sheet_link)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &club.name))?;

        self.find_by_id(club.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created club".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>> {
        let row = sqlx::query_as::<_, ClubRow>(
            &format!("SELECT {} FROM clubs WHERE id = ?", CLUB_COLUMNS)
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_club).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Club>> {
        let row = sqlx::query_as::<_, ClubRow>(
            &format!("SELECT {} FROM clubs WHERE name = ?", CLUB_COLUMNS)
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_club).transpose()
    }

    async fn find(&self, filter: &ClubFilter) -> Result<Vec<Club>> {
        let category = filter.category.map(|c| c.as_str());
        let pattern = like_pattern(filter.search.as_deref());

        let rows = sqlx::query_as::<_, ClubRow>(
            &format!(
                r#"
                SELECT {} FROM clubs
                WHERE (? = 0 OR is_recruiting = 1)
                  AND (? IS NULL OR category = ?)
                  AND (? IS NULL OR lower(name) LIKE ? ESCAPE '\' OR lower(description) LIKE ? ESCAPE '\')
                ORDER BY name ASC
                "#,
                CLUB_COLUMNS
            )
        )
        .bind(filter.recruiting_only as i32)
        .bind(category)
        .bind(category)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_club)
            .collect()
    }

    async fn update_by_id(&self, id: Uuid, club: Club) -> Result<Club> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE clubs
            SET name = ?, description = ?, logo = ?, category = ?, role = ?,
                is_recruiting = ?, recruitment_deadline = ?, requirements = ?,
                contact_email = ?, application_form_link = ?, response_sheet_link = ?,
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&club.name)
        .bind(&club.description)
        .bind(&club.logo)
        .bind(club.category.as_str())
        .bind(&club.role)
        .bind(club.is_recruiting as i32)
        .bind(club.recruitment_deadline.map(|dt| dt.naive_utc()))
        .bind(&club.requirements)
        .bind(&club.contact_email)
        .bind(&club.application_form_link)
        .bind(&club.response_sheet_link)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &club.name))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Club not found".to_string())
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
