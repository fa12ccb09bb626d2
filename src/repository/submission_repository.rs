use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::Submission,
    error::{AppError, Result},
    repository::SubmissionRepository,
};

#[derive(FromRow)]
struct SubmissionRow {
    id: String,
    event_id: String,
    student_name: String,
    email: String,
    enrollment_no: String,
    year: String,
    branch: String,
    drive_link: String,
    submitted_at: NaiveDateTime,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const SUBMISSION_COLUMNS: &str = r#"
    id, event_id, student_name, email, enrollment_no, year, branch, drive_link,
    submitted_at, created_at, updated_at
"#;

pub struct SqliteSubmissionRepository {
    pool: SqlitePool,
}

impl SqliteSubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_submission(row: SubmissionRow) -> Result<Submission> {
        Ok(Submission {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            event_id: Uuid::parse_str(&row.event_id).map_err(|e| AppError::Database(e.to_string()))?,
            student_name: row.student_name,
            email: row.email,
            enrollment_no: row.enrollment_no,
            year: row.year,
            branch: row.branch,
            drive_link: row.drive_link,
            submitted_at: DateTime::from_naive_utc_and_offset(row.submitted_at, Utc),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl SubmissionRepository for SqliteSubmissionRepository {
    async fn insert(&self, submission: Submission) -> Result<Submission> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, event_id, student_name, email, enrollment_no, year, branch, drive_link,
                submitted_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(submission.id.to_string())
        .bind(submission.event_id.to_string())
        .bind(&submission.student_name)
        .bind(&submission.email)
        .bind(&submission.enrollment_no)
        .bind(&submission.year)
        .bind(&submission.branch)
        .bind(&submission.drive_link)
        .bind(submission.submitted_at.naive_utc())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(submission.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created submission".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            &format!("SELECT {} FROM submissions WHERE id = ?", SUBMISSION_COLUMNS)
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_submission).transpose()
    }

    async fn find(&self, event_id: Option<Uuid>) -> Result<Vec<Submission>> {
        let event_id = event_id.map(|id| id.to_string());

        let rows = sqlx::query_as::<_, SubmissionRow>(
            &format!(
                r#"
                SELECT {} FROM submissions
                WHERE (? IS NULL OR event_id = ?)
                ORDER BY created_at DESC
                "#,
                SUBMISSION_COLUMNS
            )
        )
        .bind(&event_id)
        .bind(&event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_submission)
            .collect()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
