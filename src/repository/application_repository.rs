use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Application, ApplicationFilter, ApplicationKind, ApplicationStatus},
    error::{AppError, Result},
    repository::ApplicationRepository,
};

#[derive(FromRow)]
struct ApplicationRow {
    id: String,
    kind: String,
    reference_id: String,
    student_name: String,
    email: String,
    whatsapp_no: Option<String>,
    branch: String,
    year: String,
    enrollment_no: Option<String>,
    drive_link: String,
    message: Option<String>,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const APPLICATION_COLUMNS: &str = r#"
    id, kind, reference_id, student_name, email, whatsapp_no, branch, year,
    enrollment_no, drive_link, message, status, created_at, updated_at
"#;

pub struct SqliteApplicationRepository {
    pool: SqlitePool,
}

impl SqliteApplicationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_application(row: ApplicationRow) -> Result<Application> {
        Ok(Application {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            kind: ApplicationKind::from_str(&row.kind)
                .ok_or_else(|| AppError::Database(format!("Invalid application kind: {}", row.kind)))?,
            reference_id: Uuid::parse_str(&row.reference_id).map_err(|e| AppError::Database(e.to_string()))?,
            student_name: row.student_name,
            email: row.email,
            whatsapp_no: row.whatsapp_no,
            branch: row.branch,
            year: row.year,
            enrollment_no: row.enrollment_no,
            drive_link: row.drive_link,
            message: row.message,
            status: ApplicationStatus::from_str(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid application status: {}", row.status)))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl ApplicationRepository for SqliteApplicationRepository {
    async fn insert(&self, application: Application) -> Result<Application> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO applications (
                id, kind, reference_id, student_name, email, whatsapp_no, branch, year,
                enrollment_no, drive_link, message, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(application.id.to_string())
        .bind(application.kind.as_str())
        .bind(application.reference_id.to_string())
        .bind(&application.student_name)
        .bind(&application.email)
        .bind(&application.whatsapp_no)
        .bind(&application.branch)
        .bind(&application.year)
        .bind(&application.enrollment_no)
        .bind(&application.drive_link)
        .bind(&application.message)
        .bind(application.status.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(application.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created application".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            &format!("SELECT {} FROM applications WHERE id = ?", APPLICATION_COLUMNS)
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_application).transpose()
    }

    async fn find(&self, filter: &ApplicationFilter) -> Result<Vec<Application>> {
        let kind = filter.kind.map(|k| k.as_str());
        let reference_id = filter.reference_id.map(|id| id.to_string());
        let status = filter.status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, ApplicationRow>(
            &format!(
                r#"
                SELECT {} FROM applications
                WHERE (? IS NULL OR kind = ?)
                  AND (? IS NULL OR reference_id = ?)
                  AND (? IS NULL OR status = ?)
                ORDER BY created_at DESC
                "#,
                APPLICATION_COLUMNS
            )
        )
        .bind(kind)
        .bind(kind)
        .bind(&reference_id)
        .bind(&reference_id)
        .bind(status)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_application)
            .collect()
    }

    async fn update_by_id(&self, id: Uuid, application: Application) -> Result<Application> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE applications
            SET student_name = ?, email = ?, whatsapp_no = ?, branch = ?, year = ?,
                enrollment_no = ?, drive_link = ?, message = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&application.student_name)
        .bind(&application.email)
        .bind(&application.whatsapp_no)
        .bind(&application.branch)
        .bind(&application.year)
        .bind(&application.enrollment_no)
        .bind(&application.drive_link)
        .bind(&application.message)
        .bind(application.status.as_str())
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Application not found".to_string())
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
