use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Notice, NoticeCategory, NoticeFilter, NoticeStatus},
    error::{AppError, Result},
    repository::{like_pattern, NoticeRepository},
};

#[derive(FromRow)]
struct NoticeRow {
    id: String,
    title: String,
    content: String,
    category: String,
    club_name: String,
    tags: String,
    is_active: i32,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const NOTICE_COLUMNS: &str =
    "id, title, content, category, club_name, tags, is_active, status, created_at, updated_at";

pub struct SqliteNoticeRepository {
    pool: SqlitePool,
}

impl SqliteNoticeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_notice(row: NoticeRow) -> Result<Notice> {
        Ok(Notice {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            content: row.content,
            category: NoticeCategory::from_str(&row.category)
                .ok_or_else(|| AppError::Database(format!("Invalid notice category: {}", row.category)))?,
            club_name: row.club_name,
            tags: serde_json::from_str(&row.tags).map_err(|e| AppError::Database(e.to_string()))?,
            is_active: row.is_active != 0,
            status: NoticeStatus::from_str(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid notice status: {}", row.status)))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn tags_json(tags: &[String]) -> Result<String> {
        serde_json::to_string(tags).map_err(|e| AppError::Internal(e.to_string()))
    }
}

#[async_trait]
impl NoticeRepository for SqliteNoticeRepository {
    async fn insert(&self, notice: Notice) -> Result<Notice> {
        let now = Utc::now().naive_utc();
        let tags = Self::tags_json(&notice.tags)?;

        sqlx::query(
            r#"
            INSERT INTO notices (
                id, title, content, category, club_name, tags, is_active, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(notice.id.to_string())
        .bind(&notice.title)
        .bind(&notice.content)
        .bind(notice.category.as_str())
        .bind(&notice.club_name)
        .bind(&tags)
        .bind(notice.is_active as i32)
        .bind(notice.status.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(notice.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created notice".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>> {
        let row = sqlx::query_as::<_, NoticeRow>(
            &format!("SELECT {} FROM notices WHERE id = ?", NOTICE_COLUMNS)
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_notice).transpose()
    }

    async fn find(&self, filter: &NoticeFilter) -> Result<Vec<Notice>> {
        let category = filter.category.map(|c| c.as_str());
        let pattern = like_pattern(filter.search.as_deref());

        let rows = sqlx::query_as::<_, NoticeRow>(
            &format!(
                r#"
                SELECT {} FROM notices
                WHERE (? = 0 OR is_active = 1)
                  AND (? IS NULL OR category = ?)
                  AND (? IS NULL OR club_name = ?)
                  AND (? IS NULL OR lower(title) LIKE ? ESCAPE '\' OR lower(content) LIKE ? ESCAPE '\')
                ORDER BY created_at DESC
                "#,
                NOTICE_COLUMNS
            )
        )
        .bind(filter.active_only as i32)
        .bind(category)
        .bind(category)
        .bind(&filter.club_name)
        .bind(&filter.club_name)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_notice)
            .collect()
    }

    async fn update_by_id(&self, id: Uuid, notice: Notice) -> Result<Notice> {
        let now = Utc::now().naive_utc();
        let tags = Self::tags_json(&notice.tags)?;

        sqlx::query(
            r#"
            UPDATE notices
            SET title = ?, content = ?, category = ?, club_name = ?, tags = ?,
                is_active = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&notice.title)
        .bind(&notice.content)
        .bind(notice.category.as_str())
        .bind(&notice.club_name)
        .bind(&tags)
        .bind(notice.is_active as i32)
        .bind(notice.status.as_str())
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Notice not found".to_string())
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notices WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
