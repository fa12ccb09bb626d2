use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Event, EventFilter},
    error::{AppError, Result},
    repository::{like_pattern, EventRepository},
};

#[derive(FromRow)]
struct EventRow {
    id: String,
    name: String,
    problem_statement: String,
    description: String,
    club_name: String,
    event_date: Option<NaiveDateTime>,
    registration_deadline: Option<NaiveDateTime>,
    submission_deadline: Option<NaiveDateTime>,
    is_active: i32,
    prizes: Option<String>,
    rules: Option<String>,
    registration_form_link: String,
    submission_form_link: String,
    registration_response_link: String,
    submission_response_link: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const EVENT_COLUMNS: &str = r#"
    id, name, problem_statement, description, club_name,
    event_date, registration_deadline, submission_deadline, is_active,
    prizes, rules, registration_form_link, submission_form_link,
    registration_response_link, submission_response_link,
    created_at, updated_at
"#;

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Result<Event> {
        let utc = |dt: NaiveDateTime| DateTime::from_naive_utc_and_offset(dt, Utc);

        Ok(Event {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            problem_statement: row.problem_statement,
            description: row.description,
            club_name: row.club_name,
            event_date: row.event_date.map(utc),
            registration_deadline: row.registration_deadline.map(utc),
            submission_deadline: row.submission_deadline.map(utc),
            is_active: row.is_active != 0,
            prizes: row.prizes,
            rules: row.rules,
            registration_form_link: row.registration_form_link,
            submission_form_link: row.submission_form_link,
            registration_response_link: row.registration_response_link,
            submission_response_link: row.submission_response_link,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn insert(&self, event: Event) -> Result<Event> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO events (
                id, name, problem_statement, description, club_name,
                event_date, registration_deadline, submission_deadline, is_active,
                prizes, rules, registration_form_link, submission_form_link,
                registration_response_link, submission_response_link,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(event.id.to_string())
        .bind(&event.name)
        .bind(&event.problem_statement)
        .bind(&event.description)
        .bind(&event.club_name)
        .bind(event.event_date.map(|dt| dt.naive_utc()))
        .bind(event.registration_deadline.map(|dt| dt.naive_utc()))
        .bind(event.submission_deadline.map(|dt| dt.naive_utc()))
        .bind(event.is_active as i32)
        .bind(&event.prizes)
        .bind(&event.rules)
        .bind(&event.registration_form_link)
        .bind(&event.submission_form_link)
        .bind(&event.registration_response_link)
        .bind(&event.submission_response_link)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(event.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created event".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS)
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_event).transpose()
    }

    async fn find(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let is_active = filter.is_active.map(|active| active as i32);
        let pattern = like_pattern(filter.search.as_deref());

        let rows = sqlx::query_as::<_, EventRow>(
            &format!(
                r#"
                SELECT {} FROM events
                WHERE (? IS NULL OR club_name = ?)
                  AND (? IS NULL OR is_active = ?)
                  AND (? IS NULL
                       OR lower(name) LIKE ? ESCAPE '\'
                       OR lower(description) LIKE ? ESCAPE '\'
                       OR lower(problem_statement) LIKE ? ESCAPE '\')
                ORDER BY event_date DESC
                "#,
                EVENT_COLUMNS
            )
        )
        .bind(&filter.club_name)
        .bind(&filter.club_name)
        .bind(is_active)
        .bind(is_active)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_event)
            .collect()
    }

    async fn update_by_id(&self, id: Uuid, event: Event) -> Result<Event> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE events
            SET name = ?, problem_statement = ?, description = ?, club_name = ?,
                event_date = ?, registration_deadline = ?, submission_deadline = ?,
                is_active = ?, prizes = ?, rules = ?,
                registration_form_link = ?, submission_form_link = ?,
                registration_response_link = ?, submission_response_link = ?,
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&event.name)
        .bind(&event.problem_statement)
        .bind(&event.description)
        .bind(&event.club_name)
        .bind(event.event_date.map(|dt| dt.naive_utc()))
        .bind(event.registration_deadline.map(|dt| dt.naive_utc()))
        .bind(event.submission_deadline.map(|dt| dt.naive_utc()))
        .bind(event.is_active as i32)
        .bind(&event.prizes)
        .bind(&event.rules)
        .bind(&event.registration_form_link)
        .bind(&event.submission_form_link)
        .bind(&event.registration_response_link)
        .bind(&event.submission_response_link)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Event not found".to_string())
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
