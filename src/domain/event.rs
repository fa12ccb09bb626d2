use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub problem_statement: String,
    pub description: String,
    pub club_name: String,
    pub event_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub submission_deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub prizes: Option<String>,
    pub rules: Option<String>,
    pub registration_form_link: String,
    pub submission_form_link: String,
    pub registration_response_link: String,
    pub submission_response_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub club_name: Option<String>,
    pub is_active: Option<bool>,
    /// Case-insensitive match on name, description or problem statement.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Event name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Problem statement is required"))]
    pub problem_statement: String,
    #[validate(length(min = 1, message = "Event description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Club name is required"))]
    pub club_name: String,
    pub event_date: String,
    pub registration_deadline: Option<String>,
    pub submission_deadline: Option<String>,
    pub is_active: Option<bool>,
    pub prizes: Option<String>,
    pub rules: Option<String>,
    #[serde(default)]
    pub registration_form_link: String,
    #[serde(default)]
    pub submission_form_link: String,
    #[serde(default)]
    pub registration_response_link: String,
    #[serde(default)]
    pub submission_response_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub problem_statement: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub registration_deadline: Option<String>,
    pub submission_deadline: Option<String>,
    pub is_active: Option<bool>,
    pub prizes: Option<String>,
    pub rules: Option<String>,
    pub registration_form_link: Option<String>,
    pub submission_form_link: Option<String>,
    pub registration_response_link: Option<String>,
    pub submission_response_link: Option<String>,
}
