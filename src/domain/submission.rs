use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub event_id: Uuid,
    pub student_name: String,
    pub email: String,
    pub enrollment_no: String,
    pub year: String,
    pub branch: String,
    pub drive_link: String,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    pub event_id: Uuid,
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Enrollment number is required"))]
    pub enrollment_no: String,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    #[validate(length(min = 1, message = "Branch is required"))]
    pub branch: String,
    #[validate(length(min = 1, message = "Drive link is required"))]
    pub drive_link: String,
}
