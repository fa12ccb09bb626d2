use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A student's application to a club recruitment or an event registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub kind: ApplicationKind,
    pub reference_id: Uuid,
    pub student_name: String,
    pub email: String,
    pub whatsapp_no: Option<String>,
    pub branch: String,
    pub year: String,
    pub enrollment_no: Option<String>,
    pub drive_link: String,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationKind {
    Club,
    Event,
}

impl ApplicationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationKind::Club => "club",
            ApplicationKind::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "club" => Some(ApplicationKind::Club),
            "event" => Some(ApplicationKind::Event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub kind: Option<ApplicationKind>,
    pub reference_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    pub kind: ApplicationKind,
    pub reference_id: Uuid,
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    pub whatsapp_no: Option<String>,
    #[validate(length(min = 1, message = "Branch is required"))]
    pub branch: String,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    pub enrollment_no: Option<String>,
    #[serde(default)]
    pub drive_link: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateApplicationRequest {
    pub student_name: Option<String>,
    pub email: Option<String>,
    pub whatsapp_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub enrollment_no: Option<String>,
    pub drive_link: Option<String>,
    pub message: Option<String>,
    pub status: Option<ApplicationStatus>,
}
