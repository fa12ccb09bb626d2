use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A club's recruitment posting. The club name is the club identity and is
/// unique across the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub category: ClubCategory,
    pub role: String,
    pub is_recruiting: bool,
    pub recruitment_deadline: Option<DateTime<Utc>>,
    pub requirements: Option<String>,
    pub contact_email: String,
    pub application_form_link: String,
    pub response_sheet_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClubCategory {
    Coding,
    Robotics,
    Design,
    Cybersecurity,
    AiMl,
    WebDev,
    #[default]
    Other,
}

impl ClubCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubCategory::Coding => "coding",
            ClubCategory::Robotics => "robotics",
            ClubCategory::Design => "design",
            ClubCategory::Cybersecurity => "cybersecurity",
            ClubCategory::AiMl => "ai-ml",
            ClubCategory::WebDev => "web-dev",
            ClubCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coding" => Some(ClubCategory::Coding),
            "robotics" => Some(ClubCategory::Robotics),
            "design" => Some(ClubCategory::Design),
            "cybersecurity" => Some(ClubCategory::Cybersecurity),
            "ai-ml" => Some(ClubCategory::AiMl),
            "web-dev" => Some(ClubCategory::WebDev),
            "other" => Some(ClubCategory::Other),
            _ => None,
        }
    }
}

/// Store-level filter for `ClubRepository::find`.
#[derive(Debug, Clone, Default)]
pub struct ClubFilter {
    pub recruiting_only: bool,
    pub category: Option<ClubCategory>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClubRequest {
    #[validate(length(min = 1, message = "Club name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Club description is required"))]
    pub description: String,
    #[validate(email(message = "Contact email is invalid"))]
    pub contact_email: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub category: ClubCategory,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_recruiting: bool,
    /// Any date-like string; normalized to end of day on write.
    pub recruitment_deadline: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub application_form_link: String,
    #[serde(default)]
    pub response_sheet_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateClubRequest {
    pub description: Option<String>,
    pub logo: Option<String>,
    pub category: Option<ClubCategory>,
    pub role: Option<String>,
    pub is_recruiting: Option<bool>,
    pub recruitment_deadline: Option<String>,
    pub requirements: Option<String>,
    #[validate(email(message = "Contact email is invalid"))]
    pub contact_email: Option<String>,
    pub application_form_link: Option<String>,
    pub response_sheet_link: Option<String>,
}
