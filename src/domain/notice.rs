use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub club_name: String,
    pub tags: Vec<String>,
    pub is_active: bool,
    /// Legacy display status. Nothing derives visibility from it.
    pub status: NoticeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NoticeCategory {
    #[default]
    General,
    Recruitment,
    Event,
    Announcement,
}

impl NoticeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeCategory::General => "General",
            NoticeCategory::Recruitment => "Recruitment",
            NoticeCategory::Event => "Event",
            NoticeCategory::Announcement => "Announcement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "General" => Some(NoticeCategory::General),
            "Recruitment" => Some(NoticeCategory::Recruitment),
            "Event" => Some(NoticeCategory::Event),
            "Announcement" => Some(NoticeCategory::Announcement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    #[default]
    Live,
    Expired,
    Closed,
    Recent,
}

impl NoticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeStatus::Live => "live",
            NoticeStatus::Expired => "expired",
            NoticeStatus::Closed => "closed",
            NoticeStatus::Recent => "recent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "live" => Some(NoticeStatus::Live),
            "expired" => Some(NoticeStatus::Expired),
            "closed" => Some(NoticeStatus::Closed),
            "recent" => Some(NoticeStatus::Recent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoticeFilter {
    pub active_only: bool,
    pub category: Option<NoticeCategory>,
    pub club_name: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, message = "Notice title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Notice content is required"))]
    pub content: String,
    #[serde(default)]
    pub category: NoticeCategory,
    pub club_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub status: NoticeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<NoticeCategory>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub status: Option<NoticeStatus>,
}
