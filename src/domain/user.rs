use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Club name carried by super-admin accounts.
pub const ALL_CLUBS: &str = "All";

/// An admin account. Students never log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub club: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_superadmin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }

    /// Whether this account may create or edit postings owned by `club_name`.
    pub fn can_manage(&self, club_name: &str) -> bool {
        self.is_superadmin() || self.club == club_name
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UserRole {
    #[serde(rename = "superadmin")]
    SuperAdmin,
    #[default]
    #[serde(rename = "clubadmin")]
    ClubAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "superadmin",
            UserRole::ClubAdmin => "clubadmin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "superadmin" => Some(UserRole::SuperAdmin),
            "clubadmin" => Some(UserRole::ClubAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Option<UserRole>,
    pub club: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub club: Option<String>,
    pub is_active: Option<bool>,
}
