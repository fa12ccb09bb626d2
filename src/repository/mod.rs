use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod club_repository;
pub mod event_repository;
pub mod notice_repository;
pub mod application_repository;
pub mod submission_repository;
pub mod user_repository;

pub use club_repository::SqliteClubRepository;
pub use event_repository::SqliteEventRepository;
pub use notice_repository::SqliteNoticeRepository;
pub use application_repository::SqliteApplicationRepository;
pub use submission_repository::SqliteSubmissionRepository;
pub use user_repository::SqliteUserRepository;

#[async_trait]
pub trait ClubRepository: Send + Sync {
    async fn insert(&self, club: Club) -> Result<Club>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Club>>;
    async fn find(&self, filter: &ClubFilter) -> Result<Vec<Club>>;
    async fn update_by_id(&self, id: Uuid, club: Club) -> Result<Club>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: Event) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    async fn find(&self, filter: &EventFilter) -> Result<Vec<Event>>;
    async fn update_by_id(&self, id: Uuid, event: Event) -> Result<Event>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn insert(&self, notice: Notice) -> Result<Notice>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>>;
    async fn find(&self, filter: &NoticeFilter) -> Result<Vec<Notice>>;
    async fn update_by_id(&self, id: Uuid, notice: Notice) -> Result<Notice>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: Application) -> Result<Application>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>>;
    async fn find(&self, filter: &ApplicationFilter) -> Result<Vec<Application>>;
    async fn update_by_id(&self, id: Uuid, application: Application) -> Result<Application>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: Submission) -> Result<Submission>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>>;
    /// All submissions, or only those for `event_id`; newest first.
    async fn find(&self, event_id: Option<Uuid>) -> Result<Vec<Submission>>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User, password_hash: &str) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// The user and their password hash, for login.
    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>>;
    async fn find_all(&self) -> Result<Vec<User>>;
    /// Distinct non-empty club names across club-admin accounts.
    async fn club_names(&self) -> Result<Vec<String>>;
    async fn update_by_id(&self, id: Uuid, user: User) -> Result<User>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

/// `%term%` pattern for case-insensitive LIKE matching against lowered
/// columns. Wildcards in the term are escaped, so queries must use
/// `LIKE ? ESCAPE '\'`.
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut pattern = String::with_capacity(s.len() + 2);
            pattern.push('%');
            for c in s.to_lowercase().chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(Some("  Robo ")).as_deref(), Some("%robo%"));
        assert_eq!(like_pattern(Some("web_dev")).as_deref(), Some("%web\\_dev%"));
        assert_eq!(like_pattern(Some("50%")).as_deref(), Some("%50\\%%"));
        assert_eq!(like_pattern(Some("a\\b")).as_deref(), Some("%a\\\\b%"));
        assert_eq!(like_pattern(Some("   ")), None);
        assert_eq!(like_pattern(None), None);
    }
}
