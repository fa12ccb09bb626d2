pub mod club_service;
pub mod event_service;
pub mod notice_service;
pub mod enrollment_service;
pub mod user_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::repository::*;
use crate::auth::AuthService;
use crate::lifecycle::LifecycleClock;
use club_service::ClubService;
use event_service::EventService;
use notice_service::NoticeService;
use enrollment_service::EnrollmentService;
use user_service::UserService;

pub struct ServiceContext {
    pub club_repo: Arc<dyn ClubRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub notice_repo: Arc<dyn NoticeRepository>,
    pub application_repo: Arc<dyn ApplicationRepository>,
    pub submission_repo: Arc<dyn SubmissionRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_service: Arc<AuthService>,
    pub lifecycle: LifecycleClock,
    pub club_service: Arc<ClubService>,
    pub event_service: Arc<EventService>,
    pub notice_service: Arc<NoticeService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub user_service: Arc<UserService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        club_repo: Arc<dyn ClubRepository>,
        event_repo: Arc<dyn EventRepository>,
        notice_repo: Arc<dyn NoticeRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
        user_repo: Arc<dyn UserRepository>,
        auth_service: Arc<AuthService>,
        lifecycle: LifecycleClock,
        db_pool: SqlitePool,
    ) -> Self {
        let club_service = Arc::new(ClubService::new(
            club_repo.clone(),
            user_repo.clone(),
            lifecycle.clone(),
        ));
        let event_service = Arc::new(EventService::new(event_repo.clone(), lifecycle.clone()));
        let notice_service = Arc::new(NoticeService::new(notice_repo.clone()));
        let enrollment_service = Arc::new(EnrollmentService::new(
            club_repo.clone(),
            event_repo.clone(),
            application_repo.clone(),
            submission_repo.clone(),
            lifecycle.clone(),
        ));
        let user_service = Arc::new(UserService::new(user_repo.clone(), auth_service.clone()));

        Self {
            club_repo,
            event_repo,
            notice_repo,
            application_repo,
            submission_repo,
            user_repo,
            auth_service,
            lifecycle,
            club_service,
            event_service,
            notice_service,
            enrollment_service,
            user_service,
            db_pool,
        }
    }

    /// Wires every repository to the same SQLite pool.
    pub fn sqlite(db_pool: SqlitePool, auth_service: Arc<AuthService>, lifecycle: LifecycleClock) -> Self {
        Self::new(
            Arc::new(SqliteClubRepository::new(db_pool.clone())),
            Arc::new(SqliteEventRepository::new(db_pool.clone())),
            Arc::new(SqliteNoticeRepository::new(db_pool.clone())),
            Arc::new(SqliteApplicationRepository::new(db_pool.clone())),
            Arc::new(SqliteSubmissionRepository::new(db_pool.clone())),
            Arc::new(SqliteUserRepository::new(db_pool.clone())),
            auth_service,
            lifecycle,
            db_pool,
        )
    }
}

/// Normalizes an optional raw deadline, logging input that could not be
/// parsed. Unparseable input becomes "no deadline".
pub(crate) fn normalize_optional_deadline(
    evaluator: &crate::lifecycle::Evaluator,
    field: &str,
    raw: Option<&str>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let normalized = evaluator.normalize_deadline(raw);
    if normalized.is_none() {
        tracing::warn!("Ignoring unparseable {} {:?}; treating as no deadline", field, raw);
    }
    normalized
}
