use std::collections::HashSet;
use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;
use crate::{
    domain::*,
    error::{AppError, Result},
    lifecycle::{AsPosting, LifecycleClock},
    repository::{ApplicationRepository, ClubRepository, EventRepository, SubmissionRepository},
};

/// Student applications and submissions. Whether a student may act is
/// decided by the lifecycle evaluator at the moment of the request, never by
/// a stored flag alone.
pub struct EnrollmentService {
    club_repo: Arc<dyn ClubRepository>,
    event_repo: Arc<dyn EventRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    submission_repo: Arc<dyn SubmissionRepository>,
    lifecycle: LifecycleClock,
}

impl EnrollmentService {
    pub fn new(
        club_repo: Arc<dyn ClubRepository>,
        event_repo: Arc<dyn EventRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
        lifecycle: LifecycleClock,
    ) -> Self {
        Self {
            club_repo,
            event_repo,
            application_repo,
            submission_repo,
            lifecycle,
        }
    }

    pub async fn apply(&self, request: CreateApplicationRequest) -> Result<Application> {
        request.validate()?;
        let evaluator = self.lifecycle.evaluator();

        match request.kind {
            ApplicationKind::Club => {
                let club = self.find_club(request.reference_id).await?;
                if !evaluator.actions(club.as_posting()).primary {
                    return Err(AppError::BadRequest(format!(
                        "Recruitment for {} is closed",
                        club.name
                    )));
                }
            }
            ApplicationKind::Event => {
                let event = self.find_event(request.reference_id).await?;
                if !evaluator.actions(event.as_posting()).primary {
                    return Err(AppError::BadRequest(format!(
                        "Registration for {} is closed",
                        event.name
                    )));
                }
            }
        }

        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            kind: request.kind,
            reference_id: request.reference_id,
            student_name: request.student_name,
            email: request.email,
            whatsapp_no: request.whatsapp_no,
            branch: request.branch,
            year: request.year,
            enrollment_no: request.enrollment_no,
            drive_link: request.drive_link,
            message: request.message,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = self.application_repo.insert(application).await?;
        tracing::info!(
            "Application {} received for {} {}",
            created.id,
            created.kind.as_str(),
            created.reference_id
        );
        Ok(created)
    }

    pub async fn submit(&self, request: CreateSubmissionRequest) -> Result<Submission> {
        request.validate()?;

        let event = self.find_event(request.event_id).await?;
        let actions = self.lifecycle.evaluator().actions(event.as_posting());
        if !actions.can_submit() {
            return Err(AppError::BadRequest(format!(
                "Submissions for {} are closed",
                event.name
            )));
        }

        let now = Utc::now();
        let submission = Submission {
            id: Uuid::new_v4(),
            event_id: event.id,
            student_name: request.student_name,
            email: request.email,
            enrollment_no: request.enrollment_no,
            year: request.year,
            branch: request.branch,
            drive_link: request.drive_link,
            submitted_at: now,
            created_at: now,
            updated_at: now,
        };

        let created = self.submission_repo.insert(submission).await?;
        tracing::info!("Submission {} received for event {}", created.id, event.name);
        Ok(created)
    }

    /// Applications visible to the caller: all of them for a super-admin,
    /// otherwise those addressed to the caller's club and its events.
    pub async fn list_applications(
        &self,
        actor: &User,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>> {
        let applications = self.application_repo.find(filter).await?;
        if actor.is_superadmin() {
            return Ok(applications);
        }

        let owned = self.owned_postings(actor).await?;
        Ok(applications
            .into_iter()
            .filter(|application| owned.contains(&application.reference_id))
            .collect())
    }

    pub async fn get_application(&self, actor: &User, id: Uuid) -> Result<Application> {
        let application = self.application_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
        self.ensure_owns_application(actor, &application).await?;
        Ok(application)
    }

    pub async fn update_application(
        &self,
        actor: &User,
        id: Uuid,
        request: UpdateApplicationRequest,
    ) -> Result<Application> {
        let mut application = self.get_application(actor, id).await?;

        if let Some(student_name) = request.student_name {
            application.student_name = student_name;
        }
        if let Some(email) = request.email {
            application.email = email;
        }
        if let Some(whatsapp_no) = request.whatsapp_no {
            application.whatsapp_no = Some(whatsapp_no);
        }
        if let Some(branch) = request.branch {
            application.branch = branch;
        }
        if let Some(year) = request.year {
            application.year = year;
        }
        if let Some(enrollment_no) = request.enrollment_no {
            application.enrollment_no = Some(enrollment_no);
        }
        if let Some(drive_link) = request.drive_link {
            application.drive_link = drive_link;
        }
        if let Some(message) = request.message {
            application.message = Some(message);
        }
        if let Some(status) = request.status {
            application.status = status;
        }

        self.application_repo.update_by_id(id, application).await
    }

    /// Attaches the work link to an existing application.
    pub async fn attach_drive_link(
        &self,
        actor: &User,
        id: Uuid,
        drive_link: &str,
    ) -> Result<Application> {
        let drive_link = drive_link.trim();
        if drive_link.is_empty() {
            return Err(AppError::BadRequest("Drive link is required".to_string()));
        }

        let mut application = self.get_application(actor, id).await?;
        application.drive_link = drive_link.to_string();
        self.application_repo.update_by_id(id, application).await
    }

    pub async fn delete_application(&self, actor: &User, id: Uuid) -> Result<()> {
        let application = self.get_application(actor, id).await?;
        self.application_repo.delete_by_id(application.id).await?;
        Ok(())
    }

    pub async fn list_submissions(
        &self,
        actor: &User,
        event_id: Option<Uuid>,
    ) -> Result<Vec<Submission>> {
        if let Some(event_id) = event_id {
            let event = self.find_event(event_id).await?;
            if !actor.can_manage(&event.club_name) {
                return Err(AppError::Forbidden(
                    "You can only view submissions for your own events".to_string(),
                ));
            }
        }

        let submissions = self.submission_repo.find(event_id).await?;
        if actor.is_superadmin() {
            return Ok(submissions);
        }

        let owned = self.owned_postings(actor).await?;
        Ok(submissions
            .into_iter()
            .filter(|submission| owned.contains(&submission.event_id))
            .collect())
    }

    pub async fn delete_submission(&self, actor: &User, id: Uuid) -> Result<()> {
        let submission = self.submission_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if !actor.is_superadmin() {
            let event = self.event_repo.find_by_id(submission.event_id).await?;
            let owns = event.map(|e| actor.can_manage(&e.club_name)).unwrap_or(false);
            if !owns {
                return Err(AppError::Forbidden(
                    "You can only manage submissions for your own events".to_string(),
                ));
            }
        }

        self.submission_repo.delete_by_id(id).await?;
        Ok(())
    }

    async fn ensure_owns_application(&self, actor: &User, application: &Application) -> Result<()> {
        if actor.is_superadmin() {
            return Ok(());
        }

        let owner = match application.kind {
            ApplicationKind::Club => self
                .club_repo
                .find_by_id(application.reference_id)
                .await?
                .map(|club| club.name),
            ApplicationKind::Event => self
                .event_repo
                .find_by_id(application.reference_id)
                .await?
                .map(|event| event.club_name),
        };

        match owner {
            Some(club_name) if actor.can_manage(&club_name) => Ok(()),
            _ => Err(AppError::Forbidden(
                "You can only manage applications for your own club".to_string(),
            )),
        }
    }

    /// Ids of the club and events owned by a club admin.
    async fn owned_postings(&self, actor: &User) -> Result<HashSet<Uuid>> {
        let mut owned = HashSet::new();

        if let Some(club) = self.club_repo.find_by_name(&actor.club).await? {
            owned.insert(club.id);
        }

        let events = self
            .event_repo
            .find(&EventFilter {
                club_name: Some(actor.club.clone()),
                ..Default::default()
            })
            .await?;
        owned.extend(events.into_iter().map(|event| event.id));

        Ok(owned)
    }

    async fn find_club(&self, id: Uuid) -> Result<Club> {
        self.club_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))
    }

    async fn find_event(&self, id: Uuid) -> Result<Event> {
        self.event_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }
}
