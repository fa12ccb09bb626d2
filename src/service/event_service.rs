use std::sync::Arc;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;
use crate::{
    domain::*,
    error::{AppError, Result},
    lifecycle::{annotate, evaluate, visible_listing, Evaluated, Evaluator, LifecycleClock},
    repository::EventRepository,
    service::{club_service::ensure_can_manage, normalize_optional_deadline},
};

pub struct EventService {
    repo: Arc<dyn EventRepository>,
    lifecycle: LifecycleClock,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>, lifecycle: LifecycleClock) -> Self {
        Self { repo, lifecycle }
    }

    pub async fn create_event(&self, actor: &User, request: CreateEventRequest) -> Result<Event> {
        request.validate()?;
        ensure_can_manage(actor, &request.club_name)?;

        let evaluator = self.lifecycle.evaluator();
        let event_date = parse_event_date(&evaluator, &request.event_date)?;
        let now = Utc::now();

        let event = Event {
            id: Uuid::new_v4(),
            name: request.name,
            problem_statement: request.problem_statement,
            description: request.description,
            club_name: request.club_name,
            event_date: Some(event_date),
            registration_deadline: normalize_optional_deadline(
                &evaluator,
                "registration deadline",
                request.registration_deadline.as_deref(),
            ),
            submission_deadline: normalize_optional_deadline(
                &evaluator,
                "submission deadline",
                request.submission_deadline.as_deref(),
            ),
            is_active: request.is_active.unwrap_or(true),
            prizes: request.prizes,
            rules: request.rules,
            registration_form_link: request.registration_form_link,
            submission_form_link: request.submission_form_link,
            registration_response_link: request.registration_response_link,
            submission_response_link: request.submission_response_link,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.insert(event).await?;
        tracing::info!("Event {} created for {}", created.name, created.club_name);
        Ok(created)
    }

    pub async fn update_event(
        &self,
        actor: &User,
        id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        let event = self.find(id).await?;
        ensure_can_manage(actor, &event.club_name)?;

        let updated = apply_update(event, request, &self.lifecycle.evaluator())?;
        self.repo.update_by_id(id, updated).await
    }

    pub async fn delete_event(&self, actor: &User, id: Uuid) -> Result<()> {
        let event = self.find(id).await?;
        ensure_can_manage(actor, &event.club_name)?;

        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }
        tracing::info!("Event {} deleted by {}", event.name, actor.email);
        Ok(())
    }

    /// Student feed: hidden events removed, the rest ordered by their
    /// earliest deadline.
    pub async fn list_feed(&self, filter: &EventFilter) -> Result<Vec<Evaluated<Event>>> {
        let events = self.repo.find(filter).await?;
        Ok(visible_listing(events, &self.lifecycle.evaluator()))
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Evaluated<Event>> {
        let event = self.find(id).await?;
        Ok(evaluate(event, &self.lifecycle.evaluator()))
    }

    /// Every event the caller manages, hidden ones included.
    pub async fn managed_events(&self, actor: &User) -> Result<Vec<Evaluated<Event>>> {
        let filter = EventFilter {
            club_name: (!actor.is_superadmin()).then(|| actor.club.clone()),
            ..Default::default()
        };
        let events = self.repo.find(&filter).await?;
        Ok(annotate(events, &self.lifecycle.evaluator()))
    }

    async fn find(&self, id: Uuid) -> Result<Event> {
        self.repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }
}

/// The event date is kept as given; only deadlines move to end of day.
fn parse_event_date(evaluator: &Evaluator, raw: &str) -> Result<DateTime<Utc>> {
    evaluator
        .parse_date_like(raw.trim())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid event date: {}", raw)))
}

fn apply_update(mut event: Event, request: UpdateEventRequest, evaluator: &Evaluator) -> Result<Event> {
    if let Some(name) = request.name {
        event.name = name;
    }
    if let Some(problem_statement) = request.problem_statement {
        event.problem_statement = problem_statement;
    }
    if let Some(description) = request.description {
        event.description = description;
    }
    if let Some(raw) = request.event_date {
        event.event_date = Some(parse_event_date(evaluator, &raw)?);
    }
    if let Some(raw) = request.registration_deadline {
        event.registration_deadline =
            normalize_optional_deadline(evaluator, "registration deadline", Some(raw.as_str()));
    }
    if let Some(raw) = request.submission_deadline {
        event.submission_deadline =
            normalize_optional_deadline(evaluator, "submission deadline", Some(raw.as_str()));
    }
    if let Some(is_active) = request.is_active {
        event.is_active = is_active;
    }
    if let Some(prizes) = request.prizes {
        event.prizes = Some(prizes);
    }
    if let Some(rules) = request.rules {
        event.rules = Some(rules);
    }
    if let Some(link) = request.registration_form_link {
        event.registration_form_link = link;
    }
    if let Some(link) = request.submission_form_link {
        event.submission_form_link = link;
    }
    if let Some(link) = request.registration_response_link {
        event.registration_response_link = link;
    }
    if let Some(link) = request.submission_response_link {
        event.submission_response_link = link;
    }
    Ok(event)
}
