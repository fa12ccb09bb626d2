use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;
use crate::{
    domain::*,
    error::{AppError, Result},
    lifecycle::{annotate, evaluate, visible_listing, AsPosting, Evaluated, Evaluator, LifecycleClock},
    repository::{ClubRepository, UserRepository},
    service::normalize_optional_deadline,
};

pub struct ClubService {
    repo: Arc<dyn ClubRepository>,
    user_repo: Arc<dyn UserRepository>,
    lifecycle: LifecycleClock,
}

impl ClubService {
    pub fn new(
        repo: Arc<dyn ClubRepository>,
        user_repo: Arc<dyn UserRepository>,
        lifecycle: LifecycleClock,
    ) -> Self {
        Self { repo, user_repo, lifecycle }
    }

    pub async fn create_club(&self, actor: &User, mut request: CreateClubRequest) -> Result<Club> {
        request.name = request.name.trim().to_string();
        request.validate()?;
        ensure_can_manage(actor, &request.name)?;

        let evaluator = self.lifecycle.evaluator();
        let now = Utc::now();
        let club = Club {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            logo: request.logo,
            category: request.category,
            role: request.role,
            is_recruiting: request.is_recruiting,
            recruitment_deadline: normalize_optional_deadline(
                &evaluator,
                "recruitment deadline",
                request.recruitment_deadline.as_deref(),
            ),
            requirements: request.requirements,
            contact_email: request.contact_email,
            application_form_link: request.application_form_link,
            response_sheet_link: request.response_sheet_link,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.insert(club).await?;
        tracing::info!("Club {} created by {}", created.name, actor.email);
        Ok(created)
    }

    /// Updates a club addressed by id or by name. Addressing by a name that
    /// does not exist yet creates the club.
    pub async fn update_club(
        &self,
        actor: &User,
        ident: &str,
        request: UpdateClubRequest,
    ) -> Result<Club> {
        request.validate()?;
        let evaluator = self.lifecycle.evaluator();

        let existing = match Uuid::parse_str(ident) {
            Ok(id) => Some(
                self.repo.find_by_id(id).await?
                    .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?,
            ),
            Err(_) => self.repo.find_by_name(ident).await?,
        };

        match existing {
            Some(club) => {
                ensure_can_manage(actor, &club.name)?;
                let id = club.id;
                let updated = apply_update(club, request, &evaluator);
                self.repo.update_by_id(id, updated).await
            }
            None => {
                ensure_can_manage(actor, ident)?;
                let now = Utc::now();
                let blank = Club {
                    id: Uuid::new_v4(),
                    name: ident.trim().to_string(),
                    description: String::new(),
                    logo: String::new(),
                    category: ClubCategory::default(),
                    role: String::new(),
                    is_recruiting: false,
                    recruitment_deadline: None,
                    requirements: None,
                    contact_email: actor.email.clone(),
                    application_form_link: String::new(),
                    response_sheet_link: String::new(),
                    created_at: now,
                    updated_at: now,
                };
                let club = apply_update(blank, request, &evaluator);
                tracing::info!("Club {} created through upsert by {}", club.name, actor.email);
                self.repo.insert(club).await
            }
        }
    }

    /// Turns recruitment off. A club that does not exist is not an error.
    pub async fn close_recruitment(&self, actor: &User, ident: &str) -> Result<Option<Club>> {
        let existing = match Uuid::parse_str(ident) {
            Ok(id) => self.repo.find_by_id(id).await?,
            Err(_) => self.repo.find_by_name(ident).await?,
        };

        let Some(mut club) = existing else {
            tracing::debug!("Close requested for unknown club {}", ident);
            return Ok(None);
        };

        ensure_can_manage(actor, &club.name)?;
        club.is_recruiting = false;
        let id = club.id;
        self.repo.update_by_id(id, club).await.map(Some)
    }

    /// Student feed: hidden recruitments removed, the rest ordered by
    /// deadline.
    pub async fn list_feed(&self, filter: &ClubFilter) -> Result<Vec<Evaluated<Club>>> {
        let clubs = self.repo.find(filter).await?;
        Ok(visible_listing(clubs, &self.lifecycle.evaluator()))
    }

    pub async fn get_club(&self, id: Uuid) -> Result<Evaluated<Club>> {
        let club = self.repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?;
        Ok(evaluate(club, &self.lifecycle.evaluator()))
    }

    /// Club names known from club-admin accounts.
    pub async fn club_directory(&self) -> Result<Vec<String>> {
        self.user_repo.club_names().await
    }

    /// Every recruitment the caller manages, hidden ones included.
    pub async fn managed_clubs(&self, actor: &User) -> Result<Vec<Evaluated<Club>>> {
        let mut clubs = self.repo.find(&ClubFilter::default()).await?;
        clubs.retain(|club| actor.can_manage(club.as_posting().owner()));
        Ok(annotate(clubs, &self.lifecycle.evaluator()))
    }
}

pub(crate) fn ensure_can_manage(actor: &User, club_name: &str) -> Result<()> {
    if actor.can_manage(club_name) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You can only manage postings for {}",
            actor.club
        )))
    }
}

fn apply_update(mut club: Club, request: UpdateClubRequest, evaluator: &Evaluator) -> Club {
    if let Some(description) = request.description {
        club.description = description;
    }
    if let Some(logo) = request.logo {
        club.logo = logo;
    }
    if let Some(category) = request.category {
        club.category = category;
    }
    if let Some(role) = request.role {
        club.role = role;
    }
    if let Some(is_recruiting) = request.is_recruiting {
        club.is_recruiting = is_recruiting;
    }
    if let Some(raw) = request.recruitment_deadline {
        club.recruitment_deadline =
            normalize_optional_deadline(evaluator, "recruitment deadline", Some(raw.as_str()));
    }
    if let Some(requirements) = request.requirements {
        club.requirements = Some(requirements);
    }
    if let Some(contact_email) = request.contact_email {
        club.contact_email = contact_email;
    }
    if let Some(link) = request.application_form_link {
        club.application_form_link = link;
    }
    if let Some(link) = request.response_sheet_link {
        club.response_sheet_link = link;
    }
    club
}
