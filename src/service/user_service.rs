use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;
use crate::{
    auth::AuthService,
    domain::*,
    error::{AppError, Result},
    repository::UserRepository,
};

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    auth_service: Arc<AuthService>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, auth_service: Arc<AuthService>) -> Self {
        Self { repo, auth_service }
    }

    /// Checks credentials and issues a bearer token. Unknown emails, wrong
    /// passwords and deactivated accounts are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let (user, password_hash) = self.repo
            .find_credentials(email.trim())
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !AuthService::verify_password(password, &password_hash).await? {
            tracing::debug!("Password mismatch for {}", user.email);
            return Err(AppError::Unauthorized);
        }

        if !user.is_active {
            tracing::debug!("Login attempt for deactivated account {}", user.email);
            return Err(AppError::Unauthorized);
        }

        let token = self.auth_service.issue_token(&user)?;
        tracing::info!("{} logged in", user.email);
        Ok((token, user))
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        request.validate()?;

        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let role = request.role.unwrap_or_default();
        let club = match role {
            UserRole::SuperAdmin => ALL_CLUBS.to_string(),
            UserRole::ClubAdmin => request
                .club
                .map(|club| club.trim().to_string())
                .filter(|club| !club.is_empty())
                .unwrap_or_else(|| ALL_CLUBS.to_string()),
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            role,
            club,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let password_hash = AuthService::hash_password(&request.password).await?;
        let created = self.repo.insert(user, &password_hash).await?;
        tracing::info!("Created {} account {}", created.role.as_str(), created.email);
        Ok(created)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.repo.find_all().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        self.repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update_user(&self, id: Uuid, request: UpdateUserRequest) -> Result<User> {
        let mut user = self.get_user(id).await?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(club) = request.club {
            user.club = club;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }

        self.repo.update_by_id(id, user).await
    }

    pub async fn delete_user(&self, actor: &User, id: Uuid) -> Result<()> {
        if actor.id == id {
            return Err(AppError::BadRequest("You cannot delete your own account".to_string()));
        }

        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    pub async fn set_password(&self, id: Uuid, password: &str) -> Result<()> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = AuthService::hash_password(password).await?;
        self.repo.update_password(id, &password_hash).await
    }
}
