use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;
use crate::{
    domain::*,
    error::{AppError, Result},
    repository::NoticeRepository,
    service::club_service::ensure_can_manage,
};

/// Notices have no deadlines; they are listed while active, newest first.
pub struct NoticeService {
    repo: Arc<dyn NoticeRepository>,
}

impl NoticeService {
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_notice(&self, actor: &User, request: CreateNoticeRequest) -> Result<Notice> {
        request.validate()?;

        let club_name = request
            .club_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| actor.club.clone());
        ensure_can_manage(actor, &club_name)?;

        let now = Utc::now();
        let notice = Notice {
            id: Uuid::new_v4(),
            title: request.title,
            content: request.content,
            category: request.category,
            club_name,
            tags: clean_tags(request.tags),
            is_active: request.is_active.unwrap_or(true),
            status: request.status,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(notice).await
    }

    pub async fn update_notice(
        &self,
        actor: &User,
        id: Uuid,
        request: UpdateNoticeRequest,
    ) -> Result<Notice> {
        let mut notice = self.get_notice(id).await?;
        ensure_can_manage(actor, &notice.club_name)?;

        if let Some(title) = request.title {
            notice.title = title;
        }
        if let Some(content) = request.content {
            notice.content = content;
        }
        if let Some(category) = request.category {
            notice.category = category;
        }
        if let Some(tags) = request.tags {
            notice.tags = clean_tags(tags);
        }
        if let Some(is_active) = request.is_active {
            notice.is_active = is_active;
        }
        if let Some(status) = request.status {
            notice.status = status;
        }

        self.repo.update_by_id(id, notice).await
    }

    pub async fn delete_notice(&self, actor: &User, id: Uuid) -> Result<()> {
        let notice = self.get_notice(id).await?;
        ensure_can_manage(actor, &notice.club_name)?;

        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::NotFound("Notice not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_active(&self, mut filter: NoticeFilter) -> Result<Vec<Notice>> {
        filter.active_only = true;
        self.repo.find(&filter).await
    }

    pub async fn get_notice(&self, id: Uuid) -> Result<Notice> {
        self.repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Notice not found".to_string()))
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_tags() {
        let tags = vec![" hiring ".to_string(), "".to_string(), "web".to_string()];
        assert_eq!(clean_tags(tags), vec!["hiring", "web"]);
    }
}
