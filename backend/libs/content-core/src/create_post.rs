/// Create-post use case: local validation, then delegation to the repository.
use crate::error::CreatePostError;
use crate::models::{NewPost, Post, PostType};
use crate::repository::PostRepository;
use std::sync::Arc;

pub const MIN_TITLE_LEN: usize = 8;
pub const MIN_BODY_LEN: usize = 20;

pub struct CreatePost {
    repo: Arc<dyn PostRepository>,
}

impl CreatePost {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post.
    ///
    /// Validation is synchronous and runs strictly in order (title, then
    /// body, then the resource link), so the first broken rule is reported. A
    /// validation failure never reaches the repository. On success the
    /// trimmed values are what get stored.
    pub async fn execute(&self, post: NewPost) -> Result<Post, CreatePostError> {
        let title = post.title.trim().to_string();
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(CreatePostError::TitleTooShort {
                len: title.chars().count(),
                min: MIN_TITLE_LEN,
            });
        }

        let body = post.body.trim().to_string();
        if body.chars().count() < MIN_BODY_LEN {
            return Err(CreatePostError::BodyTooShort {
                len: body.chars().count(),
                min: MIN_BODY_LEN,
            });
        }

        let link_url = post
            .link_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        if post.post_type == PostType::Resource && link_url.is_none() {
            return Err(CreatePostError::ResourceLinkRequired);
        }

        let sanitized = NewPost {
            title,
            body,
            link_url,
            ..post
        };

        let created = self.repo.create(sanitized).await?;
        Ok(created)
    }
}
