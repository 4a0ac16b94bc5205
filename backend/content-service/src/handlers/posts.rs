/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use content_core::{CreatePost, NewPost, PostRepository, PostType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub category: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// Create a new post
pub async fn create_post(
    repo: web::Data<Arc<dyn PostRepository>>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let usecase = CreatePost::new(repo.get_ref().clone());

    let post = usecase
        .execute(NewPost {
            author_id: user_id.0,
            title: req.title,
            body: req.body,
            post_type: req.post_type,
            category: req.category,
            media_url: req.media_url,
            link_url: req.link_url,
        })
        .await?;

    tracing::info!(post_id = %post.id, user_id = %user_id.0, "post created");

    Ok(HttpResponse::Created().json(CreatePostResponse {
        id: post.id,
        created_at: post.created_at,
    }))
}

/// Get a post by ID. Bumps the view counter as a side effect; a failed bump
/// never blocks the response.
pub async fn get_post(
    repo: web::Data<Arc<dyn PostRepository>>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match repo.get_by_id(*post_id).await? {
        Some(post) => {
            if let Err(err) = repo.increment_view(*post_id).await {
                tracing::debug!(%post_id, "view count bump failed: {}", err);
            }
            Ok(HttpResponse::Ok().json(post))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Soft delete a post
pub async fn delete_post(
    repo: web::Data<Arc<dyn PostRepository>>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    repo.soft_delete(*post_id, user_id.0).await?;
    tracing::info!(post_id = %*post_id, user_id = %user_id.0, "post removed");

    Ok(HttpResponse::NoContent().finish())
}

/// Get posts for a user, newest first
pub async fn get_user_posts(
    repo: web::Data<Arc<dyn PostRepository>>,
    user_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let posts = repo.list_by_author(*user_id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(posts))
}
