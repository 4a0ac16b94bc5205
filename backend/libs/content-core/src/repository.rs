use crate::error::StoreResult;
use crate::models::{FeedPage, FeedQuery, NewPost, Post};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence boundary for posts.
///
/// Everything the application knows about the store goes through this trait;
/// callers hold it as `Arc<dyn PostRepository>` so the backend can be swapped
/// (Postgres in production, in-memory in tests). There is no hard delete and
/// no un-delete anywhere on this surface.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post with `visibility = active` and return the stored
    /// row, including the generated id and timestamps.
    async fn create(&self, post: NewPost) -> StoreResult<Post>;

    /// Fetch a post by id. Missing and soft-deleted posts both come back as
    /// `None`.
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Post>>;

    /// Fetch one page of the feed. Sorting, filtering, cursor bounds and the
    /// `limit + 1` over-fetch contract are described on [`FeedQuery`].
    async fn get_feed(&self, query: &FeedQuery) -> StoreResult<FeedPage>;

    /// Atomically bump the view counter. Callers on a rendering path treat
    /// failures as non-blocking.
    async fn increment_view(&self, post_id: Uuid) -> StoreResult<()>;

    /// Soft-delete: set `deleted_at`, flip visibility to `removed`, record
    /// the acting user. Deleting an already-deleted post is a no-op.
    async fn soft_delete(&self, post_id: Uuid, actor: Uuid) -> StoreResult<()>;

    /// Newest-first page of a user's non-deleted posts, for profile views.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Post>>;
}
