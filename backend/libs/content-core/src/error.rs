/// Error taxonomy shared by the domain library and storage adapters.
use thiserror::Error;

/// Failures raised by a [`crate::repository::PostRepository`] implementation.
///
/// Not-found is never an error here; lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create post: {0}")]
    PostCreateFailed(String),

    #[error("failed to fetch feed: {0}")]
    FeedFetchFailed(String),

    #[error("failed to delete post: {0}")]
    PostDeleteFailed(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Result type alias for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures from the create-post use case.
///
/// The three validation variants are detected locally before any I/O and are
/// checked in declaration order: title, then body, then the resource link.
#[derive(Debug, Error)]
pub enum CreatePostError {
    #[error("title must be at least {min} characters, got {len}")]
    TitleTooShort { len: usize, min: usize },

    #[error("body must be at least {min} characters, got {len}")]
    BodyTooShort { len: usize, min: usize },

    #[error("resource posts must include a link URL")]
    ResourceLinkRequired,

    #[error(transparent)]
    Store(#[from] StoreError),
}
