//! Core domain library for the Aqoon content platform.
//!
//! Holds everything about posts and the ranked feed that does not depend on a
//! concrete storage backend or HTTP framework:
//!
//! - `models`: Post, the closed sort/type/visibility enums, and the feed
//!   query/page contract
//! - `ranking`: the hot-score formula
//! - `repository`: the `PostRepository` trait implemented by storage adapters
//! - `create_post`: validation and creation of new posts
//! - `pager`: client-side incremental feed loading (infinite scroll)
//! - `scroll`: per-view scroll offset cache
//! - `error`: the shared error taxonomy

pub mod create_post;
pub mod error;
pub mod models;
pub mod pager;
pub mod ranking;
pub mod repository;
pub mod scroll;

pub use create_post::{CreatePost, MIN_BODY_LEN, MIN_TITLE_LEN};
pub use error::{CreatePostError, StoreError, StoreResult};
pub use models::{
    assemble_page, FeedPage, FeedQuery, FeedSort, NewPost, OrderBy, Post, PostType, Visibility,
};
pub use pager::{FeedPager, LoadOutcome, PagerOptions, PagerPhase, PagerSnapshot};
pub use ranking::hot_score;
pub use repository::PostRepository;
pub use scroll::ScrollOffsetCache;
