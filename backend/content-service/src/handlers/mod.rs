/// HTTP handlers for content endpoints.
///
/// - Posts: create, fetch, soft-delete, list by author
/// - Feed: cursor-paginated ranked feed
///
/// Votes, comments and follows are owned by other services; this one only
/// reads their denormalized counters off the post row.
pub mod feed;
pub mod posts;

pub use feed::get_feed;
pub use posts::{create_post, delete_post, get_post, get_user_posts};
