use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A published community post, the ranked unit of content.
///
/// Instances are owned by the store; the application only ever holds
/// read-only snapshots of them. Counters and the two precomputed scores are
/// maintained server-side and default to zero for rows that predate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub post_type: PostType,
    pub category: String,
    pub media_url: Option<String>,
    pub link_url: Option<String>,
    pub visibility: Visibility,
    pub vote_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
    pub flag_count: i64,
    pub score_hot: f64,
    pub score_trending: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
}

impl Post {
    /// Soft-deleted posts stay in the store but are invisible to feeds.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields required to persist a new post. Produced by the create-post
/// use case after validation and trimming.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub post_type: PostType,
    pub category: String,
    pub media_url: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Debug, Error)]
#[error("unknown post type: {0}")]
pub struct UnknownPostType(pub String);

/// The kind of content a post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Question,
    Discussion,
    Resource,
    Announcement,
}

impl PostType {
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Question => "question",
            PostType::Discussion => "discussion",
            PostType::Resource => "resource",
            PostType::Announcement => "announcement",
        }
    }
}

impl FromStr for PostType {
    type Err = UnknownPostType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(PostType::Question),
            "discussion" => Ok(PostType::Discussion),
            "resource" => Ok(PostType::Resource),
            "announcement" => Ok(PostType::Announcement),
            other => Err(UnknownPostType(other.to_string())),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown visibility: {0}")]
pub struct UnknownVisibility(pub String);

/// Moderation-facing visibility state. Posts are created `active`;
/// soft deletion flips them to `removed`. There is no un-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Active,
    Removed,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Active => "active",
            Visibility::Removed => "removed",
        }
    }
}

impl FromStr for Visibility {
    type Err = UnknownVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Visibility::Active),
            "removed" => Ok(Visibility::Removed),
            other => Err(UnknownVisibility(other.to_string())),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of feed orderings. Every mode sorts descending on its own
/// column; the pagination cursor is always `created_at` (see [`FeedQuery`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    #[default]
    Hot,
    New,
    Top,
    Trending,
}

/// Ordering descriptor a storage adapter turns into its own sort clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub descending: bool,
}

impl FeedSort {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedSort::Hot => "hot",
            FeedSort::New => "new",
            FeedSort::Top => "top",
            FeedSort::Trending => "trending",
        }
    }

    pub fn order_by(self) -> OrderBy {
        let column = match self {
            FeedSort::Hot => "score_hot",
            FeedSort::New => "created_at",
            FeedSort::Top => "vote_count",
            FeedSort::Trending => "score_trending",
        };
        OrderBy {
            column,
            descending: true,
        }
    }
}

/// A request for one page of the feed.
///
/// `cursor` is the `created_at` of the last row of the previous page; a
/// cursored query returns only rows created strictly before it, for every
/// sort mode. Paginating a score or vote sort by a creation-time cursor can
/// skip or duplicate rows when scores move between requests; that artifact
/// is accepted for this feed rather than widening the cursor.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub category: Option<String>,
    pub cursor: Option<DateTime<Utc>>,
    pub limit: u32,
    pub sort: FeedSort,
    pub include_removed: bool,
}

impl FeedQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            category: None,
            cursor: None,
            limit,
            sort: FeedSort::default(),
            include_removed: false,
        }
    }
}

/// One page of feed results. `next_cursor` is `None` at the end of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub next_cursor: Option<DateTime<Utc>>,
}

/// Turns an over-fetched row set into a page.
///
/// Storage adapters request `limit + 1` rows; the extra row only proves more
/// data exists and is dropped here. The cursor is taken from the last row
/// actually returned.
pub fn assemble_page(mut rows: Vec<Post>, limit: usize) -> FeedPage {
    if rows.len() > limit {
        rows.truncate(limit);
        let next_cursor = rows.last().map(|post| post.created_at);
        FeedPage {
            posts: rows,
            next_cursor,
        }
    } else {
        FeedPage {
            posts: rows,
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_created_at(secs: i64) -> Post {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "A valid title here".to_string(),
            body: "A sufficiently long body of text".to_string(),
            post_type: PostType::Question,
            category: "guud".to_string(),
            media_url: None,
            link_url: None,
            visibility: Visibility::Active,
            vote_count: 0,
            comment_count: 0,
            view_count: 0,
            flag_count: 0,
            score_hot: 0.0,
            score_trending: 0.0,
            created_at: at,
            updated_at: at,
            deleted_at: None,
            created_by: Uuid::new_v4(),
            updated_by: None,
        }
    }

    #[test]
    fn assemble_page_trims_sentinel_row_and_sets_cursor() {
        let rows = vec![
            post_created_at(300),
            post_created_at(200),
            post_created_at(100),
        ];
        let page = assemble_page(rows, 2);

        assert_eq!(page.posts.len(), 2);
        assert_eq!(
            page.next_cursor,
            Some(Utc.timestamp_opt(200, 0).unwrap()),
            "cursor comes from the last returned row, not the sentinel"
        );
    }

    #[test]
    fn assemble_page_exact_limit_means_no_cursor() {
        let rows = vec![post_created_at(300), post_created_at(200)];
        let page = assemble_page(rows, 2);

        assert_eq!(page.posts.len(), 2);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn assemble_page_short_page_means_no_cursor() {
        let page = assemble_page(vec![post_created_at(300)], 5);
        assert_eq!(page.posts.len(), 1);
        assert!(page.next_cursor.is_none());

        let empty = assemble_page(Vec::new(), 5);
        assert!(empty.posts.is_empty());
        assert!(empty.next_cursor.is_none());
    }

    #[test]
    fn sort_modes_map_to_descending_columns() {
        assert_eq!(FeedSort::Hot.order_by().column, "score_hot");
        assert_eq!(FeedSort::New.order_by().column, "created_at");
        assert_eq!(FeedSort::Top.order_by().column, "vote_count");
        assert_eq!(FeedSort::Trending.order_by().column, "score_trending");
        assert!(FeedSort::Hot.order_by().descending);
        assert_eq!(FeedSort::default(), FeedSort::Hot);
    }

    #[test]
    fn post_type_round_trips_through_str() {
        for ty in [
            PostType::Question,
            PostType::Discussion,
            PostType::Resource,
            PostType::Announcement,
        ] {
            assert_eq!(ty.as_str().parse::<PostType>().unwrap(), ty);
        }
        assert!("poll".parse::<PostType>().is_err());
    }

    #[test]
    fn visibility_round_trips_through_str() {
        assert_eq!("active".parse::<Visibility>().unwrap(), Visibility::Active);
        assert_eq!(
            "removed".parse::<Visibility>().unwrap(),
            Visibility::Removed
        );
        assert!("shadowbanned".parse::<Visibility>().is_err());
    }
}
