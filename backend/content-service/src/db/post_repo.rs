use async_trait::async_trait;
use chrono::{DateTime, Utc};
use content_core::{
    assemble_page, FeedPage, FeedQuery, FeedSort, NewPost, Post, PostRepository, StoreError,
    StoreResult,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every post query. Counters, scores and visibility
/// may be NULL on rows that predate those columns; storage defaults are
/// substituted here so the mapped `Post` is always fully populated.
const POST_COLUMNS: &str = r#"
    id, owner_id, title, content, post_type, category, media_url, link_url,
    COALESCE(visibility, 'active') AS visibility,
    COALESCE(vote_count, 0) AS vote_count,
    COALESCE(comment_count, 0) AS comment_count,
    COALESCE(view_count, 0) AS view_count,
    COALESCE(flag_count, 0) AS flag_count,
    COALESCE(score_hot, 0) AS score_hot,
    COALESCE(score_trending, 0) AS score_trending,
    created_at, updated_at, deleted_at, created_by, updated_by
"#;

/// Storage row for `posts`. Application field names differ from column
/// names in two places (author_id/owner_id, body/content); the translation
/// lives entirely in this module.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    content: String,
    post_type: String,
    category: String,
    media_url: Option<String>,
    link_url: Option<String>,
    visibility: String,
    vote_count: i64,
    comment_count: i64,
    view_count: i64,
    flag_count: i64,
    score_hot: f64,
    score_trending: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    created_by: Uuid,
    updated_by: Option<Uuid>,
}

impl TryFrom<PostRow> for Post {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: row.id,
            author_id: row.owner_id,
            title: row.title,
            body: row.content,
            post_type: row
                .post_type
                .parse()
                .map_err(|e: content_core::models::UnknownPostType| {
                    StoreError::Database(e.to_string())
                })?,
            category: row.category,
            media_url: row.media_url,
            link_url: row.link_url,
            visibility: row.visibility.parse().map_err(
                |e: content_core::models::UnknownVisibility| StoreError::Database(e.to_string()),
            )?,
            vote_count: row.vote_count,
            comment_count: row.comment_count,
            view_count: row.view_count,
            flag_count: row.flag_count,
            score_hot: row.score_hot,
            score_trending: row.score_trending,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            created_by: row.created_by,
            updated_by: row.updated_by,
        })
    }
}

/// Builds the feed SELECT for one sort mode. The ORDER BY column comes from
/// the closed [`FeedSort`] enum, never from request input; the cursor
/// predicate is always on `created_at` regardless of sort mode (see
/// [`FeedQuery`] for the accepted skip/duplicate artifact this implies).
fn feed_sql(sort: FeedSort) -> String {
    let order = sort.order_by();
    let direction = if order.descending { "DESC" } else { "ASC" };
    let tie_break = if order.column == "created_at" {
        String::new()
    } else {
        format!(", created_at {}", direction)
    };

    format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::timestamptz IS NULL OR created_at < $2)
          AND ($3::bool OR deleted_at IS NULL)
        ORDER BY {column} {direction}{tie_break}
        LIMIT $4
        "#,
        column = order.column,
    )
}

/// Postgres implementation of [`PostRepository`].
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, post: NewPost) -> StoreResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (owner_id, title, content, post_type, category,
                               media_url, link_url, visibility, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $1)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.author_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.post_type.as_str())
        .bind(&post.category)
        .bind(post.media_url.as_deref())
        .bind(post.link_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::PostCreateFailed(e.to_string()))?;

        row.try_into()
            .map_err(|e: StoreError| StoreError::PostCreateFailed(e.to_string()))
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE id = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(Post::try_from).transpose()
    }

    async fn get_feed(&self, query: &FeedQuery) -> StoreResult<FeedPage> {
        let rows = sqlx::query_as::<_, PostRow>(&feed_sql(query.sort))
            .bind(query.category.as_deref())
            .bind(query.cursor)
            .bind(query.include_removed)
            .bind(i64::from(query.limit) + 1)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::FeedFetchFailed(e.to_string()))?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::FeedFetchFailed(e.to_string()))?;

        Ok(assemble_page(posts, query.limit as usize))
    }

    async fn increment_view(&self, post_id: Uuid) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE posts
            SET view_count = COALESCE(view_count, 0) + 1
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn soft_delete(&self, post_id: Uuid, actor: Uuid) -> StoreResult<()> {
        // Conditional update keeps this idempotent: the second delete
        // matches zero rows and succeeds without touching anything.
        sqlx::query(
            r#"
            UPDATE posts
            SET deleted_at = NOW(), visibility = 'removed',
                updated_by = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(post_id)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::PostDeleteFailed(e.to_string()))?;

        Ok(())
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE owner_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(Post::try_from).collect()
    }
}
