//! Shared fixtures for service-level tests: an in-memory repository that
//! honors the full repository contract, so handlers can be exercised through
//! `actix_web::test` without a database.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use content_core::{
    assemble_page, FeedPage, FeedQuery, FeedSort, NewPost, Post, PostRepository, PostType,
    StoreError, StoreResult, Visibility,
};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    fail_feed: AtomicBool,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail_feed: AtomicBool::new(false),
        }
    }

    /// Seed a fully-formed post, bypassing validation.
    pub fn insert(&self, post: Post) {
        self.posts.lock().unwrap().push(post);
    }

    /// Make every subsequent `get_feed` fail, for error-path tests.
    pub fn break_feed(&self) {
        self.fail_feed.store(true, AtomicOrdering::SeqCst);
    }

    fn sort_key(post: &Post, sort: FeedSort) -> f64 {
        match sort {
            FeedSort::Hot => post.score_hot,
            FeedSort::New => post.created_at.timestamp_millis() as f64,
            FeedSort::Top => post.vote_count as f64,
            FeedSort::Trending => post.score_trending,
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> StoreResult<Post> {
        let now = Utc::now();
        let stored = Post {
            id: Uuid::new_v4(),
            author_id: post.author_id,
            title: post.title,
            body: post.body,
            post_type: post.post_type,
            category: post.category,
            media_url: post.media_url,
            link_url: post.link_url,
            visibility: Visibility::Active,
            vote_count: 0,
            comment_count: 0,
            view_count: 0,
            flag_count: 0,
            score_hot: 0.0,
            score_trending: 0.0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: post.author_id,
            updated_by: None,
        };
        self.posts.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .find(|p| p.id == id && p.deleted_at.is_none())
            .cloned())
    }

    async fn get_feed(&self, query: &FeedQuery) -> StoreResult<FeedPage> {
        if self.fail_feed.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::FeedFetchFailed("store offline".to_string()));
        }

        let posts = self.posts.lock().unwrap();
        let mut rows: Vec<Post> = posts
            .iter()
            .filter(|p| query.include_removed || p.deleted_at.is_none())
            .filter(|p| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |category| p.category == category)
            })
            .filter(|p| query.cursor.map_or(true, |cursor| p.created_at < cursor))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let key_a = Self::sort_key(a, query.sort);
            let key_b = Self::sort_key(b, query.sort);
            key_b
                .partial_cmp(&key_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        rows.truncate(query.limit as usize + 1);

        Ok(assemble_page(rows, query.limit as usize))
    }

    async fn increment_view(&self, post_id: Uuid) -> StoreResult<()> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
            post.view_count += 1;
        }
        Ok(())
    }

    async fn soft_delete(&self, post_id: Uuid, actor: Uuid) -> StoreResult<()> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(post) = posts
            .iter_mut()
            .find(|p| p.id == post_id && p.deleted_at.is_none())
        {
            post.deleted_at = Some(Utc::now());
            post.visibility = Visibility::Removed;
            post.updated_by = Some(actor);
            post.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        let mut rows: Vec<Post> = posts
            .iter()
            .filter(|p| p.author_id == author_id && p.deleted_at.is_none())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

/// A seeded post, `n` seconds after a fixed epoch so creation order is
/// deterministic. Tests override the fields they care about.
pub fn make_post(n: i64) -> Post {
    let at = Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap();
    Post {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: format!("Seeded post number {}", n),
        body: "A sufficiently long body used by the fixtures".to_string(),
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
