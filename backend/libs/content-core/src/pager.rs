//! Client-side incremental feed loading.
//!
//! [`FeedPager`] drives repeated [`PostRepository::get_feed`] calls for one
//! view, accumulating pages and exposing loading/error/exhaustion state. One
//! fetch may be in flight at a time; extra triggers are dropped, not queued.
//! A generation counter guards against applying results that arrive after a
//! `refresh` superseded them.

use crate::error::StoreResult;
use crate::models::{FeedPage, FeedQuery, FeedSort, Post};
use crate::repository::PostRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Where the pager is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    /// Nothing loaded yet.
    Idle,
    /// First page in flight.
    LoadingInitial,
    /// At least one page loaded, more may be available.
    Ready,
    /// A follow-up page in flight.
    LoadingMore,
    /// A fetch failed; automatic pagination is halted until `refresh`.
    Failed,
    /// The feed reported no further pages.
    Exhausted,
}

/// What a single trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and applied.
    Loaded,
    /// The trigger was dropped (already loading, exhausted, failed, or the
    /// result arrived for a superseded generation).
    Skipped,
    /// The fetch ran and failed; the error is recorded on the pager.
    Failed,
}

#[derive(Debug, Clone)]
pub struct PagerOptions {
    pub page_size: u32,
    pub sort: FeedSort,
    pub category: Option<String>,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            sort: FeedSort::default(),
            category: None,
        }
    }
}

/// Read-only view of the pager state for rendering.
#[derive(Debug, Clone)]
pub struct PagerSnapshot {
    pub phase: PagerPhase,
    pub posts: Vec<Post>,
    pub has_more: bool,
    pub last_error: Option<String>,
}

struct PagerState {
    phase: PagerPhase,
    posts: Vec<Post>,
    cursor: Option<DateTime<Utc>>,
    has_more: bool,
    in_flight: bool,
    generation: u64,
    last_error: Option<String>,
}

impl PagerState {
    fn new() -> Self {
        Self {
            phase: PagerPhase::Idle,
            posts: Vec::new(),
            cursor: None,
            has_more: true,
            in_flight: false,
            generation: 0,
            last_error: None,
        }
    }
}

pub struct FeedPager {
    repo: Arc<dyn PostRepository>,
    options: PagerOptions,
    state: Mutex<PagerState>,
}

impl FeedPager {
    pub fn new(repo: Arc<dyn PostRepository>, options: PagerOptions) -> Self {
        Self {
            repo,
            options,
            state: Mutex::new(PagerState::new()),
        }
    }

    fn query(&self, cursor: Option<DateTime<Utc>>) -> FeedQuery {
        FeedQuery {
            category: self.options.category.clone(),
            cursor,
            limit: self.options.page_size,
            sort: self.options.sort,
            include_removed: false,
        }
    }

    /// Load the first page. Only valid from `Idle` (view mount); re-loading
    /// an already-populated pager goes through [`FeedPager::refresh`].
    pub async fn load_initial(&self) -> LoadOutcome {
        let generation = {
            let mut state = self.state.lock().await;
            if state.in_flight || state.phase != PagerPhase::Idle {
                return LoadOutcome::Skipped;
            }
            state.in_flight = true;
            state.phase = PagerPhase::LoadingInitial;
            state.generation
        };

        let result = self.repo.get_feed(&self.query(None)).await;
        self.apply(generation, true, result).await
    }

    /// Load the next page and append it. Dropped while a fetch is in flight,
    /// before the initial load, after a failure, or once exhausted, so the
    /// viewport-visibility trigger may call this as often as it likes.
    pub async fn load_more(&self) -> LoadOutcome {
        let (generation, cursor) = {
            let mut state = self.state.lock().await;
            if state.in_flight || !state.has_more || state.phase != PagerPhase::Ready {
                return LoadOutcome::Skipped;
            }
            state.in_flight = true;
            state.phase = PagerPhase::LoadingMore;
            (state.generation, state.cursor)
        };

        let result = self.repo.get_feed(&self.query(cursor)).await;
        self.apply(generation, false, result).await
    }

    /// Throw away accumulated state and reload from the top. Unlike
    /// `load_more`, this proceeds even while a fetch is in flight: the
    /// generation bump makes the superseded result a no-op when it lands.
    pub async fn refresh(&self) -> LoadOutcome {
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.in_flight = true;
            state.posts.clear();
            state.cursor = None;
            state.has_more = true;
            state.last_error = None;
            state.phase = PagerPhase::LoadingInitial;
            state.generation
        };

        let result = self.repo.get_feed(&self.query(None)).await;
        self.apply(generation, true, result).await
    }

    async fn apply(
        &self,
        generation: u64,
        replace: bool,
        result: StoreResult<FeedPage>,
    ) -> LoadOutcome {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            // Superseded by a refresh; the newer fetch owns in_flight.
            return LoadOutcome::Skipped;
        }
        state.in_flight = false;

        match result {
            Ok(page) => {
                let full_page = page.posts.len() == self.options.page_size as usize;
                state.has_more = page.next_cursor.is_some() && full_page;
                state.cursor = page.next_cursor;
                if replace {
                    state.posts = page.posts;
                } else {
                    state.posts.extend(page.posts);
                }
                state.phase = if state.has_more {
                    PagerPhase::Ready
                } else {
                    PagerPhase::Exhausted
                };
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::debug!("feed page fetch failed: {}", err);
                state.last_error = Some(err.to_string());
                state.has_more = false;
                state.phase = PagerPhase::Failed;
                LoadOutcome::Failed
            }
        }
    }

    pub async fn phase(&self) -> PagerPhase {
        self.state.lock().await.phase
    }

    pub async fn has_more(&self) -> bool {
        self.state.lock().await.has_more
    }

    pub async fn snapshot(&self) -> PagerSnapshot {
        let state = self.state.lock().await;
        PagerSnapshot {
            phase: state.phase,
            posts: state.posts.clone(),
            has_more: state.has_more,
            last_error: state.last_error.clone(),
        }
    }
}
