use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::FeedConfig;
use crate::error::{AppError, Result};
use crate::metrics::feed::{FEED_PAGE_SIZE, FEED_REQUEST_DURATION_SECONDS, FEED_REQUEST_TOTAL};
use content_core::{FeedQuery, FeedSort, Post, PostRepository};

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    #[serde(default)]
    pub sort: FeedSort,
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl FeedQueryParams {
    /// Decode the opaque cursor back into the creation-timestamp boundary.
    /// The wire format is base64 over RFC 3339; clients never see or
    /// construct the inner value.
    pub(crate) fn decode_cursor(&self) -> Result<Option<DateTime<Utc>>> {
        match &self.cursor {
            Some(cursor) => {
                let decoded = general_purpose::URL_SAFE_NO_PAD
                    .decode(cursor)
                    .map_err(|_| AppError::BadRequest("Invalid cursor format".to_string()))?;

                let raw = String::from_utf8(decoded)
                    .map_err(|_| AppError::BadRequest("Invalid cursor encoding".to_string()))?;

                let boundary = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|_| AppError::BadRequest("Invalid cursor value".to_string()))?;

                Ok(Some(boundary.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn encode_cursor(boundary: DateTime<Utc>) -> String {
        general_purpose::URL_SAFE_NO_PAD.encode(boundary.to_rfc3339())
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

pub async fn get_feed(
    repo: web::Data<Arc<dyn PostRepository>>,
    feed_config: web::Data<FeedConfig>,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let cursor = query.decode_cursor()?;
    let limit = query
        .limit
        .unwrap_or(feed_config.default_page_size)
        .clamp(1, feed_config.max_page_size);

    debug!(
        "Feed request: sort={} category={:?} limit={} cursored={}",
        query.sort.as_str(),
        query.category,
        limit,
        cursor.is_some()
    );

    let start = Instant::now();
    let page = repo
        .get_feed(&FeedQuery {
            category: query.category.clone(),
            cursor,
            limit,
            sort: query.sort,
            include_removed: false,
        })
        .await?;

    let sort_label = query.sort.as_str();
    FEED_REQUEST_DURATION_SECONDS
        .with_label_values(&[sort_label])
        .observe(start.elapsed().as_secs_f64());
    FEED_REQUEST_TOTAL.with_label_values(&[sort_label]).inc();
    FEED_PAGE_SIZE
        .with_label_values(&[sort_label])
        .observe(page.posts.len() as f64);

    let cursor = page.next_cursor.map(FeedQueryParams::encode_cursor);

    Ok(HttpResponse::Ok().json(FeedResponse {
        has_more: cursor.is_some(),
        posts: page.posts,
        cursor,
    }))
}
