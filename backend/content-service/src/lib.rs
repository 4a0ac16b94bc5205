//! Content service for the Aqoon community platform.
//!
//! Owns posts and the ranked feed: persistence behind the `content-core`
//! repository trait, the HTTP surface, and observability.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers and their DTOs
//! - `db`: Postgres implementation of the post repository
//! - `middleware`: request identity extraction
//! - `error`: HTTP-facing error mapping
//! - `config`: configuration management
//! - `metrics`: Prometheus collectors and the `/metrics` endpoint

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

pub use config::Config;
pub use error::{AppError, Result};
