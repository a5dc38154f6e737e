//! Read-only client for the hosted content backend.
//!
//! This module provides the `ContentClient` for running GROQ queries
//! against the backend's HTTP query endpoint, and the `ContentSource`
//! trait the loader depends on so it can be driven by a fake in tests.

pub mod client;
pub mod error;

use anyhow::Result;
use futures::future::BoxFuture;

use crate::models::PortfolioData;

pub use client::ContentClient;
pub use error::ApiError;

/// Something that can produce the portfolio payload.
pub trait ContentSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<PortfolioData>>;
}
