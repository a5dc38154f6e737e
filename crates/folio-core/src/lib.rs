//! Core library for folio.
//!
//! This crate holds everything behind the portfolio front ends:
//!
//! - `models`: project, blog post and announcement records
//! - `api`: read-only client for the hosted content backend
//! - `cache`: local content cache with a 24 hour lifetime
//! - `loader`: cache-first loading of the portfolio payload
//! - `archive`: search, tag filtering and sorting for the archives
//! - `globe`: rotation controller and mount lifecycle of the 3D globe

pub mod api;
pub mod archive;
pub mod cache;
pub mod config;
pub mod fallback;
pub mod globe;
pub mod loader;
pub mod models;
pub mod utils;

pub use api::{ApiError, ContentClient, ContentSource};
pub use cache::{ContentCache, FileStorage, MemoryStorage, Storage, SystemClock};
pub use config::Config;
pub use loader::{LoadOrigin, LoadedPortfolio, PortfolioLoader};
pub use models::{Announcement, BlogPost, PortfolioData, Project};
