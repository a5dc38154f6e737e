//! Cache-first loading of the portfolio payload.
//!
//! `PortfolioLoader` is the one place records are resolved: it reads the
//! cache, falls through to the content source on a miss, and normalizes
//! whatever it got into [`LoadedPortfolio`]. Remote failures never reach
//! the caller; they degrade to an empty payload, which in turn shows the
//! static fallback tables.

use tracing::{debug, info, warn};

use crate::api::ContentSource;
use crate::cache::ContentCache;
use crate::fallback;
use crate::models::{Announcement, BlogPost, PortfolioData, PostRecord, Project, ProjectRecord};

/// Where the payload behind a [`LoadedPortfolio`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Network,
    /// The fetch failed; nothing was cached.
    Unavailable,
}

/// Normalized content ready for the archives and detail views.
#[derive(Debug, Clone)]
pub struct LoadedPortfolio {
    pub projects: Vec<Project>,
    pub posts: Vec<BlogPost>,
    /// Only set when the backend's announcement is switched on.
    pub announcement: Option<Announcement>,
    pub origin: LoadOrigin,
}

impl LoadedPortfolio {
    /// Resolve a raw payload into normalized records, substituting the
    /// fallback tables for empty collections.
    pub fn from_data(data: PortfolioData, origin: LoadOrigin) -> Self {
        let projects: Vec<ProjectRecord> = if data.projects.is_empty() {
            fallback::projects().into_iter().map(ProjectRecord::Fallback).collect()
        } else {
            data.projects.into_iter().map(ProjectRecord::Remote).collect()
        };

        let posts: Vec<PostRecord> = if data.blog_posts.is_empty() {
            fallback::blog_posts().into_iter().map(PostRecord::Fallback).collect()
        } else {
            data.blog_posts.into_iter().map(PostRecord::Remote).collect()
        };

        Self {
            projects: projects.into_iter().map(Project::from).collect(),
            posts: posts.into_iter().map(BlogPost::from).collect(),
            announcement: data.announcement.filter(|a| a.is_active),
            origin,
        }
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }
}

pub struct PortfolioLoader<S: ContentSource> {
    cache: ContentCache,
    source: S,
}

impl<S: ContentSource> PortfolioLoader<S> {
    pub fn new(cache: ContentCache, source: S) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Serve from the cache when fresh, otherwise fetch and cache.
    pub async fn load(&self) -> LoadedPortfolio {
        if let Some(data) = self.cache.read() {
            debug!("Serving portfolio from cache");
            return LoadedPortfolio::from_data(data, LoadOrigin::Cache);
        }
        self.fetch_and_store().await
    }

    /// Drop the cached payload and fetch a new one.
    pub async fn refresh(&self) -> LoadedPortfolio {
        info!("Refreshing portfolio content");
        self.cache.invalidate();
        self.fetch_and_store().await
    }

    async fn fetch_and_store(&self) -> LoadedPortfolio {
        match self.source.fetch().await {
            Ok(data) => {
                self.cache.write(&data);
                LoadedPortfolio::from_data(data, LoadOrigin::Network)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch portfolio content");
                LoadedPortfolio::from_data(PortfolioData::default(), LoadOrigin::Unavailable)
            }
        }
    }
}
