//! Data models for portfolio content.
//!
//! Records come from two places: the hosted content backend (`Remote*`
//! types, shaped like the backend's JSON projections) and the static
//! fallback tables (`Fallback*` types). Both are wrapped in a tagged
//! record and normalized once into [`Project`] / [`BlogPost`], so the
//! rest of the crate only sees one shape.
//!
//! - `Project`, `ProjectRecord`, `ProjectDetail`: portfolio projects
//! - `BlogPost`, `PostRecord`, `PostDetail`: blog posts
//! - `Announcement`: the optional site-wide announcement bar
//! - `Experience`, `Education`: the about page's static history
//! - `PortfolioData`: the cached bundle of all three

pub mod about;
pub mod announcement;
pub mod post;
pub mod project;

use serde::{Deserialize, Deserializer, Serialize};

pub use about::{Education, Experience};
pub use announcement::{Announcement, AnnouncementVariant};
pub use post::{Author, BlogPost, FallbackBlogPost, PostDetail, PostRecord, RemoteBlogPost};
pub use project::{FallbackProject, Project, ProjectDetail, ProjectRecord, RemoteProject};

/// Reference to an image asset stored in the content backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ImageRef {
    pub asset: AssetRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(rename = "_type", default)]
    pub kind: Option<String>,
}

/// Projections return `null` for attributes a document never set; read
/// those the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Slug object as stored by the backend (`{ "current": "my-post" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Slug {
    pub current: String,
}

/// The content bundle fetched in one query and stored in the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<RemoteProject>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blog_posts: Vec<RemoteBlogPost>,
    #[serde(default)]
    pub announcement: Option<Announcement>,
}

impl PortfolioData {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.blog_posts.is_empty() && self.announcement.is_none()
    }
}
