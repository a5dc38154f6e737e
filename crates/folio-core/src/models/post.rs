use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{null_as_default, ImageRef, Slug};
use crate::utils::parse_date;

/// Blog post as returned by the portfolio projection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RemoteBlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub views: Option<u64>,
    pub cover_image: Option<ImageRef>,
}

/// Blog post from the static fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackBlogPost {
    pub title: String,
    pub description: String,
    pub date: String,
    pub views: Option<u64>,
    pub tags: Vec<String>,
    pub slug: String,
}

/// A blog post from either source, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum PostRecord {
    Remote(RemoteBlogPost),
    Fallback(FallbackBlogPost),
}

/// Normalized blog post used by the archive and the front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BlogPost {
    pub id: Option<String>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub published: String,
    pub tags: Vec<String>,
    pub views: Option<u64>,
    pub cover_image: Option<String>,
    pub is_fallback: bool,
}

impl From<PostRecord> for BlogPost {
    fn from(record: PostRecord) -> Self {
        match record {
            PostRecord::Remote(p) => BlogPost {
                id: Some(p.id),
                slug: p.slug.current,
                title: p.title,
                description: p.description,
                // Drafts published without a date sort by creation time
                published: p.published_at.unwrap_or(p.created_at),
                tags: p.tags,
                views: p.views,
                cover_image: p.cover_image.map(|i| i.asset.reference),
                is_fallback: false,
            },
            PostRecord::Fallback(p) => BlogPost {
                id: None,
                slug: p.slug,
                title: p.title,
                description: p.description,
                published: p.date,
                tags: p.tags,
                views: p.views,
                cover_image: None,
                is_fallback: true,
            },
        }
    }
}

impl BlogPost {
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.published)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Author {
    pub name: String,
    pub image: Option<ImageRef>,
}

/// Full post document for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub cover_image: Option<ImageRef>,
    #[cfg_attr(feature = "ts", ts(type = "unknown"))]
    pub body: Option<serde_json::Value>,
    pub author: Option<Author>,
}
