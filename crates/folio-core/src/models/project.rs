use serde::{Deserialize, Serialize};

use super::{null_as_default, ImageRef, Slug};
use crate::utils::slugify;

/// Project as returned by the portfolio projection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RemoteProject {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub github_url: Option<String>,
    pub image: Option<ImageRef>,
    pub featured: Option<bool>,
}

/// Project from the static fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackProject {
    pub title: String,
    pub description: String,
    pub date: String,
    pub stars: Option<u32>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub link: Option<String>,
}

/// A project from either source, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectRecord {
    Remote(RemoteProject),
    Fallback(FallbackProject),
}

/// Normalized project used by the archive and the front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Project {
    pub id: Option<String>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub github_url: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub stars: Option<u32>,
    pub is_fallback: bool,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        match record {
            ProjectRecord::Remote(p) => Project {
                slug: slugify(&p.title),
                id: Some(p.id),
                title: p.title,
                description: p.description,
                date: p.date,
                tags: p.tags,
                link: p.link,
                github_url: p.github_url,
                image: p.image.map(|i| i.asset.reference),
                featured: p.featured.unwrap_or(false),
                stars: None,
                is_fallback: false,
            },
            ProjectRecord::Fallback(p) => Project {
                slug: slugify(&p.title),
                id: None,
                title: p.title,
                description: p.description,
                date: p.date,
                tags: p.tags.unwrap_or_default(),
                link: p.link,
                github_url: None,
                image: p.image,
                featured: false,
                stars: p.stars,
                is_fallback: true,
            },
        }
    }
}

impl Project {
    /// Tags shown on an archive card; the card only has room for three.
    pub fn card_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(3)]
    }
}

/// Full project document for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    pub link: Option<String>,
    pub github_url: Option<String>,
    pub cover_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gallery: Vec<ImageRef>,
    #[cfg_attr(feature = "ts", ts(type = "unknown"))]
    pub body: Option<serde_json::Value>,
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_project_normalizes() {
        let remote = RemoteProject {
            id: "p1".to_string(),
            created_at: "2024-11-02T10:00:00Z".to_string(),
            title: "AI Chatbot Application".to_string(),
            description: "Chat".to_string(),
            date: "Nov 2024".to_string(),
            tags: vec!["Next.js".to_string()],
            link: None,
            github_url: Some("https://github.com/example/chatbot".to_string()),
            image: Some(ImageRef {
                asset: super::super::AssetRef {
                    reference: "image-abc".to_string(),
                    kind: None,
                },
            }),
            featured: None,
        };

        let project = Project::from(ProjectRecord::Remote(remote));
        assert_eq!(project.slug, "ai-chatbot-application");
        assert_eq!(project.id.as_deref(), Some("p1"));
        assert_eq!(project.image.as_deref(), Some("image-abc"));
        assert!(!project.featured);
        assert!(!project.is_fallback);
    }

    #[test]
    fn test_fallback_project_normalizes() {
        let fallback = FallbackProject {
            title: "Portfolio Website".to_string(),
            description: "Site".to_string(),
            date: "Oct 2024".to_string(),
            stars: Some(4),
            image: Some("/projects/portfolio.png".to_string()),
            tags: None,
            link: None,
        };

        let project = Project::from(ProjectRecord::Fallback(fallback));
        assert_eq!(project.slug, "portfolio-website");
        assert!(project.tags.is_empty());
        assert_eq!(project.stars, Some(4));
        assert!(project.is_fallback);
    }

    #[test]
    fn test_card_tags_caps_at_three() {
        let mut project = Project::from(ProjectRecord::Fallback(FallbackProject {
            title: "X".to_string(),
            description: String::new(),
            date: String::new(),
            stars: None,
            image: None,
            tags: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
            link: None,
        }));
        assert_eq!(project.card_tags().len(), 3);
        project.tags.truncate(1);
        assert_eq!(project.card_tags(), &["a".to_string()]);
    }
}
