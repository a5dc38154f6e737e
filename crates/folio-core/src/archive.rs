//! Search, tag filtering and sorting for the project and blog archives.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::models::{BlogPost, Project};
use crate::utils::contains_ignore_case;

/// Sort order of the blog archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostSort {
    /// Newest first; undated posts go last.
    #[default]
    Date,
    /// Most viewed first; posts without a view count rank as zero.
    Views,
}

impl FromStr for PostSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(PostSort::Date),
            "views" => Ok(PostSort::Views),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// The archive controls: free-text search plus an optional tag.
#[derive(Debug, Clone, Default)]
pub struct ArchiveQuery {
    pub search: String,
    pub tag: Option<String>,
}

impl ArchiveQuery {
    pub fn new(search: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            search: search.into(),
            tag,
        }
    }

    pub fn matches(&self, title: &str, description: &str, tags: &[String]) -> bool {
        let matches_search = contains_ignore_case(title, &self.search)
            || contains_ignore_case(description, &self.search);
        let matches_tag = self
            .tag
            .as_ref()
            .map_or(true, |tag| tags.iter().any(|t| t == tag));
        matches_search && matches_tag
    }
}

/// Sorted, de-duplicated list of every tag in use.
pub fn all_tags<'a>(tag_lists: impl IntoIterator<Item = &'a [String]>) -> Vec<String> {
    tag_lists
        .into_iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn project_tags(projects: &[Project]) -> Vec<String> {
    all_tags(projects.iter().map(|p| p.tags.as_slice()))
}

pub fn post_tags(posts: &[BlogPost]) -> Vec<String> {
    all_tags(posts.iter().map(|p| p.tags.as_slice()))
}

/// Projects matching `query`, in their original order.
pub fn filter_projects<'a>(projects: &'a [Project], query: &ArchiveQuery) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| query.matches(&p.title, &p.description, &p.tags))
        .collect()
}

/// Posts matching `query`, sorted by `sort`.
pub fn filter_posts<'a>(
    posts: &'a [BlogPost],
    query: &ArchiveQuery,
    sort: PostSort,
) -> Vec<&'a BlogPost> {
    let mut matching: Vec<&BlogPost> = posts
        .iter()
        .filter(|p| query.matches(&p.title, &p.description, &p.tags))
        .collect();

    match sort {
        PostSort::Views => matching.sort_by(|a, b| b.views.unwrap_or(0).cmp(&a.views.unwrap_or(0))),
        // None < Some, so reversing puts dated posts first, newest on top
        PostSort::Date => matching.sort_by(|a, b| b.published_on().cmp(&a.published_on())),
    }
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;
    use crate::models::{PostRecord, ProjectRecord};

    fn projects() -> Vec<Project> {
        fallback::projects()
            .into_iter()
            .map(|p| Project::from(ProjectRecord::Fallback(p)))
            .collect()
    }

    fn posts() -> Vec<BlogPost> {
        fallback::blog_posts()
            .into_iter()
            .map(|p| BlogPost::from(PostRecord::Fallback(p)))
            .collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let projects = projects();
        assert_eq!(filter_projects(&projects, &ArchiveQuery::default()).len(), projects.len());
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let projects = projects();
        let by_title = filter_projects(&projects, &ArchiveQuery::new("CHATBOT", None));
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].slug, "ai-chatbot-application");

        let by_description = filter_projects(&projects, &ArchiveQuery::new("sanity.io", None));
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].slug, "portfolio-website");
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let projects = projects();
        let query = ArchiveQuery::new("", Some("Sanity".to_string()));
        assert_eq!(filter_projects(&projects, &query).len(), 1);

        let query = ArchiveQuery::new("", Some("sanity".to_string()));
        assert!(filter_projects(&projects, &query).is_empty());
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        let tags = project_tags(&projects());
        assert_eq!(
            tags,
            vec!["Next.js", "OpenAI", "Sanity", "Tailwind CSS", "TypeScript"]
        );
    }

    #[test]
    fn test_posts_sorted_by_date_and_views() {
        let mut posts = posts();
        posts[1].views = Some(5000);

        let by_date = filter_posts(&posts, &ArchiveQuery::default(), PostSort::Date);
        assert_eq!(by_date[0].slug, "getting-started-nextjs-15");

        let by_views = filter_posts(&posts, &ArchiveQuery::default(), PostSort::Views);
        assert_eq!(by_views[0].slug, "building-ai-applications-openai");
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let mut posts = posts();
        posts[0].published = "someday".to_string();
        let by_date = filter_posts(&posts, &ArchiveQuery::default(), PostSort::Date);
        assert_eq!(by_date[1].published, "someday");
    }

    #[test]
    fn test_post_sort_from_str() {
        assert_eq!("Views".parse::<PostSort>(), Ok(PostSort::Views));
        assert!("popularity".parse::<PostSort>().is_err());
    }
}
