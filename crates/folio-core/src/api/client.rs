//! API client for the content backend's GROQ query endpoint.
//!
//! Every read goes through [`ContentClient::query`], which sends the query
//! (and its `$` parameters) as URL parameters and unwraps the `result`
//! field of the response.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use super::{ApiError, ContentSource};
use crate::config::Config;
use crate::models::{PortfolioData, PostDetail, ProjectDetail};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Projects newest first, posts by publish date, and the first announcement.
pub const PORTFOLIO_QUERY: &str = r#"{
  "projects": *[_type == "project"] | order(_createdAt desc) {
    _id,
    _createdAt,
    title,
    description,
    date,
    tags,
    link,
    githubUrl,
    image,
    featured
  },
  "blogPosts": *[_type == "post"] | order(publishedAt desc) {
    _id,
    _createdAt,
    title,
    slug,
    description,
    publishedAt,
    tags,
    coverImage
  },
  "announcement": *[_type == "announcement"][0] {
    _id,
    isActive,
    text,
    link,
    linkText,
    variant
  }
}"#;

pub const PROJECT_QUERY: &str = r#"*[_type == "project" && slug.current == $slug][0]{
  _id,
  title,
  slug,
  description,
  overview,
  date,
  tags,
  technologies,
  features,
  link,
  githubUrl,
  coverImage,
  gallery,
  body,
  featured
}"#;

pub const POST_QUERY: &str = r#"*[_type == "post" && slug.current == $slug][0]{
  _id,
  title,
  slug,
  description,
  publishedAt,
  tags,
  coverImage,
  body,
  author->{
    name,
    image
  }
}"#;

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// API client for the content backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    query_url: String,
    token: Option<String>,
}

impl ContentClient {
    /// Create a client for the project and dataset named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::NotConfigured("no project id set".to_string()))?;

        let query_url = Self::build_query_url(
            project_id,
            &config.dataset,
            &config.api_version,
            config.use_cdn,
        );
        Self::with_query_url(query_url, config.token.clone())
    }

    /// Create a client against an explicit query endpoint.
    pub fn with_query_url(query_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::NetworkError)?;

        Ok(Self {
            client,
            query_url: query_url.into(),
            token,
        })
    }

    fn build_query_url(
        project_id: &str,
        dataset: &str,
        api_version: &str,
        use_cdn: bool,
    ) -> String {
        // Authenticated reads bypass the CDN on the backend side anyway
        let host = if use_cdn { "apicdn" } else { "api" };
        let version = api_version.trim_start_matches('v');
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            project_id, host, version, dataset
        )
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Run a GROQ query. `params` are bound as `$name` and JSON-encoded.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut url_params = vec![("query".to_string(), query.to_string())];
        for (name, value) in params {
            url_params.push((format!("${}", name), serde_json::to_string(value)?));
        }

        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let mut request = self.client.get(&self.query_url).query(&url_params);
            if let Some(ref token) = self.token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .map_err(ApiError::NetworkError)
                .with_context(|| format!("Failed to send query to {}", self.query_url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let parsed: QueryResponse<T> = response
                        .json()
                        .await
                        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
                    return Ok(parsed.result);
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }

    // ===== Data Fetching Methods =====

    /// Fetch projects, blog posts and the announcement in one round trip
    pub async fn fetch_portfolio(&self) -> Result<PortfolioData> {
        let data: PortfolioData = self
            .query(PORTFOLIO_QUERY, &[])
            .await
            .context("Failed to fetch portfolio content")?;
        debug!(
            projects = data.projects.len(),
            posts = data.blog_posts.len(),
            announcement = data.announcement.is_some(),
            "Fetched portfolio content"
        );
        Ok(data)
    }

    /// Fetch one project for its detail page; `None` when no project has the slug
    pub async fn fetch_project(&self, slug: &str) -> Result<Option<ProjectDetail>> {
        self.query(PROJECT_QUERY, &[("slug", slug)])
            .await
            .with_context(|| format!("Failed to fetch project {}", slug))
    }

    /// Fetch one blog post for its detail page; `None` when no post has the slug
    pub async fn fetch_post(&self, slug: &str) -> Result<Option<PostDetail>> {
        self.query(POST_QUERY, &[("slug", slug)])
            .await
            .with_context(|| format!("Failed to fetch post {}", slug))
    }
}

impl ContentSource for ContentClient {
    fn fetch(&self) -> BoxFuture<'_, Result<PortfolioData>> {
        Box::pin(self.fetch_portfolio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_url() {
        assert_eq!(
            ContentClient::build_query_url("abc123", "production", "2024-01-01", true),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
        assert_eq!(
            ContentClient::build_query_url("abc123", "staging", "v2023-05-03", false),
            "https://abc123.api.sanity.io/v2023-05-03/data/query/staging"
        );
    }

    #[test]
    fn test_new_requires_project_id() {
        let err = ContentClient::new(&Config::default()).err().unwrap();
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        // Port 9 (discard) is closed on loopback, so the connect is refused
        let client =
            ContentClient::with_query_url("http://127.0.0.1:9/v1/data/query/production", None)
                .unwrap();
        let err = client.fetch_portfolio().await.err().unwrap();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NetworkError(_))));
    }

    #[test]
    fn test_parse_null_detail_result() {
        let resp: QueryResponse<Option<ProjectDetail>> =
            serde_json::from_str(r#"{"result": null, "ms": 3, "query": "*"}"#).unwrap();
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_parse_post_detail_result() {
        let json = r#"{"result": {
            "_id": "b1",
            "title": "Getting Started",
            "slug": {"current": "getting-started"},
            "description": "Intro",
            "publishedAt": "2024-03-18T09:00:00Z",
            "tags": ["rust"],
            "body": [{"_type": "block", "children": [{"text": "Hello"}]}],
            "author": {"name": "Sam"}
        }}"#;
        let resp: QueryResponse<Option<PostDetail>> = serde_json::from_str(json).unwrap();
        let post = resp.result.unwrap();
        assert_eq!(post.slug.current, "getting-started");
        assert_eq!(post.author.map(|a| a.name).as_deref(), Some("Sam"));
        assert!(post.body.is_some());
    }
}
