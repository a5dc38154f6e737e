//! Content subcommands: archives, detail pages, cache and config.

use anyhow::{Context, Result};
use clap::ValueEnum;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use folio_core::archive::{self, ArchiveQuery, PostSort};
use folio_core::fallback;
use folio_core::models::{Education, Experience, PostDetail, ProjectDetail};
use folio_core::utils::{format_date, portable_text_to_plain, reading_time_minutes, truncate_string};
use folio_core::{
    ApiError, Config, ContentCache, ContentClient, ContentSource, FileStorage, LoadOrigin,
    LoadedPortfolio, PortfolioData, PortfolioLoader, SystemClock,
};

const DESCRIPTION_WIDTH: usize = 72;

/// The remote backend, or nothing when no project is configured.
enum Backend {
    Remote(ContentClient),
    Offline,
}

impl Backend {
    fn from_config(config: &Config) -> Result<Self> {
        if !config.is_configured() {
            debug!("No content project configured, running offline");
            return Ok(Backend::Offline);
        }
        Ok(Backend::Remote(ContentClient::new(config)?))
    }

    fn client(&self) -> Option<&ContentClient> {
        match self {
            Backend::Remote(client) => Some(client),
            Backend::Offline => None,
        }
    }
}

impl ContentSource for Backend {
    fn fetch(&self) -> BoxFuture<'_, Result<PortfolioData>> {
        match self {
            Backend::Remote(client) => client.fetch(),
            Backend::Offline => {
                let err = ApiError::NotConfigured(
                    "set SANITY_PROJECT_ID or run `folio config`".to_string(),
                );
                let result: Result<PortfolioData> = Err(err.into());
                Box::pin(futures::future::ready(result))
            }
        }
    }
}

/// Open the on-disk cache, falling back to running without one.
fn open_cache(config: &Config) -> ContentCache {
    let storage = config
        .cache_dir()
        .and_then(|dir| FileStorage::new(dir).context("Failed to open cache directory"));
    match storage {
        Ok(storage) => ContentCache::new(storage, SystemClock),
        Err(e) => {
            warn!(error = %e, "Cache unavailable, continuing without it");
            ContentCache::without_storage(SystemClock)
        }
    }
}

fn loader() -> Result<PortfolioLoader<Backend>> {
    let config = Config::load().context("Failed to load config")?;
    let backend = Backend::from_config(&config)?;
    Ok(PortfolioLoader::new(open_cache(&config), backend))
}

fn print_origin(portfolio: &LoadedPortfolio) {
    let note = match portfolio.origin {
        LoadOrigin::Cache => "from cache",
        LoadOrigin::Network => "fetched",
        LoadOrigin::Unavailable => "content backend unavailable, showing defaults",
    };
    eprintln!("({})", note);
}

fn print_announcement(portfolio: &LoadedPortfolio) {
    if let Some(announcement) = &portfolio.announcement {
        println!("[{}] {}", announcement.variant(), announcement.text);
        if let Some((text, link)) = announcement.call_to_action() {
            println!("      {} -> {}", text, link);
        }
        println!();
    }
}

pub async fn list_projects(search: &str, tag: Option<String>) -> Result<()> {
    let portfolio = loader()?.load().await;
    print_origin(&portfolio);
    print_announcement(&portfolio);

    let query = ArchiveQuery::new(search, tag);
    let projects = archive::filter_projects(&portfolio.projects, &query);
    if projects.is_empty() {
        println!("No projects match.");
    }
    for project in projects {
        let marker = if project.featured { "*" } else { " " };
        println!("{} {:<32} {}", marker, project.slug, project.title);
        println!("    {}", truncate_string(&project.description, DESCRIPTION_WIDTH));
        if !project.tags.is_empty() {
            println!("    [{}]", project.card_tags().join(", "));
        }
    }

    println!();
    println!("Tags: {}", archive::project_tags(&portfolio.projects).join(", "));
    Ok(())
}

pub async fn list_posts(search: &str, tag: Option<String>, sort: PostSort) -> Result<()> {
    let portfolio = loader()?.load().await;
    print_origin(&portfolio);
    print_announcement(&portfolio);

    let query = ArchiveQuery::new(search, tag);
    let posts = archive::filter_posts(&portfolio.posts, &query, sort);
    if posts.is_empty() {
        println!("No posts match.");
    }
    for post in posts {
        let views = post.views.map(|v| format!("{} views", v)).unwrap_or_default();
        println!("{:<20} {:<32} {}", format_date(&post.published), post.slug, views);
        println!("    {}", post.title);
        println!("    {}", truncate_string(&post.description, DESCRIPTION_WIDTH));
    }

    println!();
    println!("Tags: {}", archive::post_tags(&portfolio.posts).join(", "));
    Ok(())
}

fn print_project_detail(detail: &ProjectDetail) {
    println!("{}", detail.title);
    println!("{}", format_date(&detail.date));
    println!();
    println!("{}", detail.overview.as_deref().unwrap_or(&detail.description));
    if !detail.technologies.is_empty() {
        println!();
        println!("Technologies: {}", detail.technologies.join(", "));
    }
    if !detail.features.is_empty() {
        println!();
        println!("Features:");
        for feature in &detail.features {
            println!("  - {}", feature);
        }
    }
    if let Some(body) = &detail.body {
        println!();
        println!("{}", portable_text_to_plain(body));
    }
    for link in detail.link.iter().chain(detail.github_url.iter()) {
        println!("{}", link);
    }
}

pub async fn show_project(slug: &str) -> Result<()> {
    let loader = loader()?;

    if let Some(client) = loader.source().client() {
        match client.fetch_project(slug).await {
            Ok(Some(detail)) => {
                print_project_detail(&detail);
                return Ok(());
            }
            Ok(None) => debug!(slug, "Project not found remotely"),
            Err(e) => warn!(error = %e, "Failed to fetch project details"),
        }
    }

    let portfolio = loader.load().await;
    let project = portfolio
        .project(slug)
        .with_context(|| format!("No project with slug '{}'", slug))?;
    println!("{}", project.title);
    println!("{}", format_date(&project.date));
    println!();
    println!("{}", project.description);
    if let Some(stars) = project.stars {
        println!("{} stars", stars);
    }
    for link in project.link.iter().chain(project.github_url.iter()) {
        println!("{}", link);
    }
    Ok(())
}

fn print_post_detail(detail: &PostDetail) {
    let text = detail.body.as_ref().map(portable_text_to_plain).unwrap_or_default();
    let published = detail.published_at.as_deref().map(format_date).unwrap_or_default();

    println!("{}", detail.title);
    match &detail.author {
        Some(author) => println!("{} by {}", published, author.name),
        None => println!("{}", published),
    }
    println!("{} min read", reading_time_minutes(&text));
    if !detail.tags.is_empty() {
        println!("[{}]", detail.tags.join(", "));
    }
    println!();
    println!("{}", text);
}

pub async fn show_post(slug: &str) -> Result<()> {
    let loader = loader()?;

    if let Some(client) = loader.source().client() {
        match client.fetch_post(slug).await {
            Ok(Some(detail)) => {
                print_post_detail(&detail);
                return Ok(());
            }
            Ok(None) => debug!(slug, "Post not found remotely"),
            Err(e) => warn!(error = %e, "Failed to fetch post details"),
        }
    }

    let portfolio = loader.load().await;
    let post = portfolio
        .post(slug)
        .with_context(|| format!("No post with slug '{}'", slug))?;
    println!("{}", post.title);
    println!("{}", format_date(&post.published));
    println!();
    println!("{}", post.description);
    Ok(())
}

/// Tabs of the about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AboutTab {
    Experience,
    Education,
}

fn experience_lines(experiences: &[Experience]) -> Vec<String> {
    let mut lines = Vec::new();
    for exp in experiences {
        lines.push(exp.role.clone());
        lines.push(format!("  {}", exp.employer_line()));
        match &exp.location {
            Some(location) => lines.push(format!("  {} · {}", exp.period, location)),
            None => lines.push(format!("  {}", exp.period)),
        }
    }
    lines
}

fn education_lines(education: &[Education]) -> Vec<String> {
    let mut lines = Vec::new();
    for edu in education {
        lines.push(edu.school.clone());
        lines.push(format!("  {}", edu.qualification()));
        match &edu.location {
            Some(location) => lines.push(format!("  {} · {}", edu.period, location)),
            None => lines.push(format!("  {}", edu.period)),
        }
        if let Some(gpa) = &edu.gpa {
            lines.push(format!("  GPA: {}", gpa));
        }
    }
    lines
}

fn about_lines(tab: Option<AboutTab>) -> Vec<String> {
    let mut lines = Vec::new();
    if tab != Some(AboutTab::Education) {
        lines.push("Experience".to_string());
        lines.extend(experience_lines(&fallback::experiences()));
    }
    if tab != Some(AboutTab::Experience) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Education".to_string());
        lines.extend(education_lines(&fallback::education()));
    }
    lines
}

pub fn about(tab: Option<AboutTab>) -> Result<()> {
    for line in about_lines(tab) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn refresh() -> Result<()> {
    let portfolio = loader()?.refresh().await;
    print_origin(&portfolio);
    println!(
        "{} projects, {} posts{}",
        portfolio.projects.len(),
        portfolio.posts.len(),
        if portfolio.announcement.is_some() { ", 1 announcement" } else { "" }
    );
    Ok(())
}

pub fn cache_info() -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let cache = open_cache(&config);
    if !cache.has_storage() {
        println!("No cache storage available.");
        return Ok(());
    }

    match cache.read_entry() {
        Some(entry) => {
            println!("Cached {}", entry.age_display(cache.now_millis()));
            println!("  {} projects", entry.data.projects.len());
            println!("  {} posts", entry.data.blog_posts.len());
            println!(
                "  announcement: {}",
                if entry.data.announcement.is_some() { "yes" } else { "no" }
            );
        }
        None => println!("Cache is empty or expired."),
    }
    if let Ok(dir) = config.cache_dir() {
        println!("Location: {}", dir.display());
    }
    Ok(())
}

pub fn save_config(
    project_id: Option<String>,
    dataset: Option<String>,
    api_version: Option<String>,
    no_cdn: bool,
) -> Result<()> {
    let mut config = Config::load().context("Failed to load config")?;
    if let Some(project_id) = project_id {
        config.project_id = Some(project_id);
    }
    if let Some(dataset) = dataset {
        config.dataset = dataset;
    }
    if let Some(api_version) = api_version {
        config.api_version = api_version;
    }
    config.use_cdn = !no_cdn;
    config.save()?;
    println!("Saved config to {}", Config::config_path()?.display());
    Ok(())
}
