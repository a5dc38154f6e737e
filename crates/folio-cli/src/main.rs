//! folio - browse the portfolio content from the terminal.
//!
//! Lists and searches the project and blog archives, shows detail pages,
//! manages the local content cache, and runs the globe headless.

mod commands;
mod globe_sim;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_core::archive::PostSort;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Browse portfolio projects and posts")]
struct Cli {
    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List projects, optionally filtered
    Projects {
        /// Case-insensitive match on title or description
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// List blog posts, optionally filtered and sorted
    Posts {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        tag: Option<String>,
        /// "date" (newest first) or "views"
        #[arg(long, default_value = "date")]
        sort: PostSort,
    },
    /// Show one project
    Project { slug: String },
    /// Show one blog post
    Post { slug: String },
    /// Show work experience and education
    About {
        /// Only show one tab
        #[arg(long, value_enum)]
        tab: Option<commands::AboutTab>,
    },
    /// Drop the cached content and fetch it again
    Refresh,
    /// Show what is in the local cache
    CacheInfo,
    /// Save content backend settings
    Config {
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        dataset: Option<String>,
        #[arg(long)]
        api_version: Option<String>,
        /// Query the live API instead of the CDN
        #[arg(long)]
        no_cdn: bool,
    },
    /// Run the globe against a headless host
    Globe {
        /// Frames to simulate
        #[arg(short, long, default_value_t = 300)]
        frames: u32,
        #[arg(long, default_value_t = 1024)]
        width: u32,
        #[arg(long, default_value_t = 768)]
        height: u32,
        /// Frames the surface stays unsized before layout
        #[arg(long, default_value_t = 0)]
        layout_delay: u32,
        /// Start a drag at this frame
        #[arg(long)]
        drag_at: Option<u32>,
        /// Print the scene description as JSON and exit
        #[arg(long)]
        dump_scene: bool,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "folio.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_ref());
    info!(command = ?cli.command, "folio starting");

    match cli.command {
        Command::Projects { search, tag } => commands::list_projects(&search, tag).await,
        Command::Posts { search, tag, sort } => commands::list_posts(&search, tag, sort).await,
        Command::Project { slug } => commands::show_project(&slug).await,
        Command::Post { slug } => commands::show_post(&slug).await,
        Command::About { tab } => commands::about(tab),
        Command::Refresh => commands::refresh().await,
        Command::CacheInfo => commands::cache_info(),
        Command::Config {
            project_id,
            dataset,
            api_version,
            no_cdn,
        } => commands::save_config(project_id, dataset, api_version, no_cdn),
        Command::Globe {
            frames,
            width,
            height,
            layout_delay,
            drag_at,
            dump_scene,
        } => {
            if dump_scene {
                return globe_sim::dump_scene();
            }
            globe_sim::run(globe_sim::SimOptions {
                frames,
                width,
                height,
                layout_delay,
                drag_at,
            })
        }
    }
}
