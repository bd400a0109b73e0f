//! image_backfiller library: pull externally hosted media into the local site.
//!
//! Scans posts for `img`, `a` and `input` references pointing at a source
//! domain, imports each referenced file once (or relinks it to a copy that
//! already exists locally) and rewrites the post content to the new URLs.
//!
//! # Example
//!
//! ```no_run
//! use image_backfiller::{run_backfill, Config, TagMode};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "old.example.com".to_string(),
//!     tags: TagMode::Img,
//!     dry_run: true,
//!     ..Default::default()
//! };
//!
//! let report = run_backfill(config).await?;
//! println!("{} posts processed, {} updated", report.posts_seen, report.posts_modified);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Posts are processed one at a time;
//! no task is spawned.

mod batch;
mod classify;
pub mod config;
mod error_handling;
pub mod initialization;
mod media;
pub mod models;
mod resolve;
mod rewrite;
mod select;
mod stats;
pub mod storage;
pub mod store;
#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use batch::{run_batch, select_documents, Collaborators};
pub use classify::{classify, ClassifiedUrl};
pub use config::{Config, LogFormat, LogLevel, Protocol, TagMode};
pub use error_handling::{ConfigError, DatabaseError, ErrorType, InitializationError, MediaError};
pub use media::{suggested_filename, HttpMediaStore};
pub use resolve::{resolve, Decision, ResolutionCache, SiteLayout};
pub use rewrite::{rewrite_document, RewriteContext, RewriteOutcome};
pub use run::{run_backfill, BackfillReport};
pub use stats::RunStats;

// Internal run module (wires the concrete collaborators together)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::{debug, info};
    use serde::Serialize;

    use crate::batch::{run_batch, select_documents, Collaborators};
    use crate::config::Config;
    use crate::error_handling::InitializationError;
    use crate::initialization::init_client;
    use crate::media::HttpMediaStore;
    use crate::resolve::SiteLayout;
    use crate::stats::RunStats;
    use crate::storage::{init_db_pool_with_path, run_migrations, SqliteContentStore};
    use crate::store::{LocalFilesystem, TokioThrottle};

    /// Results of a backfill run.
    #[derive(Debug, Clone, Serialize)]
    pub struct BackfillReport {
        /// Posts loaded and scanned
        pub posts_seen: usize,
        /// Posts whose content changed (saved unless `dry_run`)
        pub posts_modified: usize,
        /// Whether changes were only computed
        pub dry_run: bool,
        /// Database holding the posts and attachments
        pub db_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Detailed counters
        pub stats: RunStats,
    }

    /// Runs a backfill against the site database and uploads directory.
    ///
    /// # Errors
    ///
    /// Fails before touching any post when the configuration is invalid or the
    /// database or HTTP client cannot be initialized, and aborts when a post
    /// cannot be loaded. Per-reference download failures and per-post save
    /// failures are not errors; they are counted in the report.
    pub async fn run_backfill(config: Config) -> Result<BackfillReport> {
        let config = config.normalized().context("Invalid configuration")?;
        let start_time = Instant::now();

        info!(
            "Backfilling media from {} into {}",
            config.domain, config.site_url
        );
        log_options(&config);

        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        let client = init_client(&config)
            .map_err(InitializationError::from)
            .context("Failed to initialize HTTP client")?;

        let layout = SiteLayout::from_config(&config);
        let store = SqliteContentStore::new(Arc::clone(&pool));
        let media = HttpMediaStore::new(client, Arc::clone(&pool), layout.clone(), config.dry_run);
        let throttle = TokioThrottle::new(Duration::from_millis(config.pacing_ms));
        let collaborators = Collaborators {
            store: &store,
            media: &media,
            fs: &LocalFilesystem,
            throttle: &throttle,
        };

        let ids = select_documents(&store, &config)
            .await
            .context("Failed to list posts")?;
        info!(
            "Processing {} post{}",
            ids.len(),
            if ids.len() == 1 { "" } else { "s" }
        );

        let stats = run_batch(&ids, &config, &layout, &collaborators)
            .await
            .context("Backfill aborted")?;
        stats.log_summary();
        pool.close().await;

        Ok(BackfillReport {
            posts_seen: stats.documents_seen,
            posts_modified: stats.documents_modified,
            dry_run: config.dry_run,
            db_path: config.db_path.clone(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
            stats,
        })
    }

    fn yes_no(flag: bool) -> &'static str {
        if flag {
            "Yes"
        } else {
            "No"
        }
    }

    fn log_options(config: &Config) {
        debug!("Tags: {:?}", config.tags);
        debug!("Protocol: {:?}", config.protocol);
        match &config.post_ids {
            Some(ids) => debug!("Posts: {ids:?}"),
            None => debug!("Posts: all"),
        }
        match config.modified_limit() {
            Some(limit) => debug!("Max modified posts: {limit}"),
            None => debug!("Max modified posts: unlimited"),
        }
        debug!("Import duplicates: {}", yes_no(config.import_duplicates));
        debug!("Include params: {}", yes_no(config.include_params));
        debug!("Dry run: {}", yes_no(config.dry_run));
        debug!("Content dir: {}", config.resolved_content_dir().display());
        debug!("Content URL: {}", config.resolved_content_url());
    }
}
