//! Batch runner.
//!
//! Walks the selected posts one at a time: load, rewrite, persist, pause.
//! Owns the run's resolution cache, so a file imported for one post is reused
//! by every later post.

use log::{debug, info, warn};

use crate::config::Config;
use crate::error_handling::DatabaseError;
use crate::models::DocumentId;
use crate::resolve::{ResolutionCache, SiteLayout};
use crate::rewrite::{rewrite_document, RewriteContext};
use crate::stats::RunStats;
use crate::store::{ContentStore, DocumentSource, ExistenceCheck, MediaStore, Throttle};

/// Collaborators of one run.
pub struct Collaborators<'a, S, M, F, T> {
    pub store: &'a S,
    pub media: &'a M,
    pub fs: &'a F,
    pub throttle: &'a T,
}

/// Post ids to process: the explicit list in its given order, or every
/// candidate post mentioning the source domain.
pub async fn select_documents<S: DocumentSource>(
    source: &S,
    config: &Config,
) -> Result<Vec<DocumentId>, DatabaseError> {
    match &config.post_ids {
        Some(ids) => Ok(ids.clone()),
        None => source.list_candidate_documents(&config.domain).await,
    }
}

/// Backfills `ids` in order.
///
/// Posts are processed strictly sequentially. A post that changed is saved
/// unless `config.dry_run` is set; a failed save is warned about and the run
/// continues. Ids that do not exist are tallied as missing. With a
/// modified-post limit the run stops as soon as the limit is reached; later
/// posts are never loaded.
///
/// # Errors
///
/// Returns `DatabaseError` when a post cannot be loaded.
pub async fn run_batch<S, M, F, T>(
    ids: &[DocumentId],
    config: &Config,
    layout: &SiteLayout,
    collaborators: &Collaborators<'_, S, M, F, T>,
) -> Result<RunStats, DatabaseError>
where
    S: DocumentSource + ContentStore,
    M: MediaStore,
    F: ExistenceCheck,
    T: Throttle,
{
    let ctx = RewriteContext {
        config,
        layout,
        media: collaborators.media,
        fs: collaborators.fs,
    };
    let limit = config.modified_limit();
    let mut cache = ResolutionCache::new();
    let mut stats = RunStats::new();

    for &id in ids {
        let Some(mut document) = collaborators.store.fetch_document(id).await? else {
            warn!("Post #{id} not found. Skipping.");
            stats.record_missing_document();
            continue;
        };
        stats.documents_seen += 1;

        if document.content.trim().is_empty() {
            debug!("Post #{id} has no content. Skipping.");
            continue;
        }

        debug!("Processing post #{id}");
        let outcome = rewrite_document(&mut document, &ctx, &mut cache, &mut stats).await;

        if outcome.modified {
            stats.documents_modified += 1;
            if config.dry_run {
                debug!(" -- Dry run: post #{id} not saved.");
            } else if let Err(e) = collaborators.store.persist(id, &document.content).await {
                warn!(" -- Failed to save post #{id}: {e}");
                stats.record_persist_failure();
            } else {
                debug!(" -- Post #{id} updated.");
            }
        }

        if let Some(max) = limit {
            if stats.documents_modified >= max {
                info!("Reached the limit of {max} modified posts.");
                break;
            }
        }

        collaborators.throttle.pause().await;
    }

    debug!("{} URLs imported this run", cache.len());
    Ok(stats)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
