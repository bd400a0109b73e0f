//! Rewrite engine.
//!
//! Runs the tag passes over one post, resolves every reference and replaces
//! each resolved URL with its new location across the whole content.

use log::{debug, warn};

use crate::classify::classify;
use crate::config::Config;
use crate::error_handling::ErrorType;
use crate::media::suggested_filename;
use crate::models::{Document, Reference};
use crate::resolve::{resolve, Decision, ResolutionCache, SiteLayout};
use crate::select::scan;
use crate::stats::RunStats;
use crate::store::{ExistenceCheck, MediaStore};

/// Shared, read-only inputs of the rewrite engine.
pub struct RewriteContext<'a, M, F> {
    pub config: &'a Config,
    pub layout: &'a SiteLayout,
    pub media: &'a M,
    pub fs: &'a F,
}

/// Result of rewriting one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// At least one replacement changed the content
    pub modified: bool,
    /// References that resolved to a new URL
    pub references_rewritten: usize,
}

/// Rewrites one post in place.
///
/// Every pass of the configured tag mode is enumerated against the original
/// markup. For each reference that resolves to a new URL, every occurrence
/// of the matched (canonical) URL in the content is replaced, so repeated
/// occurrences elsewhere in the post are updated together.
///
/// `document.modified` is set when the content changed; nothing is persisted
/// here.
///
/// # Arguments
///
/// * `document` - Post to rewrite
/// * `ctx` - Configuration, layout and collaborators
/// * `cache` - URLs imported earlier in this run; successful fetches are added
/// * `stats` - Run counters
pub async fn rewrite_document<M, F>(
    document: &mut Document,
    ctx: &RewriteContext<'_, M, F>,
    cache: &mut ResolutionCache,
    stats: &mut RunStats,
) -> RewriteOutcome
where
    M: MediaStore,
    F: ExistenceCheck,
{
    let mut outcome = RewriteOutcome::default();

    for (pass, references) in scan(&document.content, ctx.config.tags) {
        if references.is_empty() {
            debug!("\t-- No <{}> references in #{}.", pass.tag, document.id);
            continue;
        }

        for reference in references {
            debug!(" -- Processing {} {}", reference.tag, reference.url);
            let Some((old_url, new_url)) =
                resolve_reference(document, &reference, ctx, cache, stats).await
            else {
                continue;
            };

            outcome.references_rewritten += 1;
            if old_url != new_url && document.content.contains(&old_url) {
                debug!(" -- Updating post with new URL: {new_url}");
                document.content = document.content.replace(&old_url, &new_url);
                outcome.modified = true;
            }
        }
    }

    if outcome.modified {
        document.modified = true;
    }
    stats.references_rewritten += outcome.references_rewritten;
    outcome
}

/// Resolves one reference to `(matched URL, new URL)`, fetching if needed.
///
/// Returns `None` for skipped references and failed fetches.
async fn resolve_reference<M, F>(
    document: &Document,
    reference: &Reference,
    ctx: &RewriteContext<'_, M, F>,
    cache: &mut ResolutionCache,
    stats: &mut RunStats,
) -> Option<(String, String)>
where
    M: MediaStore,
    F: ExistenceCheck,
{
    let config = ctx.config;
    let classified = classify(&reference.url, &config.domain, config.include_params);
    let decision = resolve(reference, &classified, config, ctx.fs, ctx.layout, cache);
    stats.record_decision(&decision);

    match decision {
        Decision::SkipWrongDomain | Decision::SkipWrongProtocol | Decision::SkipHtmlFile => None,
        Decision::ReuseLocal(new_url) | Decision::ReuseSession(new_url) => {
            Some((classified.canonical, new_url))
        }
        Decision::NeedsFetch(url) => {
            debug!("\t-- Downloading {url}.");
            let filename = suggested_filename(&url);
            match ctx.media.upload(&url, &filename, document.id).await {
                Ok(new_url) if !new_url.trim().is_empty() => {
                    stats.record_fetch_success();
                    cache.insert(url.clone(), new_url.clone());
                    Some((url, new_url))
                }
                Ok(_) => {
                    warn!(
                        " -- Image download failed for '{}' on post #{}: no URL returned",
                        url, document.id
                    );
                    stats.record_fetch_failure(ErrorType::MediaNoUrl);
                    None
                }
                Err(e) => {
                    warn!(
                        " -- Image download failed for '{}' on post #{}: {}",
                        url, document.id, e
                    );
                    stats.record_fetch_failure(ErrorType::from(&e));
                    None
                }
            }
        }
    }
}
