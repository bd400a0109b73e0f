//! Reference resolution.
//!
//! Decides, for one classified reference, whether it can be relinked to media
//! that already exists (on disk or imported earlier in this run), must be
//! fetched, or is skipped.
//!
//! Check order matters: the cheap decisive skips come first, then the
//! on-disk duplicate, then the session cache; fetching is the fallback.

mod cache;
mod layout;

use log::debug;

use crate::classify::{is_html_page, url_path, ClassifiedUrl};
use crate::config::Config;
use crate::models::Reference;
use crate::store::ExistenceCheck;

pub use cache::ResolutionCache;
pub use layout::SiteLayout;

/// Outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Host is not the source domain.
    SkipWrongDomain,
    /// Scheme rejected by the protocol filter.
    SkipWrongProtocol,
    /// An `img` pointing at an HTML page.
    SkipHtmlFile,
    /// The file already exists locally; link to it.
    ReuseLocal(String),
    /// Already imported earlier in this run.
    ReuseSession(String),
    /// Must be imported from this URL.
    NeedsFetch(String),
}

impl Decision {
    /// New URL when the decision needs no fetch.
    pub fn reused_url(&self) -> Option<&str> {
        match self {
            Decision::ReuseLocal(url) | Decision::ReuseSession(url) => Some(url),
            _ => None,
        }
    }
}

/// Resolves one reference.
///
/// # Arguments
///
/// * `reference` - The URL occurrence and the tag it was found on
/// * `classified` - Classification of `reference.url`
/// * `config` - Run configuration (domain, protocol filter, duplicate policy)
/// * `fs` - Presence check for previously downloaded files
/// * `layout` - Maps URL paths to local files and local files to public URLs
/// * `cache` - URLs imported earlier in this run
///
/// # Returns
///
/// The decision. `NeedsFetch` carries the canonical URL; after a successful
/// fetch the caller must register it in `cache`.
pub fn resolve(
    reference: &Reference,
    classified: &ClassifiedUrl,
    config: &Config,
    fs: &impl ExistenceCheck,
    layout: &SiteLayout,
    cache: &ResolutionCache,
) -> Decision {
    if !classified.matches_domain {
        debug!("\t-- Wrong domain. Skipping {}.", reference.url);
        return Decision::SkipWrongDomain;
    }

    if !config.protocol.accepts(classified.scheme.as_deref()) {
        debug!("\t-- Wrong protocol. Skipping {}.", reference.url);
        return Decision::SkipWrongProtocol;
    }

    if is_html_page(reference.tag, &reference.url) {
        debug!("\t-- This is an html file. Skipping {}.", reference.url);
        return Decision::SkipHtmlFile;
    }

    if classified.canonical != classified.raw {
        debug!("\t-- Found parameters. Backfilling original image.");
    }

    if !config.import_duplicates {
        if let Some(local_url) = existing_local_url(&classified.canonical, fs, layout) {
            debug!("\t-- Image already exists. Linking to existing image.");
            return Decision::ReuseLocal(local_url);
        }
        if let Some(imported) = cache.get(&classified.canonical) {
            debug!("\t-- Image already imported. Linking to imported image.");
            return Decision::ReuseSession(imported.to_string());
        }
    }

    Decision::NeedsFetch(classified.canonical.clone())
}

/// Public URL of the local copy of `url`, when one exists inside the content
/// directory.
///
/// Only the URL path is looked up, so query parameters never affect on-disk
/// duplicate detection.
fn existing_local_url(url: &str, fs: &impl ExistenceCheck, layout: &SiteLayout) -> Option<String> {
    let path = url_path(url)?;
    let local = layout.local_path(&path);
    if !fs.exists(&local) {
        return None;
    }
    let public = layout.public_url(&local);
    if public.is_none() {
        debug!(
            "\t-- {} exists but is outside the content directory.",
            local.display()
        );
    }
    public
}
