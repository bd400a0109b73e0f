//! Collaborators of the rewrite engine.
//!
//! The engine never talks to a database, the network or the filesystem
//! directly. It goes through these traits, so the batch can run against the
//! SQLite and HTTP implementations in production and against counting fakes
//! in tests.
//!
//! Every call is awaited in sequence; implementations need not be `Send`.

mod fs;
mod throttle;

use std::path::Path;

use crate::error_handling::{DatabaseError, MediaError};
use crate::models::{Document, DocumentId};

pub use fs::LocalFilesystem;
pub use throttle::{NoThrottle, TokioThrottle};

/// Where posts come from.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Ids of posts whose content mentions `domain`, in store order.
    async fn list_candidate_documents(&self, domain: &str)
        -> Result<Vec<DocumentId>, DatabaseError>;

    /// Loads one post. `Ok(None)` when the id does not exist.
    async fn fetch_document(&self, id: DocumentId) -> Result<Option<Document>, DatabaseError>;
}

/// Where rewritten posts are saved.
#[allow(async_fn_in_trait)]
pub trait ContentStore {
    async fn persist(&self, id: DocumentId, content: &str) -> Result<(), DatabaseError>;
}

/// Imports remote media and returns its new public URL.
///
/// Implementations record the `old_url`/`new_url` pair against the created
/// attachment.
#[allow(async_fn_in_trait)]
pub trait MediaStore {
    async fn upload(
        &self,
        url: &str,
        suggested_filename: &str,
        owner: DocumentId,
    ) -> Result<String, MediaError>;
}

/// Presence check for previously downloaded media.
pub trait ExistenceCheck {
    fn exists(&self, path: &Path) -> bool;
}

/// Pacing between posts.
#[allow(async_fn_in_trait)]
pub trait Throttle {
    async fn pause(&self);
}
