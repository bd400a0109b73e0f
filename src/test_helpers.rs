// Shared fakes for unit tests of the rewrite engine and batch runner.
//
// Every fake records its calls so tests can assert which collaborators were
// (or were not) invoked.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error_handling::{DatabaseError, MediaError};
use crate::models::{Document, DocumentId};
use crate::store::{ContentStore, DocumentSource, ExistenceCheck, MediaStore, Throttle};

pub const DOMAIN: &str = "old.example.com";
pub const CDN: &str = "https://cdn.local";

/// Filesystem holding a fixed set of files.
#[derive(Default)]
pub struct FakeFs {
    files: HashSet<PathBuf>,
}

impl FakeFs {
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExistenceCheck for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

/// Media store returning `<CDN>/<suggested filename>`.
#[derive(Default)]
pub struct FakeMedia {
    failing: HashSet<String>,
    empty: HashSet<String>,
    pub calls: RefCell<Vec<(String, String, DocumentId)>>,
}

impl FakeMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads of `url` fail with an HTTP 404.
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Uploads of `url` succeed but return an empty URL.
    pub fn empty(mut self, url: &str) -> Self {
        self.empty.insert(url.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(u, _, _)| u.clone()).collect()
    }
}

impl MediaStore for FakeMedia {
    async fn upload(
        &self,
        url: &str,
        suggested_filename: &str,
        owner: DocumentId,
    ) -> Result<String, MediaError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), suggested_filename.to_string(), owner));
        if self.failing.contains(url) {
            return Err(MediaError::HttpStatus {
                url: url.to_string(),
                status: 404,
            });
        }
        if self.empty.contains(url) {
            return Ok(String::new());
        }
        Ok(format!("{CDN}/{suggested_filename}"))
    }
}

/// In-memory posts table.
#[derive(Default)]
pub struct FakeStore {
    posts: RefCell<BTreeMap<DocumentId, String>>,
    fail_persist: bool,
    pub fetches: RefCell<Vec<DocumentId>>,
    pub persisted: RefCell<Vec<(DocumentId, String)>>,
}

impl FakeStore {
    pub fn with_posts<I, S>(posts: I) -> Self
    where
        I: IntoIterator<Item = (DocumentId, S)>,
        S: Into<String>,
    {
        Self {
            posts: RefCell::new(posts.into_iter().map(|(id, c)| (id, c.into())).collect()),
            ..Default::default()
        }
    }

    pub fn failing_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }

    pub fn content(&self, id: DocumentId) -> Option<String> {
        self.posts.borrow().get(&id).cloned()
    }
}

impl DocumentSource for FakeStore {
    async fn list_candidate_documents(
        &self,
        domain: &str,
    ) -> Result<Vec<DocumentId>, DatabaseError> {
        Ok(self
            .posts
            .borrow()
            .iter()
            .filter(|(_, content)| content.contains(domain))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn fetch_document(&self, id: DocumentId) -> Result<Option<Document>, DatabaseError> {
        self.fetches.borrow_mut().push(id);
        Ok(self
            .posts
            .borrow()
            .get(&id)
            .map(|content| Document::new(id, content.clone())))
    }
}

impl ContentStore for FakeStore {
    async fn persist(&self, id: DocumentId, content: &str) -> Result<(), DatabaseError> {
        if self.fail_persist {
            return Err(DatabaseError::FileCreationError("read-only".to_string()));
        }
        self.persisted.borrow_mut().push((id, content.to_string()));
        self.posts.borrow_mut().insert(id, content.to_string());
        Ok(())
    }
}

/// Counts pauses instead of sleeping.
#[derive(Default)]
pub struct CountingThrottle {
    pub pauses: Cell<usize>,
}

impl Throttle for CountingThrottle {
    async fn pause(&self) {
        self.pauses.set(self.pauses.get() + 1);
    }
}
