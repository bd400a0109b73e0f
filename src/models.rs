//! Core data types shared by the scanning and rewriting stages.

use std::fmt;

/// Identifier of a post in the content store.
pub type DocumentId = i64;

/// A post being backfilled.
///
/// `modified` is set by the rewrite engine when the content changed during
/// this run, whether or not the change is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    pub modified: bool,
}

impl Document {
    pub fn new(id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            modified: false,
        }
    }
}

/// Concrete tag scanned in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Img,
    Anchor,
    Input,
}

impl TagKind {
    /// HTML element name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Img => "img",
            TagKind::Anchor => "a",
            TagKind::Input => "input",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One URL occurrence found on one element during one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub url: String,
    pub tag: TagKind,
    pub attribute: &'static str,
}
