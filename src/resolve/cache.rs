use std::collections::HashMap;

/// Run-scoped mapping from canonical source URL to imported URL.
///
/// Created empty for each batch and dropped with it. Only successful imports
/// are registered, so a failed fetch is retried the next time the URL shows up.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    imported: HashMap<String, String>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.imported.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.imported.contains_key(url)
    }

    /// Registers an import. The first mapping for a URL wins.
    pub fn insert(&mut self, url: impl Into<String>, new_url: impl Into<String>) {
        self.imported.entry(url.into()).or_insert_with(|| new_url.into());
    }

    pub fn len(&self) -> usize {
        self.imported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imported.is_empty()
    }
}
