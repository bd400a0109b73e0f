use std::path::{Component, Path, PathBuf};

use crate::config::Config;

/// Where the receiving site keeps its files and how they are served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Site root; URL paths are resolved against it
    pub root: PathBuf,
    /// Content directory, served under `content_url`
    pub content_dir: PathBuf,
    /// Public URL of `content_dir`, without a trailing slash
    pub content_url: String,
}

impl SiteLayout {
    pub fn new(
        root: impl Into<PathBuf>,
        content_dir: impl Into<PathBuf>,
        content_url: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            content_dir: content_dir.into(),
            content_url: content_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.site_root.clone(),
            config.resolved_content_dir(),
            config.resolved_content_url(),
        )
    }

    /// Local file a URL path maps to under the site root.
    pub fn local_path(&self, url_path: &str) -> PathBuf {
        self.root.join(url_path.trim_start_matches('/'))
    }

    /// Public URL of a local file, or `None` if it is not inside the content
    /// directory.
    pub fn public_url(&self, local: &Path) -> Option<String> {
        let relative = match local.strip_prefix(&self.content_dir) {
            Ok(relative) => relative.to_path_buf(),
            // Relative and absolute spellings of the same directory
            Err(_) => {
                let local = local.canonicalize().ok()?;
                let content_dir = self.content_dir.canonicalize().ok()?;
                local.strip_prefix(content_dir).ok()?.to_path_buf()
            }
        };

        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.content_url, segments.join("/")))
    }
}
