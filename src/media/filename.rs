//! Upload filename suggestion.

use crate::config::{ALLOWED_MEDIA_EXTENSIONS, PLACEHOLDER_EXTENSION};

const FALLBACK_STEM: &str = "media";

/// Filename under which a remote file is stored.
///
/// Takes the last path segment of `url`. When the URL still carries a query
/// (parameters were kept), its alphanumerics are folded into the stem, so
/// `image.png?w=300` becomes `imagew300.png`. A name without an allowed media
/// extension gets `.placeholder` appended.
pub fn suggested_filename(url: &str) -> String {
    let (segment, query) = split_url(url);

    let (stem, extension) = match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (segment.as_str(), None),
    };
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    let params: String = query
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    let mut name = format!("{stem}{params}");
    if let Some(ext) = extension {
        name.push('.');
        name.push_str(ext);
    }
    if !extension.is_some_and(is_allowed_extension) {
        name.push('.');
        name.push_str(PLACEHOLDER_EXTENSION);
    }

    sanitize_filename::sanitize(name)
}

/// Whether an extension is accepted as a media attachment.
pub fn is_allowed_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    ALLOWED_MEDIA_EXTENSIONS.contains(&ext.as_str())
}

/// Last path segment and query of a URL.
fn split_url(url: &str) -> (String, Option<String>) {
    let candidate = if url.starts_with("//") {
        format!("http:{url}")
    } else {
        url.to_string()
    };
    match url::Url::parse(&candidate) {
        Ok(parsed) => {
            let segment = parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
                .unwrap_or_default();
            (segment, parsed.query().map(str::to_string))
        }
        Err(_) => {
            let without_fragment = url.split('#').next().unwrap_or_default();
            let (path, query) = match without_fragment.split_once('?') {
                Some((path, query)) => (path, Some(query.to_string())),
                None => (without_fragment, None),
            };
            let segment = path.rsplit('/').next().unwrap_or_default().to_string();
            (segment, query)
        }
    }
}
