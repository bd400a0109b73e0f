//! URL classification.
//!
//! Pure functions answering, for one candidate URL:
//! - which host it points at, and whether that is the source domain
//! - whether it carries a query component
//! - what its canonical (parameter-free) form is
//!
//! A URL that cannot be parsed is classified as foreign rather than failing
//! the run.

use url::Url;

use crate::models::TagKind;

/// Facts derived from a raw URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedUrl {
    pub raw: String,
    pub host: Option<String>,
    /// `None` for protocol-relative and unparsable URLs
    pub scheme: Option<String>,
    pub matches_domain: bool,
    pub has_query: bool,
    pub canonical: String,
}

/// Classifies `url` against the source domain.
///
/// # Arguments
///
/// * `url` - URL exactly as found in the attribute
/// * `target_domain` - Source domain; compared against the parsed host, which
///   is already lowercase, so the domain's ASCII case does not matter
/// * `include_params` - When false, the canonical form drops the query component
pub fn classify(url: &str, target_domain: &str, include_params: bool) -> ClassifiedUrl {
    let parsed = parse_url(url);

    let host = parsed
        .as_ref()
        .and_then(|(u, _)| u.host_str().map(str::to_string));
    let scheme = parsed
        .as_ref()
        .filter(|(_, scheme_less)| !scheme_less)
        .map(|(u, _)| u.scheme().to_string());
    // Presence, not length: `image.png?` has an (empty) query
    let has_query = match &parsed {
        Some((u, _)) => u.query().is_some(),
        None => url.contains('?'),
    };
    let target_domain = target_domain.trim();
    let matches_domain = host
        .as_deref()
        .is_some_and(|h| h.eq_ignore_ascii_case(target_domain));

    let canonical = if !include_params && has_query {
        strip_query(url).to_string()
    } else {
        url.to_string()
    };

    ClassifiedUrl {
        raw: url.to_string(),
        host,
        scheme,
        matches_domain,
        has_query,
        canonical,
    }
}

/// Drops everything from the first `?` onward. Idempotent.
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}

/// Whether an `img` reference points at an HTML page rather than an image.
pub fn is_html_page(tag: TagKind, url: &str) -> bool {
    tag == TagKind::Img && url.contains(".html")
}

/// Path component of a URL, percent-decoded, without query or fragment.
///
/// Returns `None` when a decoded segment climbs out of its directory.
pub fn url_path(url: &str) -> Option<String> {
    let (parsed, _) = parse_url(url)?;
    let encoded = parsed.path();
    let path = urlencoding::decode(encoded)
        .map_or_else(|_| encoded.to_string(), |decoded| decoded.into_owned());
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(path)
}

/// Parses absolute and protocol-relative URLs.
///
/// Returns the parsed URL and whether the original was scheme-less.
fn parse_url(url: &str) -> Option<(Url, bool)> {
    let trimmed = url.trim();
    if trimmed.starts_with("//") {
        Url::parse(&format!("http:{trimmed}")).ok().map(|u| (u, true))
    } else {
        Url::parse(trimmed).ok().map(|u| (u, false))
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
