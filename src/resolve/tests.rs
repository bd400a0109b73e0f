// Resolver tests.

use super::*;
use crate::classify::classify;
use crate::config::Protocol;
use crate::models::TagKind;
use crate::test_helpers::{FakeFs, DOMAIN};

fn config() -> Config {
    Config {
        domain: DOMAIN.to_string(),
        ..Default::default()
    }
}

fn layout() -> SiteLayout {
    SiteLayout::new(
        "/srv/site",
        "/srv/site/wp-content",
        "https://new.example.com/wp-content/",
    )
}

fn decide(url: &str, tag: TagKind, config: &Config, fs: &FakeFs, cache: &ResolutionCache) -> Decision {
    let reference = Reference {
        url: url.to_string(),
        tag,
        attribute: crate::select::attribute_for(tag),
    };
    let classified = classify(url, &config.domain, config.include_params);
    resolve(&reference, &classified, config, fs, &layout(), cache)
}

#[test]
fn test_foreign_domain_is_skipped_first() {
    let mut cache = ResolutionCache::new();
    cache.insert("http://other.com/a.png", "https://cdn.local/a.png");
    let decision = decide(
        "http://other.com/a.png",
        TagKind::Img,
        &config(),
        &FakeFs::default(),
        &cache,
    );
    assert_eq!(decision, Decision::SkipWrongDomain);
}

#[test]
fn test_protocol_filter() {
    let config = Config {
        protocol: Protocol::Http,
        ..config()
    };
    let fs = FakeFs::default();
    let cache = ResolutionCache::new();

    assert_eq!(
        decide("https://old.example.com/a.png", TagKind::Img, &config, &fs, &cache),
        Decision::SkipWrongProtocol
    );
    assert_eq!(
        decide("http://old.example.com/a.png", TagKind::Img, &config, &fs, &cache),
        Decision::NeedsFetch("http://old.example.com/a.png".to_string())
    );
    // Protocol-relative URLs pass any filter
    assert_eq!(
        decide("//old.example.com/a.png", TagKind::Img, &config, &fs, &cache),
        Decision::NeedsFetch("//old.example.com/a.png".to_string())
    );
}

#[test]
fn test_html_page_skipped_for_img_only() {
    let fs = FakeFs::default();
    let cache = ResolutionCache::new();
    let url = "http://old.example.com/gallery.html";

    assert_eq!(
        decide(url, TagKind::Img, &config(), &fs, &cache),
        Decision::SkipHtmlFile
    );
    assert_eq!(
        decide(url, TagKind::Anchor, &config(), &fs, &cache),
        Decision::NeedsFetch(url.to_string())
    );
}

#[test]
fn test_local_duplicate_maps_to_public_url() {
    let fs = FakeFs::with_files(["/srv/site/wp-content/uploads/2019/05/a.png"]);
    let decision = decide(
        "http://old.example.com/wp-content/uploads/2019/05/a.png",
        TagKind::Img,
        &config(),
        &fs,
        &ResolutionCache::new(),
    );
    assert_eq!(
        decision,
        Decision::ReuseLocal("https://new.example.com/wp-content/uploads/2019/05/a.png".to_string())
    );
    assert_eq!(
        decision.reused_url(),
        Some("https://new.example.com/wp-content/uploads/2019/05/a.png")
    );
}

#[test]
fn test_local_file_outside_content_dir_is_not_a_duplicate() {
    let fs = FakeFs::with_files(["/srv/site/images/a.png"]);
    let decision = decide(
        "http://old.example.com/images/a.png",
        TagKind::Img,
        &config(),
        &fs,
        &ResolutionCache::new(),
    );
    assert_eq!(
        decision,
        Decision::NeedsFetch("http://old.example.com/images/a.png".to_string())
    );
}

#[test]
fn test_local_duplicate_wins_over_session_cache() {
    let fs = FakeFs::with_files(["/srv/site/wp-content/a.png"]);
    let mut cache = ResolutionCache::new();
    cache.insert("http://old.example.com/wp-content/a.png", "https://cdn.local/a.png");

    let decision = decide(
        "http://old.example.com/wp-content/a.png",
        TagKind::Img,
        &config(),
        &fs,
        &cache,
    );
    assert!(matches!(decision, Decision::ReuseLocal(_)));
}

#[test]
fn test_session_cache_keyed_by_canonical_url() {
    let mut cache = ResolutionCache::new();
    cache.insert("http://old.example.com/a.png", "https://cdn.local/a.png");

    let decision = decide(
        "http://old.example.com/a.png?w=640",
        TagKind::Img,
        &config(),
        &FakeFs::default(),
        &cache,
    );
    assert_eq!(
        decision,
        Decision::ReuseSession("https://cdn.local/a.png".to_string())
    );
}

#[test]
fn test_include_params_keeps_query_in_fetch_url() {
    let config = Config {
        include_params: true,
        ..config()
    };
    let decision = decide(
        "http://old.example.com/a.png?w=640",
        TagKind::Img,
        &config,
        &FakeFs::default(),
        &ResolutionCache::new(),
    );
    assert_eq!(
        decision,
        Decision::NeedsFetch("http://old.example.com/a.png?w=640".to_string())
    );
}

#[test]
fn test_import_duplicates_always_fetches() {
    let config = Config {
        import_duplicates: true,
        ..config()
    };
    let fs = FakeFs::with_files(["/srv/site/wp-content/a.png"]);
    let mut cache = ResolutionCache::new();
    cache.insert("http://old.example.com/wp-content/a.png", "https://cdn.local/a.png");

    let decision = decide(
        "http://old.example.com/wp-content/a.png",
        TagKind::Img,
        &config,
        &fs,
        &cache,
    );
    assert_eq!(
        decision,
        Decision::NeedsFetch("http://old.example.com/wp-content/a.png".to_string())
    );
    assert_eq!(decision.reused_url(), None);
}

#[test]
fn test_cache_first_mapping_wins() {
    let mut cache = ResolutionCache::new();
    assert!(cache.is_empty());
    cache.insert("u", "first");
    cache.insert("u", "second");
    assert_eq!(cache.get("u"), Some("first"));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("u"));
    assert!(!cache.contains("v"));
}

#[test]
fn test_layout_public_url() {
    let layout = layout();
    assert_eq!(layout.content_url, "https://new.example.com/wp-content");
    assert_eq!(
        layout.local_path("/wp-content/a.png"),
        std::path::PathBuf::from("/srv/site/wp-content/a.png")
    );
    assert_eq!(
        layout.public_url(std::path::Path::new("/srv/site/wp-content/uploads/a.png")),
        Some("https://new.example.com/wp-content/uploads/a.png".to_string())
    );
    // The content directory itself is not a file URL
    assert_eq!(
        layout.public_url(std::path::Path::new("/srv/site/wp-content")),
        None
    );
}

#[test]
fn test_layout_from_config_defaults() {
    let config = Config {
        site_root: "/srv/site".into(),
        site_url: "https://new.example.com/".to_string(),
        ..config()
    };
    let layout = SiteLayout::from_config(&config);
    assert_eq!(layout.content_dir, std::path::PathBuf::from("/srv/site/wp-content"));
    assert_eq!(layout.content_url, "https://new.example.com/wp-content");
}

#[test]
fn test_local_duplicate_with_encoded_characters() {
    let fs = FakeFs::with_files([
        "/srv/site/wp-content/uploads/my photo.jpg",
        "/srv/site/wp-content/uploads/café.jpg",
    ]);
    for (url, public) in [
        (
            "http://old.example.com/wp-content/uploads/my photo.jpg",
            "https://new.example.com/wp-content/uploads/my photo.jpg",
        ),
        (
            "http://old.example.com/wp-content/uploads/my%20photo.jpg",
            "https://new.example.com/wp-content/uploads/my photo.jpg",
        ),
        (
            "http://old.example.com/wp-content/uploads/café.jpg",
            "https://new.example.com/wp-content/uploads/café.jpg",
        ),
    ] {
        let decision = decide(url, TagKind::Img, &config(), &fs, &ResolutionCache::new());
        assert_eq!(decision, Decision::ReuseLocal(public.to_string()), "{url}");
    }
}

#[test]
fn test_mixed_case_domain_reaches_local_lookup() {
    let fs = FakeFs::with_files(["/srv/site/wp-content/uploads/a.png"]);
    let config = Config {
        domain: "Old.Example.com".to_string(),
        ..config()
    };
    let decision = decide(
        "http://Old.Example.com/wp-content/uploads/a.png",
        TagKind::Img,
        &config,
        &fs,
        &ResolutionCache::new(),
    );
    assert_eq!(
        decision,
        Decision::ReuseLocal("https://new.example.com/wp-content/uploads/a.png".to_string())
    );
}
