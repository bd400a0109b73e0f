//! Tag selection.
//!
//! Maps a tag mode to an ordered list of scan passes and enumerates, for one
//! pass, the elements of a parsed post that carry a URL attribute.
//!
//! Parsing is tolerant: malformed markup never fails, parse errors are only
//! traced.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::TagMode;
use crate::models::{Reference, TagKind};

/// One scan of a post for a single tag and the attribute holding its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pass {
    pub tag: TagKind,
    pub attribute: &'static str,
}

const IMG_PASS: Pass = Pass {
    tag: TagKind::Img,
    attribute: "src",
};
const ANCHOR_PASS: Pass = Pass {
    tag: TagKind::Anchor,
    attribute: "href",
};
const INPUT_PASS: Pass = Pass {
    tag: TagKind::Input,
    attribute: "src",
};

static ALL_PASSES: [Pass; 2] = [IMG_PASS, ANCHOR_PASS];
static IMG_PASSES: [Pass; 1] = [IMG_PASS];
static ANCHOR_PASSES: [Pass; 1] = [ANCHOR_PASS];
static INPUT_PASSES: [Pass; 1] = [INPUT_PASS];

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("Failed to parse img selector - this is a bug"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("Failed to parse a selector - this is a bug"));
static INPUT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("input").expect("Failed to parse input selector - this is a bug")
});

/// Ordered passes for a tag mode.
///
/// `All` is `img` then `a`; every other mode is a single pass. `input` is
/// never part of `All`.
pub fn passes(mode: TagMode) -> &'static [Pass] {
    match mode {
        TagMode::All => &ALL_PASSES,
        TagMode::Img => &IMG_PASSES,
        TagMode::Anchor => &ANCHOR_PASSES,
        TagMode::Input => &INPUT_PASSES,
    }
}

/// Attribute carrying the URL for a tag.
pub fn attribute_for(tag: TagKind) -> &'static str {
    match tag {
        TagKind::Img => IMG_PASS.attribute,
        TagKind::Anchor => ANCHOR_PASS.attribute,
        TagKind::Input => INPUT_PASS.attribute,
    }
}

fn selector_for(tag: TagKind) -> &'static Selector {
    match tag {
        TagKind::Img => &IMG_SELECTOR,
        TagKind::Anchor => &ANCHOR_SELECTOR,
        TagKind::Input => &INPUT_SELECTOR,
    }
}

/// Parses post content, swallowing markup errors.
pub fn parse_content(content: &str) -> Html {
    let html = Html::parse_document(content);
    if !html.errors.is_empty() {
        log::trace!("Ignored {} markup errors while parsing", html.errors.len());
    }
    html
}

/// Every element of `tag` with a non-empty URL attribute, in document order.
///
/// Elements without the attribute are skipped and noted at debug level.
pub fn enumerate_elements(html: &Html, tag: TagKind) -> Vec<Reference> {
    let attribute = attribute_for(tag);
    let mut references = Vec::new();

    for element in html.select(selector_for(tag)) {
        match element.value().attr(attribute) {
            Some(url) if !url.trim().is_empty() => references.push(Reference {
                url: url.to_string(),
                tag,
                attribute,
            }),
            Some(_) => log::debug!("\t-- Skipping <{tag}>: empty {attribute} attribute."),
            None => log::debug!("\t-- Skipping <{tag}>: no {attribute} attribute."),
        }
    }

    references
}

/// Parses the content once and enumerates every pass of `mode` against it.
///
/// All passes see the original markup; rewrites made during an earlier pass
/// do not change what a later pass finds.
pub fn scan(content: &str, mode: TagMode) -> Vec<(Pass, Vec<Reference>)> {
    let html = parse_content(content);
    passes(mode)
        .iter()
        .map(|pass| (*pass, enumerate_elements(&html, pass.tag)))
        .collect()
}
