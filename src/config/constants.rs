//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including pacing, retry and size limits, and media naming rules.

use std::time::Duration;

/// Delay between two documents, in milliseconds.
///
/// Keeps the request rate against the media host bounded. Overridable with
/// `--pacing-ms`.
pub const PACING_DELAY_MS: u64 = 5;

/// Default per-request timeout for media downloads, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default SQLite database holding the posts and attachments tables.
pub const DEFAULT_DB_PATH: &str = "./site.db";

/// Default public URL of the site receiving the media.
pub const DEFAULT_SITE_URL: &str = "http://localhost";

/// Name of the content directory under the site root, and of its URL segment.
pub const CONTENT_DIR_NAME: &str = "wp-content";

/// Uploads directory under the content directory.
pub const UPLOADS_DIR_NAME: &str = "uploads";

/// Default User-Agent string for media downloads.
pub const DEFAULT_USER_AGENT: &str = concat!("image_backfiller/", env!("CARGO_PKG_VERSION"));

/// Post type scanned when no explicit id list is given.
pub const POST_TYPE_POST: &str = "post";

// Media download limits
/// Maximum media body size in bytes (64MB)
/// Larger downloads are abandoned to keep a single reference from exhausting memory
pub const MAX_MEDIA_BYTES: usize = 64 * 1024 * 1024;

// Retry strategy
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 10;
/// Maximum number of attempts per download (initial attempt + 2 retries)
pub const RETRY_MAX_ATTEMPTS: usize = 3;

/// HTTP 429, retried with backoff like 5xx responses
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Extension appended to uploads whose URL carries no recognised media extension.
pub const PLACEHOLDER_EXTENSION: &str = "placeholder";

/// Extensions accepted as media attachments without the placeholder suffix.
pub const ALLOWED_MEDIA_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "jpe", "gif", "png", "bmp", "tif", "tiff", "ico", "webp", "avif", "heic",
    "svg", "asf", "asx", "wmv", "wmx", "wm", "avi", "divx", "flv", "mov", "qt", "mpeg", "mpg",
    "mpe", "mp4", "m4v", "ogv", "webm", "mkv", "3gp", "3g2", "txt", "asc", "c", "cc", "h",
    "srt", "csv", "tsv", "ics", "rtx", "css", "vtt", "mp3", "m4a", "m4b", "aac", "ra", "ram",
    "wav", "ogg", "oga", "flac", "mid", "midi", "wma", "wax", "mka", "rtf", "pdf", "doc",
    "pot", "pps", "ppt", "wri", "xla", "xls", "xlt", "xlw", "mdb", "mpp", "docx", "docm",
    "dotx", "dotm", "xlsx", "xlsm", "xlsb", "xltx", "xltm", "xlam", "pptx", "pptm", "ppsx",
    "ppsm", "potx", "potm", "ppam", "sldx", "sldm", "onetoc", "onetoc2", "onetmp", "onepkg",
    "oxps", "xps", "odt", "odp", "ods", "odg", "odc", "odb", "odf", "wp", "wpd", "key",
    "numbers", "pages", "zip", "gz", "gzip", "rar", "7z", "tar",
];

/// Pacing delay as a `Duration`.
pub const PACING_DELAY: Duration = Duration::from_millis(PACING_DELAY_MS);
