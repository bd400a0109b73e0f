//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    CONTENT_DIR_NAME, DEFAULT_DB_PATH, DEFAULT_SITE_URL, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, PACING_DELAY_MS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which tags to scan in the post content.
///
/// `All` runs an `img` pass followed by an `a` pass. `Input` is only ever
/// scanned when selected on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TagMode {
    /// `img` pass, then `a` pass
    All,
    /// `<img src>` only
    Img,
    /// `<input src>` only
    Input,
    /// `<a href>` only
    #[value(name = "a")]
    Anchor,
}

/// URL schemes accepted for rewriting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Protocol {
    /// Both `http` and `https`
    Both,
    /// Only `http`
    Http,
    /// Only `https`
    Https,
}

impl Protocol {
    /// Returns whether a URL scheme passes this filter.
    ///
    /// Scheme-less (protocol-relative) URLs pass every filter.
    pub fn accepts(&self, scheme: Option<&str>) -> bool {
        match (self, scheme) {
            (_, None) | (Protocol::Both, _) => true,
            (Protocol::Http, Some(s)) => s.eq_ignore_ascii_case("http"),
            (Protocol::Https, Some(s)) => s.eq_ignore_ascii_case("https"),
        }
    }
}

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "image_backfiller", version, about)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Imports external images from another site.
    Get(GetArgs),
}

/// Options of the `get` subcommand.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Domain to import images from
    #[arg(long)]
    pub domain: String,

    /// The tags to check for in the post content ("all" checks img, then a)
    #[arg(long, value_enum, default_value_t = TagMode::All)]
    pub tags: TagMode,

    /// Protocol of image links to check
    #[arg(long, value_enum, default_value_t = Protocol::Both)]
    pub protocol: Protocol,

    /// Number of posts to update. Only posts where an image is backfilled are counted
    #[arg(long)]
    pub num_posts: Option<usize>,

    /// Comma-separated list of post IDs to update
    #[arg(long)]
    pub posts: Option<String>,

    /// Import images that already exist instead of linking to the existing copy
    #[arg(long)]
    pub import_duplicates: bool,

    /// Import images including their query parameters in the filename
    #[arg(long)]
    pub include_params: bool,

    /// Run without downloading media or saving posts
    #[arg(long)]
    pub dry_run: bool,

    /// Show detailed logs
    #[arg(long)]
    pub verbose: bool,

    /// SQLite database holding the posts table
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Site root directory (existing media paths are resolved against it)
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    /// Content directory (defaults to <site-root>/wp-content)
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Public URL of the site
    #[arg(long, default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    /// Public URL of the content directory (defaults to <site-url>/wp-content)
    #[arg(long)]
    pub content_url: Option<String>,

    /// Per-download timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Delay between posts in milliseconds
    #[arg(long, default_value_t = PACING_DELAY_MS)]
    pub pacing_ms: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration for one backfill run (no CLI dependencies).
///
/// Immutable for the duration of a run. Can be constructed programmatically:
///
/// ```no_run
/// use image_backfiller::Config;
///
/// let config = Config {
///     domain: "old.example.com".to_string(),
///     dry_run: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain whose media is imported
    pub domain: String,

    /// Tags to scan
    pub tags: TagMode,

    /// Accepted URL schemes
    pub protocol: Protocol,

    /// Explicit post ids, processed in this order
    pub post_ids: Option<Vec<i64>>,

    /// Stop after this many posts were modified (`None` or 0 = unlimited)
    pub max_modified: Option<usize>,

    /// Import media even when a local copy exists
    pub import_duplicates: bool,

    /// Keep query parameters instead of importing the original image
    pub include_params: bool,

    /// Rewrite in memory only
    pub dry_run: bool,

    /// Detailed logs
    pub verbose: bool,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Site root directory
    pub site_root: PathBuf,

    /// Content directory override
    pub content_dir: Option<PathBuf>,

    /// Public site URL
    pub site_url: String,

    /// Public content URL override
    pub content_url: Option<String>,

    /// Per-download timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Delay between posts in milliseconds
    pub pacing_ms: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            tags: TagMode::All,
            protocol: Protocol::Both,
            post_ids: None,
            max_modified: None,
            import_duplicates: false,
            include_params: false,
            dry_run: false,
            verbose: false,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            site_root: PathBuf::from("."),
            content_dir: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            content_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pacing_ms: PACING_DELAY_MS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks the settings that make a run impossible.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDomain` for an empty domain and
    /// `ConfigError::InvalidDomain` when the domain is not a bare host name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_domain(&self.domain)?;
        if url::Url::parse(&self.site_url).is_err() {
            return Err(ConfigError::InvalidSiteUrl(self.site_url.clone()));
        }
        if matches!(&self.post_ids, Some(ids) if ids.is_empty()) {
            return Err(ConfigError::EmptyPostList(String::new()));
        }
        Ok(())
    }

    /// Validates and stores the domain in the form hosts are compared in.
    ///
    /// # Errors
    ///
    /// Same as [`Config::validate`].
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.validate()?;
        self.domain = normalize_domain(&self.domain)?;
        Ok(self)
    }

    /// Modified-post limit, with 0 meaning unlimited.
    pub fn modified_limit(&self) -> Option<usize> {
        self.max_modified.filter(|&n| n > 0)
    }

    /// Log level after applying `verbose`.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.verbose {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        }
    }

    /// Content directory, defaulting to `<site_root>/wp-content`.
    pub fn resolved_content_dir(&self) -> PathBuf {
        self.content_dir
            .clone()
            .unwrap_or_else(|| self.site_root.join(CONTENT_DIR_NAME))
    }

    /// Public URL of the content directory, without a trailing slash.
    pub fn resolved_content_url(&self) -> String {
        match &self.content_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "{}/{}",
                self.site_url.trim_end_matches('/'),
                CONTENT_DIR_NAME
            ),
        }
    }
}

impl TryFrom<GetArgs> for Config {
    type Error = ConfigError;

    fn try_from(args: GetArgs) -> Result<Self, Self::Error> {
        let post_ids = args.posts.as_deref().map(parse_post_ids).transpose()?;
        Config {
            domain: args.domain,
            tags: args.tags,
            protocol: args.protocol,
            post_ids,
            max_modified: args.num_posts,
            import_duplicates: args.import_duplicates,
            include_params: args.include_params,
            dry_run: args.dry_run,
            verbose: args.verbose,
            db_path: args.db_path,
            site_root: args.site_root,
            content_dir: args.content_dir,
            site_url: args.site_url,
            content_url: args.content_url,
            timeout_seconds: args.timeout_seconds,
            user_agent: args.user_agent,
            pacing_ms: args.pacing_ms,
            log_level: args.log_level,
            log_format: args.log_format,
        }
        .normalized()
    }
}

/// Trims a domain and converts it to the host form the `url` crate produces:
/// ASCII lowercase, internationalized names in punycode.
///
/// # Errors
///
/// Returns `ConfigError::MissingDomain` for a blank domain and
/// `ConfigError::InvalidDomain` for anything beyond a bare host name.
pub fn normalize_domain(domain: &str) -> Result<String, ConfigError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingDomain);
    }
    let invalid = || ConfigError::InvalidDomain(domain.to_string());
    if trimmed.contains("://")
        || trimmed.contains(['/', '?', '#', '@'])
        || trimmed.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    let parsed = url::Url::parse(&format!("http://{trimmed}/")).map_err(|_| invalid())?;
    if parsed.port().is_some() {
        return Err(invalid());
    }
    parsed.host_str().map(str::to_string).ok_or_else(invalid)
}

/// Parses a comma-separated post id list, keeping its order.
///
/// Blank entries (`"1,,2"`, trailing commas) are ignored.
///
/// # Errors
///
/// Returns `ConfigError::InvalidPostId` for the first entry that is not an
/// integer and `ConfigError::EmptyPostList` when no entry is left.
pub fn parse_post_ids(list: &str) -> Result<Vec<i64>, ConfigError> {
    let ids = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ConfigError::InvalidPostId(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Err(ConfigError::EmptyPostList(list.to_string()));
    }
    Ok(ids)
}
