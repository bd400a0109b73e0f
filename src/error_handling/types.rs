//! Error type definitions.
//!
//! This module defines all error types and counted error categories used
//! throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Invalid run configuration. Fatal: no post is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--domain` was empty.
    #[error("A source domain is required (--domain)")]
    MissingDomain,

    /// `--domain` was a URL or contained a path.
    #[error("Invalid domain '{0}': pass a bare host name such as old.example.com")]
    InvalidDomain(String),

    /// One entry of `--posts` was not an integer.
    #[error("Invalid post id '{0}' in --posts")]
    InvalidPostId(String),

    /// `--posts` was given but named no post.
    #[error("No post id in --posts '{0}'")]
    EmptyPostList(String),

    /// `--site-url` could not be parsed.
    #[error("Invalid site URL '{0}'")]
    InvalidSiteUrl(String),
}

/// Failure to import one media file. Recovered per reference.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The media host answered with a non-success status.
    #[error("HTTP status {status} for {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The response had no body.
    #[error("Empty response body for {0}")]
    EmptyBody(String),

    /// The response body exceeded the media size limit.
    #[error("Media at {url} exceeds {limit} bytes")]
    TooLarge {
        /// Requested URL
        url: String,
        /// Size limit in bytes
        limit: usize,
    },

    /// Writing the file into the uploads directory failed.
    #[error("Failed to write media file: {0}")]
    Io(#[from] std::io::Error),

    /// Recording the attachment failed.
    #[error("Failed to record attachment: {0}")]
    Database(#[from] sqlx::Error),
}

/// Categories of per-reference and per-post failures counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Media import failures
    MediaHttpStatusError,
    MediaRequestError,
    MediaEmptyBody,
    MediaTooLarge,
    MediaWriteError,
    MediaRecordError,
    MediaNoUrl,
    // Content store failures
    PostPersistError,
    PostNotFound,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MediaHttpStatusError => "Media HTTP status error",
            ErrorType::MediaRequestError => "Media request error",
            ErrorType::MediaEmptyBody => "Media empty body",
            ErrorType::MediaTooLarge => "Media too large",
            ErrorType::MediaWriteError => "Media write error",
            ErrorType::MediaRecordError => "Attachment record error",
            ErrorType::MediaNoUrl => "Media store returned no URL",
            ErrorType::PostPersistError => "Post persist error",
            ErrorType::PostNotFound => "Post not found",
        }
    }
}

impl From<&MediaError> for ErrorType {
    fn from(error: &MediaError) -> Self {
        match error {
            MediaError::HttpStatus { .. } => ErrorType::MediaHttpStatusError,
            MediaError::Request(_) => ErrorType::MediaRequestError,
            MediaError::EmptyBody(_) => ErrorType::MediaEmptyBody,
            MediaError::TooLarge { .. } => ErrorType::MediaTooLarge,
            MediaError::Io(_) => ErrorType::MediaWriteError,
            MediaError::Database(_) => ErrorType::MediaRecordError,
        }
    }
}
