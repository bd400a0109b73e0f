//! Media import.
//!
//! `HttpMediaStore` downloads a remote file, stores it under the content
//! directory's dated uploads folder and records an attachment pointing back
//! at the source URL.

mod filename;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use sqlx::SqlitePool;
use tokio::io::AsyncWriteExt;

use crate::config::{HTTP_STATUS_TOO_MANY_REQUESTS, MAX_MEDIA_BYTES, UPLOADS_DIR_NAME};
use crate::error_handling::{get_retry_strategy, MediaError};
use crate::models::DocumentId;
use crate::resolve::SiteLayout;
use crate::storage::{insert_attachment, NewAttachment};
use crate::store::MediaStore;

pub use filename::{is_allowed_extension, suggested_filename};

/// Upper bound on `-N` suffixes tried for one filename.
const MAX_NAME_SUFFIX: usize = 10_000;

/// Imports media over HTTP into the local uploads directory.
pub struct HttpMediaStore {
    client: Arc<reqwest::Client>,
    pool: Arc<SqlitePool>,
    layout: SiteLayout,
    dry_run: bool,
}

impl HttpMediaStore {
    /// # Arguments
    ///
    /// * `client` - Client carrying the timeout and user agent
    /// * `pool` - Database holding the `attachments` table
    /// * `layout` - Content directory and its public URL
    /// * `dry_run` - Plan URLs only: no request, no file, no attachment row
    pub fn new(
        client: Arc<reqwest::Client>,
        pool: Arc<SqlitePool>,
        layout: SiteLayout,
        dry_run: bool,
    ) -> Self {
        Self {
            client,
            pool,
            layout,
            dry_run,
        }
    }

    /// Downloads `url`, retrying transient failures with exponential backoff.
    async fn download_with_retry(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        tokio_retry::RetryIf::spawn(
            get_retry_strategy(),
            || self.download(url),
            is_retriable_error,
        )
        .await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        // Protocol-relative references are fetched over plain http
        let request_url = if url.starts_with("//") {
            format!("http:{url}")
        } else {
            url.to_string()
        };

        let response = self.client.get(&request_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if response
            .content_length()
            .is_some_and(|len| len > MAX_MEDIA_BYTES as u64)
        {
            return Err(MediaError::TooLarge {
                url: url.to_string(),
                limit: MAX_MEDIA_BYTES,
            });
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(MediaError::EmptyBody(url.to_string()));
        }
        if body.len() > MAX_MEDIA_BYTES {
            return Err(MediaError::TooLarge {
                url: url.to_string(),
                limit: MAX_MEDIA_BYTES,
            });
        }
        Ok(body.to_vec())
    }

    /// Writes `body` into the freshly created `file` and records the attachment.
    ///
    /// The file handle is closed on return, whatever the outcome.
    async fn record_upload(
        &self,
        mut file: tokio::fs::File,
        path: &Path,
        body: &[u8],
        segments: &[String],
        url: &str,
        owner: DocumentId,
    ) -> Result<String, MediaError> {
        file.write_all(body).await?;
        file.flush().await?;
        drop(file);

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let new_url = self.public_url(segments, &file_name);
        let file_path = path.to_string_lossy().into_owned();

        insert_attachment(
            &self.pool,
            &NewAttachment {
                post_id: owner,
                file_path: file_path.as_str(),
                url: new_url.as_str(),
                old_url: url,
            },
        )
        .await?;
        Ok(new_url)
    }

    fn public_url(&self, segments: &[String], file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.layout.content_url,
            segments.join("/"),
            file_name
        )
    }
}

impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        url: &str,
        suggested_filename: &str,
        owner: DocumentId,
    ) -> Result<String, MediaError> {
        let segments = upload_segments(Utc::now());
        let dir = segments
            .iter()
            .fold(self.layout.content_dir.clone(), |path, s| path.join(s));

        if self.dry_run {
            let planned = self.public_url(&segments, suggested_filename);
            debug!("\t-- Dry run: {url} would be imported as {planned}");
            return Ok(planned);
        }

        let body = self.download_with_retry(url).await?;

        tokio::fs::create_dir_all(&dir).await?;
        let (path, file) = create_unique_file(&dir, suggested_filename).await?;
        match self.record_upload(file, &path, &body, &segments, url, owner).await {
            Ok(new_url) => {
                debug!("\t-- Imported {url} as {new_url}");
                Ok(new_url)
            }
            Err(e) => {
                // No file is kept without its attachment row
                let _ = tokio::fs::remove_file(&path).await;
                Err(e)
            }
        }
    }
}

/// Whether a failed download is worth another attempt.
///
/// Rate limiting, server errors and transport failures are transient;
/// everything else (4xx, empty or oversized bodies) is permanent.
fn is_retriable_error(error: &MediaError) -> bool {
    match error {
        MediaError::HttpStatus { status, .. } => {
            *status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(status)
        }
        MediaError::Request(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

/// Path segments of the dated uploads directory: `uploads/YYYY/MM`.
fn upload_segments(now: DateTime<Utc>) -> [String; 3] {
    [
        UPLOADS_DIR_NAME.to_string(),
        now.format("%Y").to_string(),
        now.format("%m").to_string(),
    ]
}

/// Creates `dir/filename`, or `dir/stem-N.ext` for the first free `N`.
async fn create_unique_file(
    dir: &Path,
    filename: &str,
) -> std::io::Result<(PathBuf, tokio::fs::File)> {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };

    for n in 0..MAX_NAME_SUFFIX {
        let candidate = match (n, extension) {
            (0, _) => filename.to_string(),
            (n, Some(ext)) => format!("{stem}-{n}.{ext}"),
            (n, None) => format!("{stem}-{n}"),
        };
        let path = dir.join(&candidate);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free name for {filename} in {}", dir.display()),
    ))
}
