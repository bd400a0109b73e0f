// storage/models.rs
// Database models and types

use crate::models::DocumentId;

/// An imported media file, as stored in the `attachments` table.
///
/// `old_url` is the source URL the file was fetched from and `new_url` the
/// URL it replaced in post content; `created_at` is milliseconds since the
/// Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: i64,
    pub post_id: DocumentId,
    pub file_path: String,
    pub url: String,
    pub old_url: String,
    pub new_url: String,
    pub created_at: i64,
}

/// Values for a new `attachments` row.
#[derive(Debug, Clone, Copy)]
pub struct NewAttachment<'a> {
    pub post_id: DocumentId,
    pub file_path: &'a str,
    pub url: &'a str,
    pub old_url: &'a str,
}
