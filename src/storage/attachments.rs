//! Attachment record insertion and lookup.

use sqlx::{Row, SqlitePool};

use crate::models::DocumentId;

use super::models::{Attachment, NewAttachment};

/// Records an imported file and returns the attachment id.
///
/// `new_url` is the public URL of the file, the same value as `url`.
pub async fn insert_attachment(
    pool: &SqlitePool,
    attachment: &NewAttachment<'_>,
) -> Result<i64, sqlx::Error> {
    let created_at = chrono::Utc::now().timestamp_millis();
    sqlx::query(
        "INSERT INTO attachments (
            post_id, file_path, url, old_url, new_url, created_at
        ) VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(attachment.post_id)
    .bind(attachment.file_path)
    .bind(attachment.url)
    .bind(attachment.old_url)
    .bind(attachment.url)
    .bind(created_at)
    .fetch_one(pool)
    .await?
    .try_get::<i64, _>("id")
}

/// Attachments owned by a post, oldest first.
pub async fn attachments_for_post(
    pool: &SqlitePool,
    post_id: DocumentId,
) -> Result<Vec<Attachment>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, post_id, file_path, url, old_url, new_url, created_at
         FROM attachments WHERE post_id = ? ORDER BY id",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Attachment {
                id: row.try_get("id")?,
                post_id: row.try_get("post_id")?,
                file_path: row.try_get("file_path")?,
                url: row.try_get("url")?,
                old_url: row.try_get("old_url")?,
                new_url: row.try_get("new_url")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_insert_and_list_attachments() {
        let pool = create_test_pool().await;
        let id = insert_attachment(
            &pool,
            &NewAttachment {
                post_id: 3,
                file_path: "/srv/site/wp-content/uploads/2024/01/a.png",
                url: "https://new.example.com/wp-content/uploads/2024/01/a.png",
                old_url: "http://old.example.com/a.png",
            },
        )
        .await
        .expect("Failed to insert attachment");

        let attachments = attachments_for_post(&pool, 3)
            .await
            .expect("Failed to list attachments");
        assert_eq!(attachments.len(), 1);
        let attachment = &attachments[0];
        assert_eq!(attachment.id, id);
        assert_eq!(attachment.old_url, "http://old.example.com/a.png");
        assert_eq!(attachment.new_url, attachment.url);
        assert!(attachment.created_at > 0);

        assert!(attachments_for_post(&pool, 4)
            .await
            .expect("Failed to list attachments")
            .is_empty());
    }
}
