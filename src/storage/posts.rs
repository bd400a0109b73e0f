//! SQLite-backed post store.

use std::sync::Arc;

use log::{debug, warn};
use sqlx::{Row, SqlitePool};

use crate::config::POST_TYPE_POST;
use crate::error_handling::DatabaseError;
use crate::models::{Document, DocumentId};
use crate::store::{ContentStore, DocumentSource};

/// Reads and updates rows of the `posts` table.
#[derive(Clone)]
pub struct SqliteContentStore {
    pool: Arc<SqlitePool>,
}

impl SqliteContentStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

impl DocumentSource for SqliteContentStore {
    /// Ids of `post` rows whose content contains `domain`, ordered by id.
    async fn list_candidate_documents(
        &self,
        domain: &str,
    ) -> Result<Vec<DocumentId>, DatabaseError> {
        let pattern = format!("%{}%", escape_like(domain));
        let rows = sqlx::query(
            "SELECT id FROM posts
             WHERE post_type = ? AND post_content LIKE ? ESCAPE '\\'
             ORDER BY id",
        )
        .bind(POST_TYPE_POST)
        .bind(&pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        let ids = rows
            .iter()
            .map(|row| row.try_get::<i64, _>("id"))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{} posts mention {domain}", ids.len());
        Ok(ids)
    }

    async fn fetch_document(&self, id: DocumentId) -> Result<Option<Document>, DatabaseError> {
        let row = sqlx::query("SELECT post_content FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => {
                let content: String = row.try_get("post_content")?;
                Ok(Some(Document::new(id, content)))
            }
            None => Ok(None),
        }
    }
}

impl ContentStore for SqliteContentStore {
    async fn persist(&self, id: DocumentId, content: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE posts SET post_content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            warn!("Post #{id} no longer exists; update discarded");
        }
        Ok(())
    }
}

/// Inserts a post and returns its id.
pub async fn insert_post(
    pool: &SqlitePool,
    post_type: &str,
    content: &str,
) -> Result<DocumentId, DatabaseError> {
    let id = sqlx::query(
        "INSERT INTO posts (post_type, post_content) VALUES (?, ?)
         RETURNING id",
    )
    .bind(post_type)
    .bind(content)
    .fetch_one(pool)
    .await?
    .try_get::<i64, _>("id")?;
    Ok(id)
}

/// Escapes `LIKE` wildcards (`%`, `_`) and the escape character itself.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
