// Shared test helpers for building a throwaway site (database + content dir).

#![allow(dead_code)] // Not every test file uses every helper

use std::path::PathBuf;

use tempfile::TempDir;

use image_backfiller::storage::{init_db_pool_with_path, insert_post, run_migrations, SqliteContentStore};
use image_backfiller::store::DocumentSource;
use image_backfiller::Config;

pub const SITE_URL: &str = "https://new.example.com";

/// A site root with a migrated database next to it.
pub struct TestSite {
    // Kept alive for the duration of the test
    pub _dir: TempDir,
    pub root: PathBuf,
    pub db_path: PathBuf,
}

impl TestSite {
    pub fn content_dir(&self) -> PathBuf {
        self.root.join("wp-content")
    }
}

/// Creates a site and inserts `posts` as `(post_type, content)`, returning
/// the new post ids in order.
pub async fn create_test_site(posts: &[(&str, String)]) -> (TestSite, Vec<i64>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().join("site");
    std::fs::create_dir_all(&root).expect("Failed to create site root");
    let db_path = dir.path().join("site.db");

    let pool = init_db_pool_with_path(&db_path)
        .await
        .expect("Failed to create test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let mut ids = Vec::new();
    for (post_type, content) in posts {
        ids.push(
            insert_post(&pool, post_type, content)
                .await
                .expect("Failed to insert test post"),
        );
    }
    pool.close().await;

    (
        TestSite {
            _dir: dir,
            root,
            db_path,
        },
        ids,
    )
}

/// Run configuration pointing at `site`, without pacing.
pub fn site_config(site: &TestSite, domain: &str) -> Config {
    Config {
        domain: domain.to_string(),
        db_path: site.db_path.clone(),
        site_root: site.root.clone(),
        site_url: SITE_URL.to_string(),
        pacing_ms: 0,
        ..Default::default()
    }
}

/// Current content of a post.
pub async fn post_content(site: &TestSite, id: i64) -> String {
    let pool = init_db_pool_with_path(&site.db_path)
        .await
        .expect("Failed to open test database");
    let store = SqliteContentStore::new(pool.clone());
    let document = store
        .fetch_document(id)
        .await
        .expect("Failed to load post")
        .expect("Post should exist");
    pool.close().await;
    document.content
}
