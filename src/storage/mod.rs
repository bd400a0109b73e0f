// storage/mod.rs
// Database operations module

mod attachments;
pub mod migrations;
pub mod models;
pub mod pool;
mod posts;
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use attachments::{attachments_for_post, insert_attachment};
pub use migrations::run_migrations;
pub use models::{Attachment, NewAttachment};
pub use pool::init_db_pool_with_path;
pub use posts::{insert_post, SqliteContentStore};
