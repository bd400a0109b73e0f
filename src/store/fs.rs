use std::path::Path;

use super::ExistenceCheck;

/// Checks the local filesystem for already downloaded media.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl ExistenceCheck for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
