use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::storage::{ObjectStore, StorageError};

/// In-memory `ObjectStore` double. Records every call; the records are
/// shared across clones, so a test can hand one clone to the code
/// under test and keep another for assertions. With a seed directory
/// set, downloads copy its files into the target directory.
#[derive(Clone, Default)]
pub struct RecordingStore {
    seed_dir: Option<PathBuf>,
    fail_downloads: bool,
    fail_uploads: bool,
    downloads: Rc<RefCell<Vec<(String, PathBuf)>>>,
    uploads: Rc<RefCell<Vec<(PathBuf, String, String)>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed_dir(mut self, dir: &Path) -> Self {
        self.seed_dir = Some(dir.to_path_buf());
        self
    }

    pub fn failing_downloads(mut self) -> Self {
        self.fail_downloads = true;
        self
    }

    pub fn failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    pub fn boxed(&self) -> Box<dyn ObjectStore> {
        Box::new(self.clone())
    }

    pub fn downloads(&self) -> Vec<(String, PathBuf)> {
        self.downloads.borrow().clone()
    }

    pub fn uploads(&self) -> Vec<(PathBuf, String, String)> {
        self.uploads.borrow().clone()
    }
}

impl ObjectStore for RecordingStore {
    fn download_files_in_prefix_to_dir(
        &self,
        remote_prefix: &str,
        local_dir: &Path,
    ) -> Result<usize, StorageError> {
        self.downloads
            .borrow_mut()
            .push((remote_prefix.to_string(), local_dir.to_path_buf()));
        if self.fail_downloads {
            return Err(StorageError::UnexpectedStatus {
                status: 503,
                context: format!("GET {remote_prefix}"),
            });
        }
        let Some(seed) = &self.seed_dir else {
            return Ok(0);
        };
        fs::create_dir_all(local_dir)?;
        let mut fetched = 0;
        for entry in fs::read_dir(seed)? {
            let entry = entry?;
            if entry.path().is_file() {
                fs::copy(entry.path(), local_dir.join(entry.file_name()))?;
                fetched += 1;
            }
        }
        Ok(fetched)
    }

    fn upload_file_to_s3(
        &self,
        filepath: &Path,
        s3_prefix: &str,
        s3_key: &str,
    ) -> Result<(), StorageError> {
        self.uploads.borrow_mut().push((
            filepath.to_path_buf(),
            s3_prefix.to_string(),
            s3_key.to_string(),
        ));
        if self.fail_uploads {
            return Err(StorageError::UnexpectedStatus {
                status: 503,
                context: format!("PUT {s3_prefix}/{s3_key}"),
            });
        }
        Ok(())
    }
}
