use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::pipeline::errors::RunGuardError;

/// Marker-file guard: one pipeline invocation owns a working root at a
/// time. Dropping the guard removes the marker, a crash leaves it
/// behind for the operator to clear.
#[derive(Debug)]
pub struct RunGuard {
    marker: PathBuf,
}

impl RunGuard {
    /// Creates the marker file, failing when it already exists. The
    /// create is atomic, so two racing invocations cannot both win.
    pub fn acquire(marker: &Path) -> Result<Self, RunGuardError> {
        if let Some(parent) = marker.parent() {
            fs::create_dir_all(parent)?;
        }
        match OpenOptions::new().write(true).create_new(true).open(marker) {
            Ok(_) => {
                debug!(
                    target: "kpidata::run_guard",
                    marker = %marker.display(),
                    "acquired run marker"
                );
                Ok(Self {
                    marker: marker.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(RunGuardError::AlreadyRunning(marker.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.marker
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.marker) {
            warn!(
                target: "kpidata::run_guard",
                error = %e,
                marker = %self.marker.display(),
                "failed to remove run marker"
            );
        }
    }
}
