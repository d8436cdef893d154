use std::env;
use std::fmt;
use std::path::Path;

use crate::shared::config::BucketSettings;
use crate::storage::errors::StorageError;

/// Transfer capability the pipeline stages through. Implementations
/// move whole prefixes down and single files up; nothing else is
/// needed for the merge and train-info flows.
pub trait ObjectStore {
    /// Downloads every object under `remote_prefix` into `local_dir`,
    /// flat, named by key basename. Returns the number of objects
    /// fetched.
    fn download_files_in_prefix_to_dir(
        &self,
        remote_prefix: &str,
        local_dir: &Path,
    ) -> Result<usize, StorageError>;

    /// Uploads one local file as `{s3_prefix}/{s3_key}`.
    fn upload_file_to_s3(
        &self,
        filepath: &Path,
        s3_prefix: &str,
        s3_key: &str,
    ) -> Result<(), StorageError>;
}

/// Credentials for one bucket, resolved from the process environment.
/// The settings file names the variables, never the values.
#[derive(Clone)]
pub struct BucketCredentials {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

impl BucketCredentials {
    /// Reads the variables named by `settings`. The error carries the
    /// variable name only, never a value.
    pub fn from_env(settings: &BucketSettings) -> Result<Self, StorageError> {
        Ok(Self {
            endpoint: require_env(&settings.s3_endpoint)?,
            access_key: require_env(&settings.s3_access_key)?,
            secret_key: require_env(&settings.s3_secret_key)?,
            bucket: require_env(&settings.s3_bucket_name)?,
        })
    }
}

// Key material stays out of Debug output and logs.
impl fmt::Debug for BucketCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketCredentials")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .finish()
    }
}

fn require_env(name: &str) -> Result<String, StorageError> {
    env::var(name).map_err(|_| StorageError::MissingEnvVar(name.to_string()))
}
