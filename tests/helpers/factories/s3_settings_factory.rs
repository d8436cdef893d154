use crate::shared::config::{BucketSettings, S3Settings};

/// Builds storage settings with the usual LANDING_/INTERIM_ variable
/// names. The names point at environment variables, so fixtures stay
/// credential-free.
pub struct S3SettingsFactory {
    prefix: String,
    main_bucket: BucketSettings,
    interim_bucket: BucketSettings,
}

impl S3SettingsFactory {
    pub fn new() -> Self {
        Self {
            prefix: "corporate_data_extraction_projects".to_string(),
            main_bucket: bucket_with_env_prefix("LANDING"),
            interim_bucket: bucket_with_env_prefix("INTERIM"),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_main_bucket(mut self, bucket: BucketSettings) -> Self {
        self.main_bucket = bucket;
        self
    }

    pub fn with_interim_bucket(mut self, bucket: BucketSettings) -> Self {
        self.interim_bucket = bucket;
        self
    }

    pub fn create(self) -> S3Settings {
        S3Settings {
            prefix: self.prefix,
            main_bucket: self.main_bucket,
            interim_bucket: self.interim_bucket,
        }
    }
}

/// Bucket settings whose variable names share one prefix, e.g.
/// `LANDING_AWS_ENDPOINT`.
pub fn bucket_with_env_prefix(env_prefix: &str) -> BucketSettings {
    BucketSettings {
        s3_endpoint: format!("{env_prefix}_AWS_ENDPOINT"),
        s3_access_key: format!("{env_prefix}_AWS_ACCESS_KEY"),
        s3_secret_key: format!("{env_prefix}_AWS_SECRET_KEY"),
        s3_bucket_name: format!("{env_prefix}_AWS_BUCKET_NAME"),
    }
}
