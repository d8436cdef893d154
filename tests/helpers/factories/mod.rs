pub mod main_settings_factory;
pub mod relevance_output_factory;
pub mod s3_settings_factory;

pub use main_settings_factory::MainSettingsFactory;
pub use relevance_output_factory::RelevanceOutputFactory;
pub use s3_settings_factory::{S3SettingsFactory, bucket_with_env_prefix};

pub use super::recording_store::RecordingStore;

#[cfg(test)]
mod main_settings_factory_test;
#[cfg(test)]
mod relevance_output_factory_test;
#[cfg(test)]
mod s3_settings_factory_test;
