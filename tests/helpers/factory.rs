pub use super::factories::{MainSettingsFactory, RelevanceOutputFactory, S3SettingsFactory};
pub use super::recording_store::RecordingStore;

pub struct Factory;

impl Factory {
    pub fn relevance_output() -> RelevanceOutputFactory {
        RelevanceOutputFactory::new()
    }

    pub fn main_settings() -> MainSettingsFactory {
        MainSettingsFactory::new()
    }

    pub fn s3_settings() -> S3SettingsFactory {
        S3SettingsFactory::new()
    }

    pub fn recording_store() -> RecordingStore {
        RecordingStore::new()
    }
}
