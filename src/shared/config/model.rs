use std::path::Path;

use serde::{Deserialize, Serialize};

/// Project-level training settings, loaded from the per-project
/// `settings.yaml`. Only the sections this pipeline consumes are modeled;
/// the training framework owns the rest of the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainSettings {
    pub general: GeneralSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    pub train_relevance: TrainModelSettings,
    pub train_kpi: TrainModelSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Stage inputs/outputs through the remote object store.
    pub s3_usage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainModelSettings {
    pub output_model_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

/// Remote-storage settings, loaded from `s3_settings.yaml`. The bucket
/// sections hold the *names* of environment variables, never credential
/// values; resolution happens when a store client is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Settings {
    pub prefix: String,
    pub main_bucket: BucketSettings,
    pub interim_bucket: BucketSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketSettings {
    pub s3_endpoint: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub s3_bucket_name: String,
}

impl S3Settings {
    /// Remote root for one project's data tree: `{prefix}/{project}/data`.
    pub fn project_data_prefix(&self, project_name: &str) -> String {
        format!("{}/{}/data", self.prefix.trim_end_matches('/'), project_name)
    }

    /// Where the upstream relevance-inference step publishes its CSVs.
    pub fn relevance_output_prefix(&self, project_name: &str) -> String {
        format!(
            "{}/output/RELEVANCE/Text",
            self.project_data_prefix(project_name)
        )
    }

    /// Where the merged training file is staged for the KPI trainer.
    pub fn interim_ml_prefix(&self, project_name: &str) -> String {
        format!("{}/interim/ml", self.project_data_prefix(project_name))
    }

    /// Where train-info summaries are archived next to the models.
    pub fn models_prefix(&self, project_name: &str) -> String {
        format!("{}/{}/models", self.prefix.trim_end_matches('/'), project_name)
    }
}

pub fn load_main_settings(path: &Path) -> Result<MainSettings, config::ConfigError> {
    let settings: MainSettings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}

pub fn load_s3_settings(path: &Path) -> Result<S3Settings, config::ConfigError> {
    let settings: S3Settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
