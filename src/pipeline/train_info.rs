use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pipeline::errors::SnapshotError;
use crate::pipeline::paths::ProjectPaths;
use crate::shared::config::{MainSettings, S3Settings};
use crate::storage::ObjectStore;

/// Record of one training run, written next to the models as JSON so
/// it stays readable without the pipeline installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainInfo {
    pub project_name: String,
    pub created_at: DateTime<Utc>,
    pub relevance_model: String,
    pub kpi_model: String,
    pub train_settings: MainSettings,
    pub pdfs_used: Vec<String>,
    pub annotation_files: Vec<String>,
    pub kpi_mapping_files: Vec<String>,
}

impl TrainInfo {
    /// Snapshot file name, keyed by the two model names it describes.
    pub fn file_name(relevance_model: &str, kpi_model: &str) -> String {
        format!("SUMMARY_REL_{relevance_model}_KPI_{kpi_model}.json")
    }
}

/// Snapshots what went into a training run: which PDFs, annotations
/// and KPI mappings were present, plus the settings used. With staging
/// enabled the three input trees are refreshed from the main bucket
/// first and the snapshot is uploaded next to the models afterwards.
/// Returns the path of the written snapshot.
pub fn save_train_info(
    project_name: &str,
    s3_usage: bool,
    store_main: Option<&dyn ObjectStore>,
    main_settings: &MainSettings,
    s3_settings: &S3Settings,
    project_paths: &ProjectPaths,
) -> Result<PathBuf, SnapshotError> {
    let store = match (s3_usage, store_main) {
        (false, _) => None,
        (true, Some(store)) => Some(store),
        (true, None) => return Err(SnapshotError::MissingStore),
    };

    if let Some(store) = store {
        let data_prefix = s3_settings.project_data_prefix(project_name);
        store.download_files_in_prefix_to_dir(
            &format!("{data_prefix}/input/kpi_mapping"),
            &project_paths.kpi_mapping_dir(),
        )?;
        store.download_files_in_prefix_to_dir(
            &format!("{data_prefix}/input/annotations"),
            &project_paths.annotation_dir(),
        )?;
        store.download_files_in_prefix_to_dir(
            &format!("{data_prefix}/input/pdfs/training"),
            &project_paths.training_pdf_dir(),
        )?;
    }

    let info = TrainInfo {
        project_name: project_name.to_string(),
        created_at: Utc::now(),
        relevance_model: main_settings.train_relevance.output_model_name.clone(),
        kpi_model: main_settings.train_kpi.output_model_name.clone(),
        train_settings: main_settings.clone(),
        pdfs_used: file_names_in(&project_paths.training_pdf_dir())?,
        annotation_files: file_names_with_extension(&project_paths.annotation_dir(), "xlsx")?,
        kpi_mapping_files: file_names_in(&project_paths.kpi_mapping_dir())?,
    };

    let model_dir = project_paths.model_dir();
    fs::create_dir_all(&model_dir)?;
    let file_name = TrainInfo::file_name(&info.relevance_model, &info.kpi_model);
    let out_path = model_dir.join(&file_name);
    fs::write(&out_path, serde_json::to_string_pretty(&info)?)?;
    info!(
        target: "kpidata::train_info",
        path = %out_path.display(),
        pdfs = info.pdfs_used.len(),
        "wrote train-info snapshot"
    );

    if let Some(store) = store {
        store.upload_file_to_s3(
            &out_path,
            &s3_settings.models_prefix(project_name),
            &file_name,
        )?;
        info!(
            target: "kpidata::train_info",
            key = %file_name,
            "staged train-info snapshot to main bucket"
        );
    }

    Ok(out_path)
}

/// File names directly under `dir`, sorted. Directories are ignored.
fn file_names_in(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn file_names_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<String>> {
    let mut names = file_names_in(dir)?;
    names.retain(|name| {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    });
    Ok(names)
}
