use std::fs;
use std::io;
use std::path::PathBuf;

/// Name of the merged training input consumed by KPI extraction.
pub const MERGED_OUTPUT_FILE_NAME: &str = "text_3434.csv";

/// Local directory layout for one project under a working root.
///
/// Everything the pipeline touches hangs off `{root}/data` and
/// `{root}/models`, and the remote prefixes in `S3Settings` mirror the
/// same per-project tree, so a path here and its remote counterpart
/// always agree on structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    project_name: String,
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(project_name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            root: root.into(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    fn project_data_dir(&self) -> PathBuf {
        self.data_dir().join(&self.project_name)
    }

    /// Where relevance inference drops its per-document CSVs.
    pub fn relevance_output_dir(&self) -> PathBuf {
        self.project_data_dir()
            .join("output")
            .join("RELEVANCE")
            .join("Text")
    }

    pub fn interim_ml_dir(&self) -> PathBuf {
        self.project_data_dir().join("interim").join("ml")
    }

    /// Full path of the merged training input.
    pub fn merged_output_file(&self) -> PathBuf {
        self.interim_ml_dir().join(MERGED_OUTPUT_FILE_NAME)
    }

    pub fn training_pdf_dir(&self) -> PathBuf {
        self.project_data_dir()
            .join("input")
            .join("pdfs")
            .join("training")
    }

    pub fn annotation_dir(&self) -> PathBuf {
        self.project_data_dir().join("input").join("annotations")
    }

    pub fn kpi_mapping_dir(&self) -> PathBuf {
        self.project_data_dir().join("input").join("kpi_mapping")
    }

    pub fn model_dir(&self) -> PathBuf {
        self.root.join("models").join(&self.project_name)
    }

    pub fn main_settings_file(&self) -> PathBuf {
        self.project_data_dir().join("settings.yaml")
    }

    pub fn s3_settings_file(&self) -> PathBuf {
        self.data_dir().join("s3_settings.yaml")
    }

    /// Marker file owned by the run guard.
    pub fn run_marker_file(&self) -> PathBuf {
        self.data_dir().join("running")
    }

    /// Creates the directories the pipeline reads from and writes to.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for dir in [
            self.relevance_output_dir(),
            self.interim_ml_dir(),
            self.training_pdf_dir(),
            self.annotation_dir(),
            self.kpi_mapping_dir(),
            self.model_dir(),
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
