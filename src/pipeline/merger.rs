use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::pipeline::errors::MergeError;
use crate::pipeline::paths::{MERGED_OUTPUT_FILE_NAME, ProjectPaths};
use crate::shared::config::S3Settings;
use crate::storage::{ObjectStore, S3ObjectStore, StorageError};

/// Totals for one completed merge, carried between the concatenation
/// and the log line that reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MergeStats {
    /// Input files that contributed at least a header.
    files: usize,
    /// Data rows written, headers excluded.
    data_rows: u64,
}

/// Combines the per-document relevance-inference CSVs into the single
/// training input consumed by KPI extraction, optionally staging
/// through the object store on both sides: inference outputs come down
/// from the main bucket, the merged file goes up to the interim one.
pub struct Merger {
    project_name: String,
    s3_usage: bool,
    s3_settings: S3Settings,
    project_paths: ProjectPaths,
    store_main: Option<Box<dyn ObjectStore>>,
    store_interim: Option<Box<dyn ObjectStore>>,
}

impl Merger {
    pub fn new(
        project_name: impl Into<String>,
        s3_usage: bool,
        s3_settings: S3Settings,
        project_paths: ProjectPaths,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            s3_usage,
            s3_settings,
            project_paths,
            store_main: None,
            store_interim: None,
        }
    }

    /// Builds the S3 client for the main bucket from the
    /// environment-resolved credentials named in the settings. A no-op
    /// when staging is disabled or a store was already injected. The
    /// interim bucket is not touched here: its client is connected only
    /// once there is a merged file to upload, so its credentials are
    /// never required for a merge that produces nothing.
    pub fn connect_main_store(&mut self) -> Result<(), StorageError> {
        if self.s3_usage && self.store_main.is_none() {
            self.store_main = Some(Box::new(S3ObjectStore::connect(
                &self.s3_settings.main_bucket,
            )?));
        }
        Ok(())
    }

    /// Replaces the main-bucket handle, for staging through something
    /// other than the default S3 client.
    pub fn with_main_store(mut self, store: Box<dyn ObjectStore>) -> Self {
        self.store_main = Some(store);
        self
    }

    /// Replaces the interim-bucket handle.
    pub fn with_interim_store(mut self, store: Box<dyn ObjectStore>) -> Self {
        self.store_interim = Some(store);
        self
    }

    /// Runs the merge. `Ok(true)` means the merged file was written
    /// (and staged, when enabled); `Ok(false)` means there was nothing
    /// usable to merge or the write was cut short mid-file, in which
    /// case any partial output is left on disk for inspection.
    pub fn merge(&self) -> Result<bool, MergeError> {
        if self.s3_usage {
            self.download_inference_inputs()?;
        }

        let input_dir = self.project_paths.relevance_output_dir();
        let inputs = relevance_input_files(&input_dir)?;
        if inputs.is_empty() {
            warn!(
                target: "kpidata::merge",
                dir = %input_dir.display(),
                "no relevance inference outputs to merge"
            );
            return Ok(false);
        }

        let out_path = self.project_paths.merged_output_file();
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&out_path)?);

        match concat_csv_files(&mut writer, &inputs) {
            Ok(stats) if stats.files == 0 => {
                warn!(
                    target: "kpidata::merge",
                    dir = %input_dir.display(),
                    "all relevance inference outputs were empty"
                );
                drop(writer);
                if let Err(e) = fs::remove_file(&out_path) {
                    warn!(
                        target: "kpidata::merge",
                        error = %e,
                        output = %out_path.display(),
                        "failed to remove the empty merged output"
                    );
                }
                Ok(false)
            }
            Ok(stats) => {
                info!(
                    target: "kpidata::merge",
                    files = stats.files,
                    data_rows = stats.data_rows,
                    output = %out_path.display(),
                    "merged relevance outputs"
                );
                if self.s3_usage {
                    self.upload_merged_output(&out_path)?;
                }
                Ok(true)
            }
            Err(MergeError::Io(e)) => {
                error!(
                    target: "kpidata::merge",
                    error = %e,
                    output = %out_path.display(),
                    "merge stopped mid-file, partial output left on disk"
                );
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    fn download_inference_inputs(&self) -> Result<(), MergeError> {
        let store = self.store_main.as_deref().ok_or(StorageError::NotConfigured)?;
        let prefix = self.s3_settings.relevance_output_prefix(&self.project_name);
        let dir = self.project_paths.relevance_output_dir();
        let fetched = store.download_files_in_prefix_to_dir(&prefix, &dir)?;
        info!(
            target: "kpidata::merge",
            fetched,
            prefix = %prefix,
            "downloaded relevance inference outputs"
        );
        Ok(())
    }

    fn upload_merged_output(&self, merged: &Path) -> Result<(), MergeError> {
        let connected;
        let store: &dyn ObjectStore = match self.store_interim.as_deref() {
            Some(store) => store,
            // Interim credentials are resolved only when an upload
            // actually happens.
            None => {
                connected = S3ObjectStore::connect(&self.s3_settings.interim_bucket)?;
                &connected
            }
        };
        let prefix = self.s3_settings.interim_ml_prefix(&self.project_name);
        store.upload_file_to_s3(merged, &prefix, MERGED_OUTPUT_FILE_NAME)?;
        info!(
            target: "kpidata::merge",
            prefix = %prefix,
            "staged merged output to interim bucket"
        );
        Ok(())
    }
}

/// Enumerates `*.csv` under `dir`, sorted by path so the merged row
/// order is stable across platforms.
fn relevance_input_files(dir: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let pattern = format!("{}/*.csv", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        files.push(entry.map_err(|e| MergeError::Io(e.into()))?);
    }
    files.sort();
    Ok(files)
}

/// Streams every input into `writer`: the first non-empty file
/// contributes the header, every later file must repeat it exactly,
/// and only data lines follow. Empty files are skipped. Each written
/// line is newline-terminated regardless of how the input ended.
fn concat_csv_files<W: Write>(writer: &mut W, inputs: &[PathBuf]) -> Result<MergeStats, MergeError> {
    let mut header: Option<String> = None;
    let mut stats = MergeStats::default();

    for path in inputs {
        debug!(target: "kpidata::merge", file = %path.display(), "merging");
        let reader = BufReader::new(File::open(path)?);
        let mut lines = reader.lines();

        let Some(first) = lines.next() else {
            warn!(
                target: "kpidata::merge",
                file = %path.display(),
                "skipping empty input file"
            );
            continue;
        };
        let first = first?;

        match &header {
            None => {
                writeln!(writer, "{first}")?;
                header = Some(first);
            }
            Some(expected) if *expected == first => {}
            Some(expected) => {
                return Err(MergeError::HeaderMismatch {
                    file: path.clone(),
                    expected: expected.clone(),
                    found: first,
                });
            }
        }

        for line in lines {
            writeln!(writer, "{}", line?)?;
            stats.data_rows += 1;
        }
        stats.files += 1;
    }

    writer.flush()?;
    Ok(stats)
}

/// One-shot entry point: builds a `Merger` for `project_name`, connects
/// the main bucket when staging is enabled, and runs the merge.
pub fn merge_relevance_outputs(
    project_name: &str,
    s3_usage: bool,
    s3_settings: &S3Settings,
    project_paths: &ProjectPaths,
) -> Result<bool, MergeError> {
    let mut merger = Merger::new(
        project_name,
        s3_usage,
        s3_settings.clone(),
        project_paths.clone(),
    );
    merger.connect_main_store()?;
    merger.merge()
}
