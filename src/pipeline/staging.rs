use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Copies every regular file from `src_dir` into `dest_dir`, skipping
/// names that already exist there. Returns the number of files copied.
pub fn copy_files_without_overwrite(src_dir: &Path, dest_dir: &Path) -> io::Result<usize> {
    fs::create_dir_all(dest_dir)?;
    let mut copied = 0;
    for entry in fs::read_dir(src_dir)? {
        let entry = entry?;
        let src = entry.path();
        if !src.is_file() {
            continue;
        }
        let dest = dest_dir.join(entry.file_name());
        if dest.exists() {
            debug!(
                target: "kpidata::staging",
                file = %dest.display(),
                "already present, not overwritten"
            );
            continue;
        }
        fs::copy(&src, &dest)?;
        copied += 1;
    }
    Ok(copied)
}

/// For every PDF in `pdf_dir`, copies the matching `<stem>.json`
/// extraction from `extracted_dir` into `dest_dir`, when it exists and
/// is not already there. Returns the number of extractions placed.
pub fn stage_extracted_files(
    extracted_dir: &Path,
    pdf_dir: &Path,
    dest_dir: &Path,
) -> io::Result<usize> {
    fs::create_dir_all(dest_dir)?;
    let mut staged = 0;
    for entry in fs::read_dir(pdf_dir)? {
        let entry = entry?;
        let pdf = entry.path();
        let is_pdf = pdf
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !pdf.is_file() || !is_pdf {
            continue;
        }
        let Some(stem) = pdf.file_stem() else {
            continue;
        };
        let mut json_name = stem.to_os_string();
        json_name.push(".json");
        let extracted = extracted_dir.join(&json_name);
        let dest = dest_dir.join(&json_name);
        if !extracted.is_file() || dest.exists() {
            continue;
        }
        fs::copy(&extracted, &dest)?;
        staged += 1;
    }
    Ok(staged)
}
