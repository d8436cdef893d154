use std::fs;
use std::path::{Path, PathBuf};

/// Writes per-document relevance CSV fixtures shaped like the
/// inference stage's output.
pub struct RelevanceOutputFactory {
    header: String,
    rows: Vec<String>,
}

impl RelevanceOutputFactory {
    pub fn new() -> Self {
        Self {
            header: "pdf_name,kpi_id,paragraph,score".to_string(),
            rows: vec![
                "demo.pdf,1,scope 1 emissions,0.88".to_string(),
                "demo.pdf,2,total water withdrawal,0.52".to_string(),
            ],
        }
    }

    pub fn with_header(mut self, header: &str) -> Self {
        self.header = header.to_string();
        self
    }

    pub fn with_rows(mut self, rows: &[&str]) -> Self {
        self.rows = rows.iter().map(|row| row.to_string()).collect();
        self
    }

    /// Writes the fixture as `dir/file_name`, creating `dir` first.
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(file_name);
        let mut content = format!("{}\n", self.header);
        for row in &self.rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes `count` fixtures named `doc_0.csv`, `doc_1.csv`, ... with
    /// one distinct row each.
    pub fn write_many(&self, dir: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                Self {
                    header: self.header.clone(),
                    rows: vec![format!("doc_{i}.pdf,{i},paragraph {i},0.5")],
                }
                .write(dir, &format!("doc_{i}.csv"))
            })
            .collect()
    }
}
