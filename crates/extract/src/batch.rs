use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::{is_pdf, StatementPipeline};
use crate::source::TextSource;
use crate::types::ParseOutcome;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchEntry {
    pub file: String,
    pub result: ParseOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    /// Where the results were written; `None` when there was nothing to process.
    pub output_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn parsed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_parsed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.parsed_count()
    }
}

/// Process every PDF directly inside `dir` and write the collected results
/// as JSON next to them.
pub fn process_dir<S: TextSource>(
    pipeline: &StatementPipeline<S>,
    dir: &Path,
) -> Result<BatchReport, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::FolderNotFound(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
    let mut pdfs: Vec<PathBuf> = readable_paths(dir, entries)
        .into_iter()
        .filter(|p| p.is_file() && is_pdf(p))
        .collect();
    pdfs.sort();

    if pdfs.is_empty() {
        tracing::warn!("No PDF files found in {}", dir.display());
        return Ok(BatchReport::default());
    }

    tracing::info!("Found {} PDF files to process", pdfs.len());

    let entries: Vec<BatchEntry> = pdfs
        .iter()
        .map(|path| {
            let file = crate::pipeline::file_name(path);
            let result = pipeline.process_file(path);
            match &result {
                ParseOutcome::Parsed(r) => tracing::info!("{file}: parsed {} statement", r.bank),
                ParseOutcome::Failed(f) => tracing::warn!("{file}: {}", f.message),
            }
            BatchEntry { file, result }
        })
        .collect();

    let output_path = dir.join(&pipeline.config().results_file);
    std::fs::write(&output_path, serde_json::to_string_pretty(&entries)?)?;
    tracing::info!("Results saved to {}", output_path.display());

    Ok(BatchReport { entries, output_path: Some(output_path) })
}

/// Directory entries that could be read; the rest are logged and skipped.
fn readable_paths(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Vec<PathBuf> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::extract::samples;
    use crate::source::MockTextSource;

    fn pipeline(text: &str) -> StatementPipeline<MockTextSource> {
        StatementPipeline::new(MockTextSource::new(text), ParserConfig::default())
    }

    #[test]
    fn processes_pdfs_in_name_order_and_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"data").unwrap();
        }

        let report = process_dir(&pipeline(samples::HDFC), dir.path()).unwrap();
        let files: Vec<_> = report.entries.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, ["a.PDF", "b.pdf"]);
        assert_eq!(report.parsed_count(), 2);
        assert_eq!(report.failed_count(), 0);

        let out = report.output_path.unwrap();
        assert_eq!(out, dir.path().join("parsing_results.json"));
        let written: Vec<BatchEntry> =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written, report.entries);
    }

    #[test]
    fn failures_are_recorded_per_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.pdf"), b"data").unwrap();

        let report = process_dir(&pipeline("no issuer here"), dir.path()).unwrap();
        assert_eq!(report.failed_count(), 1);
        let json = serde_json::to_value(&report.entries[0]).unwrap();
        assert_eq!(json["file"], "x.pdf");
        assert_eq!(json["result"]["error"], "UnknownInstitution");
    }

    #[test]
    fn empty_folder_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = process_dir(&pipeline(samples::HDFC), dir.path()).unwrap();
        assert!(report.entries.is_empty());
        assert!(report.output_path.is_none());
        assert!(!dir.path().join("parsing_results.json").exists());
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_dir(&pipeline(samples::HDFC), &dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, BatchError::FolderNotFound(_)));
    }

    #[test]
    fn results_file_name_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("s.pdf"), b"data").unwrap();
        let config = ParserConfig { results_file: "out.json".into(), ..ParserConfig::default() };
        let p = StatementPipeline::new(MockTextSource::new(samples::SBI), config);
        let report = process_dir(&p, dir.path()).unwrap();
        assert_eq!(report.output_path, Some(dir.path().join("out.json")));
    }

    #[test]
    fn unreadable_entries_are_skipped() {
        let dir = Path::new("/statements");
        let entries = vec![
            Ok(dir.join("a.pdf")),
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
            Ok(dir.join("b.pdf")),
        ];
        assert_eq!(readable_paths(dir, entries), [dir.join("a.pdf"), dir.join("b.pdf")]);
    }
}
