use std::path::Path;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::extract::Extractor;
use crate::source::{TextError, TextSource};
use crate::types::{ExtractionMethod, ParseOutcome, StatementReport};

/// Orchestrates: validate → read → text extraction → detect → extract.
pub struct StatementPipeline<S: TextSource> {
    source: S,
    config: ParserConfig,
}

impl<S: TextSource> StatementPipeline<S> {
    pub fn new(source: S, config: ParserConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse statement text supplied directly.
    pub fn parse_text(&self, text: &str) -> ParseOutcome {
        Extractor::parse(text, ExtractionMethod::Text, &self.config).into()
    }

    /// Run the text source over raw document bytes and parse the result.
    pub fn process_bytes(&self, data: &[u8]) -> Result<StatementReport, ParseError> {
        let text = self.source.extract_text(data)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(TextError::Empty.into());
        }
        tracing::info!(
            "Extracted {} characters of text via {}",
            text.chars().count(),
            self.source.name()
        );
        Extractor::parse(text, ExtractionMethod::Pdf, &self.config)
    }

    /// Process a PDF on disk.
    pub fn process_file(&self, path: &Path) -> ParseOutcome {
        tracing::info!("Processing PDF: {}", path.display());
        self.try_process_file(path).into()
    }

    /// Parse a plain-text statement on disk.
    pub fn process_text_file(&self, path: &Path) -> ParseOutcome {
        self.try_process_text_file(path).into()
    }

    fn try_process_file(&self, path: &Path) -> Result<StatementReport, ParseError> {
        if !path.exists() {
            return Err(ParseError::FileNotFound(path.to_path_buf()));
        }
        if !is_pdf(path) {
            return Err(ParseError::UnsupportedFile(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        let report = self.process_bytes(&data)?;
        tracing::info!("Detected bank: {}", report.bank);
        Ok(report.with_source(file_name(path), data.len() as u64))
    }

    fn try_process_text_file(&self, path: &Path) -> Result<StatementReport, ParseError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ParseError::FileNotFound(path.to_path_buf()),
            _ => ParseError::Io(e),
        })?;
        let report = Extractor::parse(&text, ExtractionMethod::Text, &self.config)?;
        Ok(report.with_source(file_name(path), text.len() as u64))
    }
}

/// Case-insensitive `.pdf` extension check.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Final path component, used as the `source_file` descriptor.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
