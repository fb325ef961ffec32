use cardstmt_core::{Bank, StatementFields};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ParseError};

/// Format used for `parsed_at`.
pub const PARSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExtractionMethod {
    #[serde(rename = "PDF")]
    Pdf,
    Text,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::Pdf => write!(f, "PDF"),
            ExtractionMethod::Text => write!(f, "Text"),
        }
    }
}

/// A successfully parsed statement: the five fields plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementReport {
    #[serde(flatten)]
    pub fields: StatementFields,
    pub bank: Bank,
    /// Local wall-clock time of extraction.
    pub parsed_at: String,
    pub extraction_method: ExtractionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Size of the source document in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl StatementReport {
    pub fn new(fields: StatementFields, bank: Bank, method: ExtractionMethod) -> Self {
        Self::at(fields, bank, method, Local::now().naive_local())
    }

    pub fn at(
        fields: StatementFields,
        bank: Bank,
        method: ExtractionMethod,
        parsed_at: NaiveDateTime,
    ) -> Self {
        Self {
            fields,
            bank,
            parsed_at: parsed_at.format(PARSED_AT_FORMAT).to_string(),
            extraction_method: method,
            source_file: None,
            file_size: None,
        }
    }

    pub fn with_source(mut self, file_name: impl Into<String>, file_size: u64) -> Self {
        self.source_file = Some(file_name.into());
        self.file_size = Some(file_size);
        self
    }
}

/// A failed parse, reported as data rather than a fault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseFailure {
    pub error: ErrorKind,
    pub message: String,
    /// Populated when the issuer could not be identified.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_banks: Vec<Bank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text_preview: Option<String>,
}

impl From<ParseError> for ParseFailure {
    fn from(err: ParseError) -> Self {
        let error = err.kind();
        let supported_banks = if error == ErrorKind::UnknownInstitution {
            Bank::ALL.to_vec()
        } else {
            Vec::new()
        };
        let message = err.to_string();
        let extracted_text_preview = match err {
            ParseError::UnknownInstitution { preview } => preview,
            _ => None,
        };
        Self { error, message, supported_banks, extracted_text_preview }
    }
}

/// Result mapping handed to callers: either a report or a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParseOutcome {
    Failed(ParseFailure),
    Parsed(StatementReport),
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn report(&self) -> Option<&StatementReport> {
        match self {
            ParseOutcome::Parsed(r) => Some(r),
            ParseOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseOutcome::Failed(f) => Some(f),
            ParseOutcome::Parsed(_) => None,
        }
    }
}

impl From<Result<StatementReport, ParseError>> for ParseOutcome {
    fn from(result: Result<StatementReport, ParseError>) -> Self {
        match result {
            Ok(report) => ParseOutcome::Parsed(report),
            Err(err) => ParseOutcome::Failed(err.into()),
        }
    }
}
