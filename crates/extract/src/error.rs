use std::path::PathBuf;

use cardstmt_core::{Bank, UnknownBank};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::TextError;

/// Stable failure category, reported as the `error` key of a failed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownInstitution,
    MalformedInput,
    FileNotFound,
    UnsupportedFile,
    TextExtraction,
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnknownInstitution => write!(f, "UnknownInstitution"),
            ErrorKind::MalformedInput => write!(f, "MalformedInput"),
            ErrorKind::FileNotFound => write!(f, "FileNotFound"),
            ErrorKind::UnsupportedFile => write!(f, "UnsupportedFile"),
            ErrorKind::TextExtraction => write!(f, "TextExtraction"),
            ErrorKind::Io => write!(f, "Io"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not identify bank from statement text")]
    UnknownInstitution { preview: Option<String> },
    #[error(transparent)]
    UnknownBankCode(#[from] UnknownBank),
    #[error("{bank} statement detected but no fields could be extracted")]
    MalformedInput { bank: Bank },
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("File must be a PDF: {}", .0.display())]
    UnsupportedFile(PathBuf),
    #[error("Could not extract text from PDF: {0}")]
    TextExtraction(#[from] TextError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnknownInstitution { .. } | ParseError::UnknownBankCode(_) => {
                ErrorKind::UnknownInstitution
            }
            ParseError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ParseError::FileNotFound(_) => ErrorKind::FileNotFound,
            ParseError::UnsupportedFile(_) => ErrorKind::UnsupportedFile,
            ParseError::TextExtraction(_) => ErrorKind::TextExtraction,
            ParseError::Io(_) => ErrorKind::Io,
        }
    }
}
