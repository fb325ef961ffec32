use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("PDF decode error: {0}")]
    Decode(String),
    #[error("{source_name} failed: {message}")]
    Backend { source_name: &'static str, message: String },
    #[error("no extractable text; the PDF may be image-only or corrupted")]
    Empty,
}

/// Abstraction over a document-to-text backend.
/// Implementations accept raw document bytes and return the full text as one string.
pub trait TextSource: Send + Sync {
    fn extract_text(&self, data: &[u8]) -> Result<String, TextError>;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}

impl<T: TextSource + ?Sized> TextSource for Box<T> {
    fn extract_text(&self, data: &[u8]) -> Result<String, TextError> {
        (**self).extract_text(data)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// ── Mock source (always available, used for tests) ───────────────────────────

/// Returns a pre-set string regardless of input, so the pipeline can be
/// exercised without real PDF fixtures.
pub struct MockTextSource {
    pub text: String,
}

impl MockTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for MockTextSource {
    fn extract_text(&self, _data: &[u8]) -> Result<String, TextError> {
        Ok(self.text.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let s = MockTextSource::new("HDFC Bank\nCard Number: ****1234");
        assert_eq!(s.extract_text(b"%PDF-1.4").unwrap(), "HDFC Bank\nCard Number: ****1234");
    }

    #[test]
    fn mock_ignores_document_content() {
        let s = MockTextSource::new("hello");
        assert_eq!(s.extract_text(b"anything").unwrap(), "hello");
        assert_eq!(s.extract_text(b"").unwrap(), "hello");
    }

    #[test]
    fn backend_error_names_source() {
        let err = TextError::Backend { source_name: "lopdf", message: "bad xref".into() };
        assert_eq!(err.to_string(), "lopdf failed: bad xref");
    }
}
