//! PDF-to-text backends for the statement pipeline.
//!
//! Two pure-Rust extractors are chained: `pdf-extract` reads the whole
//! document at once, and `lopdf` walks it page by page when the first pass
//! comes back empty or suspiciously short.

use cardstmt_extract::{TextError, TextSource};

// ── pdf-extract ───────────────────────────────────────────────────────────────

/// Whole-document extraction via `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractSource;

impl TextSource for PdfExtractSource {
    fn extract_text(&self, data: &[u8]) -> Result<String, TextError> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| TextError::Backend { source_name: self.name(), message: e.to_string() })
    }

    fn name(&self) -> &'static str {
        "pdf-extract"
    }
}

// ── lopdf ─────────────────────────────────────────────────────────────────────

/// Page-by-page extraction via `lopdf`; pages are joined with newlines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfSource;

impl TextSource for LopdfSource {
    fn extract_text(&self, data: &[u8]) -> Result<String, TextError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| TextError::Decode(e.to_string()))?;

        let mut text = String::new();
        for (page_num, _page_id) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(page) => {
                    text.push_str(&page);
                    text.push('\n');
                }
                Err(e) => tracing::debug!("lopdf: skipping page {page_num}: {e}"),
            }
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}

// ── Fallback chain ────────────────────────────────────────────────────────────

/// Runs `primary`, and `secondary` when the primary result is shorter than
/// `min_chars` (after trimming) or fails outright.
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
    min_chars: usize,
}

impl<P: TextSource, S: TextSource> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S, min_chars: usize) -> Self {
        Self { primary, secondary, min_chars }
    }
}

impl<P: TextSource, S: TextSource> TextSource for FallbackSource<P, S> {
    fn extract_text(&self, data: &[u8]) -> Result<String, TextError> {
        let first = self.primary.extract_text(data);
        match &first {
            Ok(text) if text.trim().chars().count() >= self.min_chars => return first,
            Ok(text) => tracing::info!(
                "{} returned {} characters, trying {}",
                self.primary.name(),
                text.trim().chars().count(),
                self.secondary.name()
            ),
            Err(e) => tracing::warn!(
                "{} failed: {e}; trying {}",
                self.primary.name(),
                self.secondary.name()
            ),
        }

        match self.secondary.extract_text(data) {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            second => {
                if let Err(e) = &second {
                    tracing::warn!("{} also failed: {e}", self.secondary.name());
                }
                match first {
                    Ok(text) if !text.trim().is_empty() => Ok(text),
                    Ok(_) => Err(TextError::Empty),
                    Err(e) => Err(second.err().unwrap_or(e)),
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

/// The chain used for real PDFs: `pdf-extract`, then `lopdf`.
pub fn default_pdf_source(min_chars: usize) -> FallbackSource<PdfExtractSource, LopdfSource> {
    FallbackSource::new(PdfExtractSource, LopdfSource, min_chars)
}
