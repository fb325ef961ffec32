use std::fmt;

use cardstmt_core::{Bank, StatementField};
use cardstmt_extract::{ParseFailure, ParseOutcome, StatementReport};

const PREVIEW_SHOWN: usize = 200;

/// Render an outcome for the terminal.
pub fn render(outcome: &ParseOutcome) -> String {
    match outcome {
        ParseOutcome::Parsed(report) => Summary(report).to_string(),
        ParseOutcome::Failed(failure) => FailureSummary(failure).to_string(),
    }
}

struct Summary<'a>(&'a StatementReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(out, "Successfully extracted data\n")?;
        line(out, "Bank", &r.bank)?;
        for field in StatementField::ALL {
            let value = r.fields.get(field);
            match (field, value.found()) {
                (StatementField::TotalBalance | StatementField::CreditLimit, Some(v)) => {
                    line(out, field.label(), &format!("₹{v}"))?
                }
                _ => line(out, field.label(), value)?,
            }
        }
        line(out, "Source", &r.source_file.as_deref().unwrap_or("N/A"))?;
        match r.file_size {
            Some(size) => line(out, "File Size", &format!("{size} bytes"))?,
            None => line(out, "File Size", &"N/A")?,
        }
        line(out, "Method", &r.extraction_method)?;
        line(out, "Parsed", &r.parsed_at)?;

        let missing = r.fields.missing();
        if missing.is_empty() {
            write!(out, "\nAll required fields extracted")
        } else {
            let keys: Vec<&str> = missing.iter().map(|m| m.key()).collect();
            write!(out, "\nMissing fields: {}", keys.join(", "))
        }
    }
}

struct FailureSummary<'a>(&'a ParseFailure);

impl fmt::Display for FailureSummary<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let f = self.0;
        write!(out, "Error: {}", f.message)?;
        if !f.supported_banks.is_empty() {
            let codes: Vec<&str> = f.supported_banks.iter().map(|b| b.code()).collect();
            write!(out, "\n\nSupported banks: {}", codes.join(", "))?;
        }
        if let Some(preview) = &f.extracted_text_preview {
            let shown: String = preview.chars().take(PREVIEW_SHOWN).collect();
            write!(out, "\n\nText preview (first {PREVIEW_SHOWN} chars):\n'{shown}'")?;
        }
        Ok(())
    }
}

/// `  Label:       value`, labels padded to one column.
fn line(out: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display) -> fmt::Result {
    writeln!(out, "  {:<14}{value}", format!("{label}:"))
}

/// One line per supported issuer: code and full name.
pub fn render_banks() -> String {
    Bank::ALL
        .iter()
        .map(|b| format!("{:<6} {}", b.code(), b.display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}
