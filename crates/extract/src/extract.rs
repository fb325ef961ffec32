use cardstmt_core::{Bank, FieldValue, StatementField, StatementFields, StatementPeriod};
use regex::Regex;

use crate::config::ParserConfig;
use crate::detect::detect_bank;
use crate::error::ParseError;
use crate::normalize::clean_value;
use crate::profiles;
use crate::types::{ExtractionMethod, StatementReport};

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Apply `bank`'s five patterns to `text`.
    ///
    /// A field whose pattern does not match is recorded as not-found; the
    /// remaining fields are still extracted.
    pub fn extract_fields(text: &str, bank: Bank) -> StatementFields {
        let compiled = profiles::compiled(bank);
        let mut fields = StatementFields::default();
        for field in StatementField::ALL {
            let re = compiled.pattern(field);
            let value = match field {
                StatementField::StatementPeriod => extract_period(re, text)
                    .map(|p| FieldValue::Found(p.to_string()))
                    .unwrap_or_default(),
                _ => clean_value(first_capture(re, text)),
            };
            fields.set(field, value);
        }
        fields
    }

    /// Like [`Extractor::extract_fields`], addressed by bank code (`"HDFC"`, ...).
    pub fn extract_for(text: &str, bank_code: &str) -> Result<StatementFields, ParseError> {
        let bank: Bank = bank_code.parse()?;
        Ok(Self::extract_fields(text, bank))
    }

    /// Detect the issuer, extract its fields and wrap them in a report.
    pub fn parse(
        text: &str,
        method: ExtractionMethod,
        config: &ParserConfig,
    ) -> Result<StatementReport, ParseError> {
        let Some(bank) = detect_bank(text) else {
            tracing::debug!("no issuer keywords in {} chars of text", text.len());
            return Err(ParseError::UnknownInstitution {
                preview: preview(text, config.preview_chars),
            });
        };

        let fields = Self::extract_fields(text, bank);
        if fields.found_count() == 0 {
            return Err(ParseError::MalformedInput { bank });
        }

        let missing = fields.missing();
        if !missing.is_empty() {
            tracing::debug!("{bank}: {} field(s) not found: {missing:?}", missing.len());
        }

        Ok(StatementReport::new(fields, bank, method))
    }
}

fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)?.get(1).map(|m| m.as_str())
}

/// Both endpoints must be present; a half-matched period is not-found.
fn extract_period(re: &Regex, text: &str) -> Option<StatementPeriod> {
    let c = re.captures(text)?;
    Some(StatementPeriod::new(c.get(1)?.as_str(), c.get(2)?.as_str()))
}

/// First `max_chars` characters of the trimmed text, `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Some(format!("{}...", &text[..cut])),
        None => Some(text.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod samples {
    pub const HDFC: &str = "
    HDFC Bank Credit Card Statement
    Card Number: ****1234
    Statement Period: 01-Sep-2024 to 30-Sep-2024
    Total Amount Due: ₹45,230.50
    Payment Due Date: 25-10-2024
    Credit Limit: ₹200000
    ";

    pub const ICICI: &str = "
    ICICI Bank Credit Card Statement
    Card No: ****5678
    Statement Period: 01/09/2024 to 30/09/2024
    Total Due: Rs. 12,345.67
    Due Date: 20/10/2024
    Credit Limit: Rs. 150,000
    ";

    pub const SBI: &str = "
    SBI Card Monthly Statement
    Credit Card Number: ****9012
    Bill Period: 15-08-2024 to 14-09-2024
    Total Amount Payable: Rs. 8,750.00
    Payment Due By: 04-10-2024
    Total Credit Limit: Rs. 100,000
    ";

    pub const AXIS: &str = "
    Axis Bank Credit Card Statement
    Card Number: ****3456
    Statement Period: 05/09/2024 to 04/10/2024
    Total Outstanding: Rs. 23,100.25
    Payment Date: 24/10/2024
    Credit Limit: Rs. 250,000
    ";

    pub const KOTAK: &str = "
    Kotak Mahindra Bank Credit Card Statement
    Card No: ****7890
    Statement Period: 01-Sep-2024 to 30-Sep-2024
    Total Outstanding: ₹ 15,600.00
    Payment Due: 18-Oct-2024
    Credit Limit: ₹ 300,000
    ";
}
