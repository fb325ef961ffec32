use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing period as printed on the statement.
///
/// Endpoints are kept verbatim (e.g. `01-Sep-2024`, `01/09/2024`); issuers
/// disagree on date layout and the result is meant for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: String,
    pub end: String,
}

impl StatementPeriod {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        StatementPeriod { start: start.into(), end: end.into() }
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
