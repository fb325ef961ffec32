use std::sync::OnceLock;

use cardstmt_core::FieldValue;
use regex::Regex;

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_currency, r"₹|\bRs\b\.?|\bINR\b");
re!(re_whitespace, r"\s+");

/// Turn a raw capture into a display-ready value.
///
/// Strips currency markers, collapses whitespace runs and trims. Digits,
/// separators and decimal points are left alone.
pub fn clean_value(raw: Option<&str>) -> FieldValue {
    let Some(raw) = raw else {
        return FieldValue::NotFound;
    };
    let stripped = re_currency().replace_all(raw, "");
    let collapsed = re_whitespace().replace_all(&stripped, " ");
    let cleaned = collapsed.trim();
    if cleaned.is_empty() {
        FieldValue::NotFound
    } else {
        FieldValue::Found(cleaned.to_string())
    }
}
