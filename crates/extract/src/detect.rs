use cardstmt_core::Bank;

use crate::profiles::PROFILES;

/// Identify the issuer of a statement by keyword presence.
///
/// Profiles are checked in `Bank::ALL` order and the first hit wins, so a
/// statement mentioning two issuers is attributed to the earlier one.
pub fn detect_bank(text: &str) -> Option<Bank> {
    let lower = text.to_lowercase();
    PROFILES
        .iter()
        .find(|p| p.keywords.iter().any(|k| lower.contains(k)))
        .map(|p| p.bank)
}
