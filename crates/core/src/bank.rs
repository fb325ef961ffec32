use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Card issuers with a known statement layout.
///
/// Declaration order is detection priority: when a statement mentions more
/// than one issuer, the first one listed here wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bank {
    Hdfc,
    Icici,
    Sbi,
    Axis,
    Kotak,
}

impl Bank {
    pub const ALL: [Bank; 5] = [Bank::Hdfc, Bank::Icici, Bank::Sbi, Bank::Axis, Bank::Kotak];

    /// Short identifier used in results and on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Bank::Hdfc => "HDFC",
            Bank::Icici => "ICICI",
            Bank::Sbi => "SBI",
            Bank::Axis => "AXIS",
            Bank::Kotak => "KOTAK",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Bank::Hdfc => "HDFC Bank",
            Bank::Icici => "ICICI Bank",
            Bank::Sbi => "SBI Card",
            Bank::Axis => "Axis Bank",
            Bank::Kotak => "Kotak Mahindra Bank",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown bank: '{0}'")]
pub struct UnknownBank(pub String);

impl std::str::FromStr for Bank {
    type Err = UnknownBank;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bank::ALL
            .into_iter()
            .find(|b| b.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownBank(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn all_is_in_priority_order() {
        let codes: Vec<_> = Bank::ALL.iter().map(|b| b.code()).collect();
        assert_eq!(codes, ["HDFC", "ICICI", "SBI", "AXIS", "KOTAK"]);
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Bank::Kotak.to_string(), "KOTAK");
        assert_eq!(Bank::Sbi.to_string(), "SBI");
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(Bank::from_str("hdfc").unwrap(), Bank::Hdfc);
        assert_eq!(Bank::from_str(" Axis ").unwrap(), Bank::Axis);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = Bank::from_str("CITI").unwrap_err();
        assert_eq!(err, UnknownBank("CITI".into()));
        assert_eq!(err.to_string(), "Unknown bank: 'CITI'");
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Bank::Icici).unwrap(), "\"ICICI\"");
        let b: Bank = serde_json::from_str("\"KOTAK\"").unwrap();
        assert_eq!(b, Bank::Kotak);
    }
}
