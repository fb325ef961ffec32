use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder written for a field whose pattern did not match.
pub const NOT_FOUND: &str = "Not found";

/// The five data points pulled from every statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementField {
    AccountNumber,
    TotalBalance,
    PaymentDueDate,
    CreditLimit,
    StatementPeriod,
}

impl StatementField {
    pub const ALL: [StatementField; 5] = [
        StatementField::AccountNumber,
        StatementField::TotalBalance,
        StatementField::PaymentDueDate,
        StatementField::CreditLimit,
        StatementField::StatementPeriod,
    ];

    /// Key used for this field in result mappings.
    pub fn key(self) -> &'static str {
        match self {
            StatementField::AccountNumber => "account_number",
            StatementField::TotalBalance => "total_balance",
            StatementField::PaymentDueDate => "payment_due_date",
            StatementField::CreditLimit => "credit_limit",
            StatementField::StatementPeriod => "statement_period",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatementField::AccountNumber => "Account",
            StatementField::TotalBalance => "Balance",
            StatementField::PaymentDueDate => "Due Date",
            StatementField::CreditLimit => "Credit Limit",
            StatementField::StatementPeriod => "Period",
        }
    }
}

impl fmt::Display for StatementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A cleaned field value, or the not-found marker.
///
/// Always serializes as a plain string so result mappings never carry nulls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    Found(String),
    #[default]
    NotFound,
}

impl FieldValue {
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Found(s) => s,
            FieldValue::NotFound => NOT_FOUND,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    pub fn found(&self) -> Option<&str> {
        match self {
            FieldValue::Found(s) => Some(s),
            FieldValue::NotFound => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == NOT_FOUND {
            Ok(FieldValue::NotFound)
        } else {
            Ok(FieldValue::Found(s))
        }
    }
}

/// Exactly five fields, each either found or explicitly not found.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatementFields {
    pub account_number: FieldValue,
    pub total_balance: FieldValue,
    pub payment_due_date: FieldValue,
    pub credit_limit: FieldValue,
    pub statement_period: FieldValue,
}

impl StatementFields {
    pub fn get(&self, field: StatementField) -> &FieldValue {
        match field {
            StatementField::AccountNumber => &self.account_number,
            StatementField::TotalBalance => &self.total_balance,
            StatementField::PaymentDueDate => &self.payment_due_date,
            StatementField::CreditLimit => &self.credit_limit,
            StatementField::StatementPeriod => &self.statement_period,
        }
    }

    pub fn set(&mut self, field: StatementField, value: FieldValue) {
        let slot = match field {
            StatementField::AccountNumber => &mut self.account_number,
            StatementField::TotalBalance => &mut self.total_balance,
            StatementField::PaymentDueDate => &mut self.payment_due_date,
            StatementField::CreditLimit => &mut self.credit_limit,
            StatementField::StatementPeriod => &mut self.statement_period,
        };
        *slot = value;
    }

    /// Fields that ended up as not-found, in canonical order.
    pub fn missing(&self) -> Vec<StatementField> {
        StatementField::ALL
            .into_iter()
            .filter(|f| !self.get(*f).is_found())
            .collect()
    }

    pub fn found_count(&self) -> usize {
        StatementField::ALL.len() - self.missing().len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_serializes_as_sentinel() {
        let json = serde_json::to_string(&FieldValue::NotFound).unwrap();
        assert_eq!(json, "\"Not found\"");
    }

    #[test]
    fn sentinel_deserializes_to_not_found() {
        let v: FieldValue = serde_json::from_str("\"Not found\"").unwrap();
        assert_eq!(v, FieldValue::NotFound);
        let v: FieldValue = serde_json::from_str("\"****1234\"").unwrap();
        assert_eq!(v.found(), Some("****1234"));
    }

    #[test]
    fn default_fields_are_all_missing() {
        let fields = StatementFields::default();
        assert_eq!(fields.missing(), StatementField::ALL.to_vec());
        assert_eq!(fields.found_count(), 0);
        assert!(!fields.is_complete());
    }

    #[test]
    fn set_and_get_round_through_field_enum() {
        let mut fields = StatementFields::default();
        fields.set(StatementField::CreditLimit, FieldValue::Found("200000".into()));
        assert_eq!(fields.credit_limit.as_str(), "200000");
        assert_eq!(fields.get(StatementField::CreditLimit).as_str(), "200000");
        assert_eq!(fields.found_count(), 1);
    }

    #[test]
    fn every_field_key_appears_in_json() {
        let json = serde_json::to_value(StatementFields::default()).unwrap();
        for field in StatementField::ALL {
            assert_eq!(json[field.key()], NOT_FOUND, "missing key {}", field.key());
        }
    }
}
