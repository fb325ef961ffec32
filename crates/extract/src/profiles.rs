use std::sync::OnceLock;

use cardstmt_core::{Bank, StatementField};
use regex::{Regex, RegexBuilder};

/// Detection keywords and field patterns for one issuer.
///
/// Patterns are matched case-insensitively with `.` spanning line breaks.
/// Every pattern has exactly one capture group except `statement_period`,
/// which captures the start and end of the billing period.
#[derive(Debug)]
pub struct InstitutionProfile {
    pub bank: Bank,
    /// Lower-case substrings; any one of them identifies the issuer.
    pub keywords: &'static [&'static str],
    pub account_number: &'static str,
    pub total_balance: &'static str,
    pub payment_due_date: &'static str,
    pub credit_limit: &'static str,
    pub statement_period: &'static str,
}

impl InstitutionProfile {
    pub fn pattern(&self, field: StatementField) -> &'static str {
        match field {
            StatementField::AccountNumber => self.account_number,
            StatementField::TotalBalance => self.total_balance,
            StatementField::PaymentDueDate => self.payment_due_date,
            StatementField::CreditLimit => self.credit_limit,
            StatementField::StatementPeriod => self.statement_period,
        }
    }
}

// ── Profile table ────────────────────────────────────────────────────────────
// Same order as `Bank::ALL`; `profile()` indexes by discriminant.

pub static PROFILES: [InstitutionProfile; 5] = [
    InstitutionProfile {
        bank: Bank::Hdfc,
        keywords: &["hdfc", "housing development finance"],
        account_number: r"(?:Card Number|Card No\.?).*?(\*{4}\d{4})",
        total_balance: r"(?:Total Amount Due|Amount Due|Outstanding).*?₹?\s*([\d,]+\.?\d*)",
        payment_due_date: r"(?:Payment Due Date|Due Date).*?(\d{1,2}[-/]\d{1,2}[-/]\d{4})",
        credit_limit: r"(?:Credit Limit|Available Limit).*?₹?\s*([\d,]+)",
        statement_period: r"(?:Statement Period|Bill Period).*?(\d{1,2}[-/]\w{3}[-/]\d{4})\s*(?:to|-)\s*(\d{1,2}[-/]\w{3}[-/]\d{4})",
    },
    InstitutionProfile {
        bank: Bank::Icici,
        keywords: &["icici", "industrial credit"],
        account_number: r"(?:Card No\.?|Card Number).*?(\*{4}\d{4})",
        total_balance: r"(?:Outstanding Amount|Total Due|Amount Due).*?Rs\.?\s*([\d,]+\.?\d*)",
        payment_due_date: r"(?:Due Date|Payment Date).*?(\d{1,2}[/-]\d{1,2}[/-]\d{4})",
        credit_limit: r"(?:Available Credit Limit|Credit Limit).*?Rs\.?\s*([\d,]+)",
        statement_period: r"(?:Bill Period|Statement Period).*?(\d{1,2}[/-]\d{1,2}[/-]\d{4})\s*(?:to|-)\s*(\d{1,2}[/-]\d{1,2}[/-]\d{4})",
    },
    InstitutionProfile {
        bank: Bank::Sbi,
        keywords: &["sbi", "state bank of india", "sbi card"],
        account_number: r"(?:Credit Card Number|Card No).*?(\*{4}\d{4})",
        total_balance: r"(?:Total Amount Payable|Outstanding|Total Due).*?Rs\.?\s*([\d,]+\.?\d*)",
        payment_due_date: r"(?:Payment Due By|Due Date).*?(\d{1,2}-\d{1,2}-\d{4})",
        credit_limit: r"(?:Total Credit Limit|Credit Limit).*?Rs\.?\s*([\d,]+)",
        statement_period: r"(?:Statement Date|Bill Period).*?(\d{1,2}-\d{1,2}-\d{4})\s*(?:to|-)\s*(\d{1,2}-\d{1,2}-\d{4})",
    },
    InstitutionProfile {
        bank: Bank::Axis,
        keywords: &["axis", "axis bank"],
        account_number: r"(?:Card Number|Card No).*?(\*{4}\d{4})",
        total_balance: r"(?:Amount Due|Total Outstanding).*?Rs\.?\s*([\d,]+\.?\d*)",
        payment_due_date: r"(?:Due Date|Payment Date).*?(\d{1,2}/\d{1,2}/\d{4})",
        credit_limit: r"(?:Credit Limit|Available Limit).*?Rs\.?\s*([\d,]+)",
        statement_period: r"(?:Statement Period|Bill Date).*?(\d{1,2}/\d{1,2}/\d{4})\s*(?:to|-)\s*(\d{1,2}/\d{1,2}/\d{4})",
    },
    InstitutionProfile {
        bank: Bank::Kotak,
        keywords: &["kotak", "kotak mahindra"],
        account_number: r"(?:Card No|Card Number).*?(\*{4}\d{4})",
        total_balance: r"(?:Total Outstanding|Amount Due).*?₹\s*([\d,]+\.?\d*)",
        payment_due_date: r"(?:Payment Due|Due Date).*?(\d{1,2}-\w{3}-\d{4})",
        credit_limit: r"(?:Credit Limit|Available Credit).*?₹\s*([\d,]+)",
        statement_period: r"(?:Bill Date|Statement Period).*?(\d{1,2}-\w{3}-\d{4})\s*(?:to|-)\s*(\d{1,2}-\w{3}-\d{4})",
    },
];

pub fn profile(bank: Bank) -> &'static InstitutionProfile {
    &PROFILES[bank as usize]
}

// ── Compiled regex cache ─────────────────────────────────────────────────────

pub(crate) struct CompiledProfile {
    patterns: [Regex; 5],
}

impl CompiledProfile {
    fn build(profile: &InstitutionProfile) -> Self {
        Self { patterns: StatementField::ALL.map(|f| build_pattern(profile.pattern(f))) }
    }

    pub(crate) fn pattern(&self, field: StatementField) -> &Regex {
        &self.patterns[field as usize]
    }
}

fn build_pattern(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("invalid profile pattern")
}

pub(crate) fn compiled(bank: Bank) -> &'static CompiledProfile {
    static COMPILED: OnceLock<Vec<CompiledProfile>> = OnceLock::new();
    &COMPILED.get_or_init(|| PROFILES.iter().map(CompiledProfile::build).collect())[bank as usize]
}
