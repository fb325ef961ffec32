pub mod bank;
pub mod field;
pub mod period;

pub use bank::{Bank, UnknownBank};
pub use field::{FieldValue, StatementField, StatementFields, NOT_FOUND};
pub use period::StatementPeriod;
