pub mod batch;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod profiles;
pub mod source;
pub mod types;

pub use batch::{process_dir, BatchEntry, BatchError, BatchReport};
pub use config::{ConfigError, ParserConfig};
pub use detect::detect_bank;
pub use error::{ErrorKind, ParseError};
pub use extract::{preview, Extractor};
pub use normalize::clean_value;
pub use pipeline::StatementPipeline;
pub use profiles::{profile, InstitutionProfile, PROFILES};
pub use source::{MockTextSource, TextError, TextSource};
pub use types::{ExtractionMethod, ParseFailure, ParseOutcome, StatementReport};
