#![deny(missing_docs)]
#![doc = "Outcome model, aggregation rules and failure summaries shared by affirm crates."]

pub mod errors;
pub mod outcome;
pub mod record;
pub mod rule;
pub mod summary;

pub use errors::{AffirmError, Detail};
pub use outcome::{Failure, FailureKind, Outcome};
pub use record::{Record, Tally};
pub use rule::Rule;
pub use summary::FailureSummary;
