pub mod case;
pub mod controller;
pub mod driver;
pub mod keyword;
mod record;
pub mod stage;
mod summary;

pub use case::{CaseStatus, CaseTable, resolve_cases};
pub use controller::Cascade;
pub use driver::{Driver, RunOutput};
pub use keyword::{KeywordFilter, KeywordPolicy};
pub use record::{Branch, ClassificationRecord, DecidedBy, Outcome, StageResult};
pub use stage::StageClassifier;
pub use summary::RunSummary;
