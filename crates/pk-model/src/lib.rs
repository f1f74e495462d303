pub mod drug;
pub mod error;
pub mod ids;
pub mod patient;
mod presence;
pub mod source;
pub mod tissue;
pub mod verdict;

pub use drug::{DrugRecord, Pharmacokinetics, References};
pub use error::{PkError, Result};
pub use ids::normalize_key;
pub use patient::PatientContext;
pub use source::DrugSource;
pub use tissue::{TissuePenetration, TissueSite};
pub use verdict::DecisionVerdict;
