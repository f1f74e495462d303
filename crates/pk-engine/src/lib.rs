#![deny(unsafe_code)]

mod engine;
pub mod error;
pub mod narrative;
pub mod renal;

pub use engine::DoseEngine;
pub use error::RuleError;
pub use renal::{RENAL_RULES_ENV_VAR, RenalRule, RenalRuleTable};
