#![deny(unsafe_code)]

pub mod error;
pub mod handle;
pub mod hash;
pub mod paths;
pub mod store;
pub mod validate;

pub use crate::error::StoreError;
pub use crate::handle::StoreHandle;
pub use crate::paths::{DB_ENV_VAR, bundled_database_path, default_database_path};
pub use crate::store::DrugStore;
pub use crate::validate::{RecordCheck, ValidationReport, validate_database, validate_json_str};

/// Load the drug store from [`default_database_path`].
pub fn load_default_store() -> Result<DrugStore, StoreError> {
    DrugStore::load(&default_database_path())
}
