//! Runtime configuration: where the drug database and renal rules live.
//!
//! Explicit flags win over environment variables, which win over the
//! bundled defaults.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pk_engine::{DoseEngine, RENAL_RULES_ENV_VAR, RenalRuleTable};
use pk_standards::{DB_ENV_VAR, DrugStore, bundled_database_path};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Extra renal rules layered over the built-in table.
    pub renal_rules_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve paths from flags and the process environment.
    pub fn resolve(db: Option<PathBuf>, renal_rules: Option<PathBuf>) -> Self {
        Self::resolve_with(db, renal_rules, |name| std::env::var_os(name))
    }

    /// Resolve paths with `env` standing in for the process environment.
    pub fn resolve_with<F>(db: Option<PathBuf>, renal_rules: Option<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let from_env = |name: &str| env(name).filter(|value| !value.is_empty()).map(PathBuf::from);
        Self {
            db_path: db
                .or_else(|| from_env(DB_ENV_VAR))
                .unwrap_or_else(bundled_database_path),
            renal_rules_path: renal_rules.or_else(|| from_env(RENAL_RULES_ENV_VAR)),
        }
    }

    pub fn load_store(&self) -> Result<DrugStore> {
        DrugStore::load(&self.db_path)
            .with_context(|| format!("load drug database: {}", self.db_path.display()))
    }

    pub fn load_renal_rules(&self) -> Result<RenalRuleTable> {
        let defaults = RenalRuleTable::defaults();
        let Some(path) = &self.renal_rules_path else {
            return Ok(defaults);
        };
        let extra = RenalRuleTable::load(path)
            .with_context(|| format!("load renal rules: {}", path.display()))?;
        info!(path = %path.display(), rules = extra.len(), "loaded renal rules");
        Ok(defaults.merged_with(extra))
    }

    pub fn load_engine(&self) -> Result<DoseEngine<DrugStore>> {
        let store = self.load_store()?;
        let rules = self.load_renal_rules()?;
        Ok(DoseEngine::with_renal_rules(store, rules))
    }
}
