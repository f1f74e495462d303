use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};

use pk_engine::RenalRuleTable;
use pk_map::{NameResolver, Resolution};
use pk_model::{DrugRecord, DrugSource, PatientContext, normalize_key};
use pk_standards::{DrugStore, ValidationReport, validate_database};

use crate::cli::{AddArgs, DecideArgs, LookupArgs, ValidateArgs};
use crate::config::AppConfig;
use crate::logging::redact_value;
use crate::types::{AddedRecord, DecideOutcome, LookupResult};

pub fn run_list(config: &AppConfig) -> Result<DrugStore> {
    config.load_store()
}

pub fn run_lookup(config: &AppConfig, args: &LookupArgs) -> Result<LookupResult> {
    let store = config.load_store()?;
    let span = info_span!("lookup");
    let _guard = span.enter();
    let resolution = NameResolver::new().resolve(&store, &args.name);
    debug!(query = redact_value(&args.name), exact = resolution.is_exact(), "name resolved");
    let record = resolution
        .primary()
        .and_then(|key| store.get(key).map(|record| (key.to_string(), record.clone())));
    let suggestions = match resolution {
        Resolution::Ambiguous { candidates } => candidates,
        Resolution::Exact { .. } | Resolution::NotFound => Vec::new(),
    };
    Ok(LookupResult {
        name: args.name.clone(),
        suggestions,
        record,
    })
}

pub fn run_decide(config: &AppConfig, args: &DecideArgs) -> Result<DecideOutcome> {
    let engine = config.load_engine()?;
    let span = info_span!("decide");
    let _guard = span.enter();
    let context = args.patient_context();
    log_context(&context);

    let key = match NameResolver::new().resolve(engine.store(), &args.name) {
        Resolution::Exact { key } => key,
        Resolution::Ambiguous { candidates } => {
            info!(suggestions = candidates.len(), "name is not an exact key");
            return Ok(DecideOutcome::Ambiguous {
                name: args.name.clone(),
                candidates,
            });
        }
        Resolution::NotFound => {
            return Ok(DecideOutcome::NotFound {
                name: args.name.clone(),
            });
        }
    };
    let verdict = engine
        .decide(&key, &context)
        .with_context(|| format!("decide for {key}"))?;
    Ok(DecideOutcome::Verdict(verdict))
}

pub fn run_validate(config: &AppConfig, args: &ValidateArgs) -> Result<ValidationReport> {
    let path = args.path.as_ref().unwrap_or(&config.db_path);
    validate_database(path).with_context(|| format!("validate database: {}", path.display()))
}

pub fn run_rules(config: &AppConfig) -> Result<RenalRuleTable> {
    config.load_renal_rules()
}

/// Insert one record and write the whole database back.
pub fn run_add(config: &AppConfig, args: &AddArgs) -> Result<AddedRecord> {
    let record: DrugRecord = serde_json::from_str(&args.record)
        .with_context(|| format!("parse record for {:?}", args.key))?;
    let store = config.load_store()?;
    let updated = store
        .insert(&args.key, record)
        .with_context(|| format!("add {:?}", args.key))?;
    updated
        .save(&config.db_path)
        .with_context(|| format!("save drug database: {}", config.db_path.display()))?;
    let key = normalize_key(&args.key);
    info!(key = %key, records = updated.len(), "drug record added");
    Ok(AddedRecord {
        key,
        path: config.db_path.clone(),
        records: updated.len(),
    })
}

fn log_context(context: &PatientContext) {
    let clearance = context
        .clearance
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let site = context.infection_site.clone().unwrap_or_default();
    let flags = format!(
        "obese={} hepatic={} sepsis={} ventilated={} rrt={}",
        context.obese,
        context.hepatic_impairment,
        context.sepsis_or_shock,
        context.mechanical_ventilation,
        context.renal_replacement
    );
    trace!(
        clearance = redact_value(&clearance),
        site = redact_value(&site),
        flags = redact_value(&flags),
        "patient context"
    );
}
