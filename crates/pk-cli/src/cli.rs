//! CLI argument definitions for the dosing helper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pk_model::PatientContext;

#[derive(Parser)]
#[command(
    name = "pkhelper",
    version,
    about = "Antibiotic dosing helper - look up pharmacokinetic notes and dosing verdicts",
    long_about = "Look up antibiotic pharmacokinetic reference data and assemble a\n\
                  dosing verdict for a patient profile (renal function, obesity,\n\
                  hepatic impairment, infection site, critical-care flags).\n\n\
                  Output is decision support only and never replaces clinical judgment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient inputs (clearance, site, flags) to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Drug database JSON file [env: PKHELPER_DB].
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// TOML file with extra renal threshold rules [env: PKHELPER_RENAL_RULES].
    #[arg(long = "renal-rules", value_name = "PATH", global = true)]
    pub renal_rules: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every drug in the database.
    List,

    /// Show the reference card for a drug (typos are tolerated).
    Lookup(LookupArgs),

    /// Assemble a dosing verdict for a drug and patient profile.
    Decide(DecideArgs),

    /// Check a database file record by record.
    Validate(ValidateArgs),

    /// Show the renal threshold rules in effect.
    Rules,

    /// Add a drug record to the database file. Existing keys are refused.
    Add(AddArgs),
}

#[derive(Args)]
pub struct LookupArgs {
    /// Drug name as typed.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct DecideArgs {
    /// Drug name as typed. Ambiguous names are refused with suggestions.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Estimated creatinine clearance in mL/min.
    #[arg(long = "clcr", value_name = "ML_MIN")]
    pub clearance: Option<f64>,

    /// Patient is obese.
    #[arg(long = "obese")]
    pub obese: bool,

    /// Patient has hepatic impairment.
    #[arg(long = "hepatic")]
    pub hepatic: bool,

    /// Patient has sepsis or septic shock.
    #[arg(long = "sepsis")]
    pub sepsis: bool,

    /// Patient is mechanically ventilated.
    #[arg(long = "ventilated")]
    pub ventilated: bool,

    /// Patient is on renal replacement therapy.
    #[arg(long = "rrt")]
    pub rrt: bool,

    /// Infection site (pulmao, osso, bhe, peritoneal, pleural, ocular, bile).
    #[arg(long = "site", value_name = "SITE")]
    pub site: Option<String>,

    /// Print the verdict as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

impl DecideArgs {
    pub fn patient_context(&self) -> PatientContext {
        let mut context = PatientContext::new()
            .with_obese(self.obese)
            .with_hepatic_impairment(self.hepatic)
            .with_sepsis_or_shock(self.sepsis)
            .with_mechanical_ventilation(self.ventilated)
            .with_renal_replacement(self.rrt);
        if let Some(clearance) = self.clearance {
            context = context.with_clearance(clearance);
        }
        if let Some(site) = &self.site {
            context = context.with_infection_site(site.clone());
        }
        context
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Database file to check (defaults to the configured database).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Drug key; normalized the same way as lookups.
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Record as JSON, e.g. '{"nome": "Ertapenem", "classe": "Carbapenem"}'.
    #[arg(value_name = "RECORD_JSON")]
    pub record: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
