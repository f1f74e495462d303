//! Antibiotic dosing helper CLI.

use clap::{ColorChoice, Parser};
use pk_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use pk_cli::commands::{run_add, run_decide, run_list, run_lookup, run_rules, run_validate};
use pk_cli::config::AppConfig;
use pk_cli::logging::{LogConfig, LogFormat, init_logging};
use pk_cli::types::DecideOutcome;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{
    print_drug_list, print_record_card, print_rules, print_suggestions, print_validation,
    print_verdict,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = AppConfig::resolve(cli.db.clone(), cli.renal_rules.clone());
    let color = cli.color.color;
    let exit_code = match &cli.command {
        Command::List => match run_list(&config) {
            Ok(store) => {
                print_drug_list(&store, color);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Lookup(args) => match run_lookup(&config, args) {
            Ok(result) => {
                if !result.suggestions.is_empty() {
                    print_suggestions(&result.name, &result.suggestions, color);
                }
                match &result.record {
                    Some((key, record)) => {
                        print_record_card(key, record, color);
                        0
                    }
                    None => {
                        eprintln!("error: no drug matches {:?}", result.name);
                        1
                    }
                }
            }
            Err(error) => report_error(&error),
        },
        Command::Decide(args) => match run_decide(&config, args) {
            Ok(DecideOutcome::Verdict(verdict)) => {
                if args.json {
                    print_json(&verdict)
                } else {
                    print_verdict(&verdict, color);
                    0
                }
            }
            Ok(DecideOutcome::Ambiguous { name, candidates }) => {
                print_suggestions(&name, &candidates, color);
                eprintln!("error: {name:?} is not an exact drug key; rerun with one of the suggestions");
                1
            }
            Ok(DecideOutcome::NotFound { name }) => {
                eprintln!("error: no drug matches {name:?}");
                1
            }
            Err(error) => report_error(&error),
        },
        Command::Validate(args) => match run_validate(&config, args) {
            Ok(report) => {
                print_validation(&report);
                if report.is_valid() { 0 } else { 1 }
            }
            Err(error) => report_error(&error),
        },
        Command::Rules => match run_rules(&config) {
            Ok(rules) => {
                print_rules(&rules, color);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Add(args) => match run_add(&config, args) {
            Ok(added) => {
                println!(
                    "Added {} to {} ({} drugs)",
                    added.key,
                    added.path.display(),
                    added.records
                );
                0
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(error) => {
            eprintln!("error: serialize output: {error}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
