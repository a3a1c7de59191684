// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod grouper;
pub mod models;
pub mod scanner;
pub mod tree;
pub mod writer;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use self::cli::Cli;
use self::config::resolve_config;
use self::grouper::group_by_depth;
use self::models::{ModuleKey, RuntimeConfig};
use self::scanner::Scanner;
use self::writer::DocumentWriter;

/// What a completed run produced.
#[derive(Debug, Default)]
pub struct Outcome {
    pub documents: usize,
    pub warnings: usize,
}

/// Exit status for a `--strict` run that completed with warnings.
const EXIT_WARNINGS: u8 = 3;

/// Parses arguments, then collects, groups and writes the snapshots.
pub fn run() -> Result<ExitCode> {
    let args = Cli::parse();
    let config = resolve_config(args)?;
    let outcome = generate(&config)?;

    if config.strict && outcome.warnings > 0 {
        log::warn!("Finished with {} warning(s)", outcome.warnings);
        return Ok(ExitCode::from(EXIT_WARNINGS));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn generate(config: &RuntimeConfig) -> Result<Outcome> {
    log::info!("Collecting files...");
    let scanner = Scanner::new(config)?;
    let scan = scanner.scan();
    let modules = group_by_depth(&scan.files, config.split_depth);
    log::debug!("Collected {} files into {} modules", scan.files.len(), modules.len());

    let mut writer = DocumentWriter::new(config);
    let mut outcome = Outcome {
        documents: 0,
        warnings: config.warnings + scan.walk_errors,
    };

    if config.summary_only {
        writer.write_summary(&modules)?;
        outcome.documents = 1;
        return Ok(outcome);
    }

    if let Some(requested) = &config.modules {
        for key in requested {
            let key = ModuleKey::new(key.as_str());
            match modules.get(&key) {
                Some(files) => {
                    writer.write_module_snapshot(&key, files)?;
                    outcome.documents += 1;
                }
                None => {
                    log::warn!("Module '{}' does not exist", key);
                    outcome.warnings += 1;
                }
            }
        }
    } else {
        for (key, files) in &modules {
            writer.write_module_snapshot(key, files)?;
            outcome.documents += 1;
        }
        // Also write a summary for reference
        writer.write_summary(&modules)?;
        outcome.documents += 1;
    }

    outcome.warnings += writer.warnings();
    Ok(outcome)
}
