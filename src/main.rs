//! pdftoolkit - Merge, split, extract, watermark and rotate PDF documents.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use pdftoolkit::cli::{Cli, Command};
use pdftoolkit::config::{Config, OverwriteMode};
use pdftoolkit::error::{Error, Result};
use pdftoolkit::inputs::InputList;
use pdftoolkit::ops::{OperationReport, Operations};
use pdftoolkit::output::{
    OutputFormatter, create_formatter, display_document_info, display_report,
};
use pdftoolkit::selection::{PageList, PageRange};
use pdftoolkit::storage::RecentFiles;
use pdftoolkit::validation::{ValidationSummary, Validator};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Diagnostic logs go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    match &cli.command {
        Command::Info { inputs, json } => {
            let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
            return show_info(inputs, *json, &formatter).await;
        }
        Command::Recent { clear } => {
            let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
            return show_recent(&cli, *clear, &formatter);
        }
        _ => {}
    }

    let config = cli.to_config()?;
    let formatter = create_formatter(&config);

    Validator::new()
        .validate_output(&config.output, config.overwrite_mode)
        .await?;

    if !config.dry_run {
        handle_output_overwrite(&config, &formatter)?;
    }

    let ops = Operations::from_config(&config);
    let report = match &cli.command {
        Command::Merge { inputs, output } => {
            let mut list = InputList::new();
            list.add_paths(inputs)?;
            if list.exclude(output) > 0 {
                formatter.warning(&format!(
                    "Skipping output file found among inputs: {}",
                    output.display()
                ));
            }
            formatter.info(&format!("Merging {} documents...", list.len()));
            ops.merge(&list, output).await?
        }
        Command::Split {
            input,
            range,
            output,
        } => {
            let range = PageRange::parse(range)?;
            ops.split(input, &range, output).await?
        }
        Command::Extract {
            input,
            pages,
            output,
            ..
        } => {
            let list = PageList::parse(pages)?;
            ops.extract(input, &list, output).await?
        }
        Command::Watermark {
            input,
            watermark,
            output,
        } => ops.watermark(input, watermark, output).await?,
        Command::Rotate {
            input,
            angle,
            output,
        } => {
            let rotation = cli.rotation(angle)?;
            ops.rotate(input, rotation, output).await?
        }
        Command::Info { .. } | Command::Recent { .. } => return Ok(()),
    };

    remember_sources(&cli, &report, &formatter);
    display_report(&formatter, &report);

    Ok(())
}

/// Record the sources of a finished operation in the recent files list.
///
/// Failures are reported as warnings; the operation already succeeded.
fn remember_sources(cli: &Cli, report: &OperationReport, formatter: &OutputFormatter) {
    let Some(store) = cli.recent_store() else {
        return;
    };

    let mut recent = match RecentFiles::load(&store) {
        Ok(recent) => recent,
        Err(err) => {
            formatter.warning(&format!("Could not load recent files: {err}"));
            return;
        }
    };

    for source in &report.sources {
        recent.record(source);
    }

    if let Err(err) = recent.save() {
        formatter.warning(&format!("Could not save recent files: {err}"));
    }
}

async fn show_info(
    inputs: &[std::path::PathBuf],
    json: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let summary: ValidationSummary = Validator::new().validate_files(inputs).await?;

    if json {
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| Error::document(format!("Failed to encode JSON: {e}")))?;
        formatter.raw(&text);
        return Ok(());
    }

    for info in &summary.results {
        display_document_info(formatter, info);
    }

    if summary.results.len() > 1 {
        formatter.blank_line();
        formatter.info(&format!(
            "Total: {} pages, {}",
            summary.total_pages,
            summary.format_total_size()
        ));
    }

    Ok(())
}

fn show_recent(cli: &Cli, clear: bool, formatter: &OutputFormatter) -> Result<()> {
    let Some(store) = cli.recent_store() else {
        formatter.warning("Recent files are disabled");
        return Ok(());
    };

    let mut recent = RecentFiles::load(&store)?;

    if clear {
        recent.clear();
        recent.save()?;
        formatter.success("Cleared recent files");
        return Ok(());
    }

    if recent.is_empty() {
        formatter.info("No recent files");
        return Ok(());
    }

    // Most recent first.
    for (index, path) in recent.entries().iter().rev().enumerate() {
        formatter.list_item(index + 1, &path.display().to_string());
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
fn handle_output_overwrite(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(Error::output_exists(&config.output)),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(Error::output_exists(&config.output));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin().read_line(&mut response)?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(Error::Cancelled)
            }
        }
    }
}
