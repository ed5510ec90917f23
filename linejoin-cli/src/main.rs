/*!
  Binary for running the line join experiments: lj
*/

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

use std::io::{self, Write};

use clap::Parser;
use colored::Colorize;
use linejoin_cli::{cli::CliApp, error::CliError, experiments::ExperimentRunner};

fn run(cli: CliApp) -> Result<(), CliError> {
    let mut runner = ExperimentRunner::new(io::stdout().lock(), cli.experiment)?;

    runner.run_all(&cli.experiments)?;

    let total_time = runner.timing().total_system_time().as_millis();
    let timing_tree = cli
        .detailed_timing
        .then(|| runner.timing().create_tree_string("lj"));

    let mut out = runner.into_inner();
    writeln!(
        out,
        "Experiments completed in {}{}.",
        total_time.to_string().green().bold(),
        "ms".green().bold()
    )?;

    if let Some(tree) = timing_tree {
        writeln!(out, "\n{tree}")?;
    }

    Ok(())
}

fn main() {
    let cli = CliApp::parse();

    cli.logging.initialize_logging();
    log::info!("Version: {}", clap::crate_version!());
    log::debug!("Experiments: {:?}", cli.experiments);

    run(cli).unwrap_or_else(|err| {
        log::error!("{} {err}", "error:".red().bold());
        std::process::exit(1)
    })
}
