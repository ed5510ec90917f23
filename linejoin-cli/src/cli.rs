//! Contains structures and functionality for the binary
use clap::ArgAction;

use crate::{error::CliError, experiments::Experiment};

/// Environment variable that sets the log level
const LOG_ENVIRONMENT_VARIABLE: &str = "LJ_LOG";

/// Cli Arguments related to logging
#[derive(clap::Args, Debug)]
pub struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Reduce log verbosity to show only errors (equivalent to --log error)
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
    /// Set log verbosity (default is "warn")
    #[arg(long = "log", value_parser=clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"]), group = "verbosity")]
    log_level: Option<String>,
}

impl LoggingArgs {
    /// Initialising Logging
    ///
    /// Sets the logging verbosity to the given log-level in the following order:
    ///  * `Info`, `Debug`, `Trace`; depending on the count of `-v`
    ///  * `Error` when `-q` is used
    ///  * The `LJ_LOG` environment variable value
    ///  * `Warn` otherwise
    pub fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();

        builder.filter_level(log::LevelFilter::Warn);
        builder.parse_env(LOG_ENVIRONMENT_VARIABLE);

        if let Some(ref level) = self.log_level {
            builder.parse_filters(level);
        } else if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            });
        }
        builder.init();
    }
}

/// Cli arguments related to the experiments
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct ExperimentArgs {
    /// Seed for generating random relations (default: chosen randomly)
    #[arg(long = "seed")]
    pub seed: Option<u64>,
    /// Base number of tuples per relation in the random experiments
    /// (default: 100 for "random" and 1000 for "dangling")
    #[arg(long = "rows")]
    pub rows: Option<usize>,
    /// Print the result relations of the random experiments
    #[arg(long = "print-results", default_value = "false")]
    pub print_results: bool,
}

impl ExperimentArgs {
    /// Check that the arguments can be used to run experiments.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.rows == Some(0) {
            return Err(CliError::InvalidParameter {
                parameter: "--rows must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Line join experiments
#[derive(clap::Parser, Debug)]
#[command(name = "lj", version, about)]
pub struct CliApp {
    /// Experiments to run, in the given order
    #[arg(value_enum, default_values_t = [Experiment::All])]
    pub experiments: Vec<Experiment>,
    /// Arguments related to logging
    #[command(flatten)]
    pub logging: LoggingArgs,
    /// Arguments related to the experiments
    #[command(flatten)]
    pub experiment: ExperimentArgs,
    /// Display detailed timing information
    #[arg(long = "detailed-timing", default_value = "false")]
    pub detailed_timing: bool,
}
