//! CLI module for the xsd-to-sql binary

pub mod args;
pub mod error;
pub mod output;

pub use args::Cli;
pub use error::CliError;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::convert::{ConversionSummary, ConvertOptions, Converter};

/// What a successful invocation did
#[derive(Debug)]
pub enum Outcome {
    /// Too few positional arguments; nothing was converted
    Usage,
    Converted(ConversionSummary),
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run a parsed command line.
pub fn run(cli: &Cli) -> Result<Outcome, CliError> {
    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        return Ok(Outcome::Usage);
    };

    if !cli.extra.is_empty() {
        debug!(count = cli.extra.len(), "Ignoring extra arguments");
    }

    let options = cli.options()?;
    let summary = Converter::new(options).convert_file(input, output)?;
    Ok(Outcome::Converted(summary))
}

impl Cli {
    /// Conversion options selected by the flags
    pub fn options(&self) -> Result<ConvertOptions, CliError> {
        let mut builder = ConvertOptions::builder()
            .trailing_comma(!self.no_trailing_comma)
            .format(self.format);

        if let Some(prefix) = &self.prefix {
            if prefix.trim().is_empty() {
                return Err(CliError::InvalidArgument(
                    "--prefix must not be empty".to_string(),
                ));
            }
            builder = builder.table_prefix(prefix.clone());
        }

        Ok(builder.build())
    }
}
