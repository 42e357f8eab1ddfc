//! xsd-to-sql: `xsd-to-sql <xsd-input-path> <sql-output-path>`

use std::process::ExitCode;

use clap::Parser;
use xsd_to_sql::cli::{self, Cli, Outcome, output};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    match cli::run(&cli) {
        Ok(Outcome::Usage) => {
            println!("{}", output::USAGE);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Converted(summary)) => {
            println!("{}", output::format_success(&summary.output));
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", output::format_error(&anyhow::Error::new(err)));
            ExitCode::FAILURE
        }
    }
}
