//! Command-line arguments

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::convert::OutputFormat;

/// Convert a dataset XSD into SQL Server CREATE TABLE statements
#[derive(Parser, Debug)]
#[command(name = "xsd-to-sql", version, about)]
pub struct Cli {
    /// XSD file to convert
    #[arg(value_name = "XSD_INPUT")]
    pub input: Option<PathBuf>,

    /// SQL file to write (overwritten if it exists)
    #[arg(value_name = "SQL_OUTPUT")]
    pub output: Option<PathBuf>,

    #[arg(hide = true, value_name = "IGNORED")]
    pub extra: Vec<OsString>,

    /// Table name prefix (default: input file name without extension)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Omit the comma after the last column of each table
    #[arg(long)]
    pub no_trailing_comma: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sql)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
