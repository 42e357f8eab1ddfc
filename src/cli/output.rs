//! Messages printed by the CLI

use std::path::Path;

/// Printed when fewer than two positional arguments are given
pub const USAGE: &str = "Usage: xsd-to-sql <path_to_xsd> <output_file_path>";

/// Success line naming the output file
pub fn format_success(output: &Path) -> String {
    format!("T-SQL script has been written to: {}", output.display())
}

/// Failure report: the error, then each underlying cause on its own line.
pub fn format_error(err: &anyhow::Error) -> String {
    let mut report = format!("An error occurred: {}", err);
    for cause in err.chain().skip(1) {
        report.push_str(&format!("\n    caused by: {}", cause));
    }
    report
}
