//! CLI error types

use thiserror::Error;

use crate::convert::ConvertError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
