use std::fmt;
use std::io;

use uartlink_serial::SerialError;

/// Clean end-of-input shutdown.
pub const SUCCESS: i32 = 0;
/// Fatal errors exit with the status a shell reports for `exit(-1)`.
pub const FATAL: i32 = 255;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(FATAL, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Anything that invalidates the serial session is fatal.
pub fn serial_error(context: &str, err: SerialError) -> CliError {
    CliError::fatal(format!("{context}: {err}"))
}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::fatal(format!("{context}: {err}"))
}
