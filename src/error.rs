//! Application error type.
//!
//! Every fallible boundary in the crate returns `AppError`. It carries the
//! process exit code so `main` can stay a two-line match.
//!
//! Exit codes:
//! - `2`: dataset load / file I/O failures
//! - `3`: invalid selection passed on the command line
//! - `4`: terminal UI failures

/// Dataset could not be opened, read, or written.
pub const EXIT_INPUT: u8 = 2;
/// A command-line selection could not be interpreted.
pub const EXIT_SELECTION: u8 = 3;
/// The terminal could not be driven.
pub const EXIT_TERMINAL: u8 = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(EXIT_TERMINAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::input("CSV file not found: prices.csv");
        assert_eq!(err.to_string(), "CSV file not found: prices.csv");
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }
}
