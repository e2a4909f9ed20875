//! CLI error handling

use std::fmt;

use cpr_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Install or configuration error
    Install(cpr_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Machine-readable form used in `--json` mode
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CliError::Install(e) => serde_json::json!({
                "error": e.user_message(),
                "code": e.user_code(),
                "hint": e.user_hint(),
                "remediation": e.remediation(),
            }),
            CliError::Io(e) => serde_json::json!({
                "error": e.to_string(),
                "code": "error.io",
            }),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Install(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;

                let steps = e.remediation();
                if !steps.is_empty() {
                    write!(f, "\n\nManual installation steps:")?;
                    for (i, step) in steps.iter().enumerate() {
                        write!(f, "\n{}. {step}", i + 1)?;
                    }
                    writeln!(f)?;
                }
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Install(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<cpr_errors::Error> for CliError {
    fn from(e: cpr_errors::Error) -> Self {
        CliError::Install(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
