//! Crate-level error types.

use std::fmt;

/// Errors produced while configuring or installing counters.
///
/// Once counters are running nothing is reported: bad attributes render
/// `NaN` and removed elements simply stop animating.
#[derive(Debug)]
pub enum CountUpError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// An option value outside its accepted range.
    InvalidOption(String),
    /// Element selector could not be parsed.
    Selector(String),
    /// Simulator script parsing failure.
    ScriptParse(String),
    /// The host environment (browser APIs) rejected an operation.
    Host(String),
}

impl fmt::Display for CountUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
            Self::Selector(msg) => write!(f, "selector error: {msg}"),
            Self::ScriptParse(msg) => {
                write!(f, "script parse error: {msg}")
            }
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for CountUpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CountUpError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
