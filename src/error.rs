use std::fmt;

/// Errors produced by the decorative layer.
///
/// None of these are fatal to the page. The browser glue logs them and
/// carries on without the affected effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration failed to parse or validate.
    Config(String),
    /// A theme name other than `light` or `dark`.
    UnknownTheme(String),
    /// A preset name that matches no tuning set.
    UnknownPreset(String),
    /// The frame scheduler refused a request.
    Schedule(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "invalid config: {msg}"),
            Error::UnknownTheme(name) => write!(f, "unknown theme {name:?}"),
            Error::UnknownPreset(name) => write!(f, "unknown preset {name:?}"),
            Error::Schedule(msg) => write!(f, "frame scheduling failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
