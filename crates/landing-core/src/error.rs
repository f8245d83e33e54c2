//! Landing Errors
//!
//! Failures the controllers can report while attaching to a page.
//! Nothing here is user-visible; callers log and carry on.

/// Common result type for controller setup
pub type LandingResult<T> = Result<T, LandingError>;

/// Controller-level errors
#[derive(Debug, Clone, PartialEq)]
pub enum LandingError {
    /// The hamburger button does not hold exactly three `.toggler-line` children
    TogglerLines { found: usize },
    /// A `data-count` value with no leading integer
    InvalidCount { value: String },
    /// The host lacks a browser capability (e.g. IntersectionObserver)
    Unsupported(&'static str),
    /// Page configuration could not be parsed
    Config(String),
    /// A host call threw
    Host(String),
}

impl std::fmt::Display for LandingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LandingError::TogglerLines { found } => {
                write!(f, "Expected 3 toggler lines, found {}", found)
            }
            LandingError::InvalidCount { value } => write!(f, "Invalid data-count: {:?}", value),
            LandingError::Unsupported(what) => write!(f, "Unsupported by host: {}", what),
            LandingError::Config(msg) => write!(f, "Config error: {}", msg),
            LandingError::Host(msg) => write!(f, "Host error: {}", msg),
        }
    }
}

impl std::error::Error for LandingError {}

impl From<serde_json::Error> for LandingError {
    fn from(err: serde_json::Error) -> Self {
        LandingError::Config(err.to_string())
    }
}
