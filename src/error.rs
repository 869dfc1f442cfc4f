//! Errors surfaced by the engine.  Everything here is reported synchronously
//! from `RunController::start`, before any run begins.

use std::fmt;

/// Reasons a setting is refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The palette has no colours, so there is nothing to cycle through
    EmptyPalette,
    /// The delay unit must be a positive number of milliseconds
    NonPositiveDelay(i64),
    /// A colour string was not `#RRGGBB`
    MalformedColour(String),
    /// A per-colour channel (white or brightness values) does not line up
    /// with the palette
    ChannelLength {
        channel: &'static str,
        colours: usize,
        values: usize,
    },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPalette => write!(f, "palette must contain at least one colour"),
            Self::NonPositiveDelay(ms) => {
                write!(f, "delay must be a positive number of milliseconds, got {ms}")
            }
            Self::MalformedColour(s) => write!(f, "expected a #RRGGBB colour, got {s:?}"),
            Self::ChannelLength {
                channel,
                colours,
                values,
            } => write!(
                f,
                "{channel} has {values} entries but the palette has {colours} colours"
            ),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Errors returned by the run controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidInput(InvalidInput),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
        }
    }
}

impl From<InvalidInput> for EngineError {
    fn from(e: InvalidInput) -> Self {
        Self::InvalidInput(e)
    }
}
