//! Session type value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidSessionTypeError;

/// All available session types
pub const ALL_SESSION_TYPES: &[SessionType] = &[SessionType::Initial, SessionType::FollowUp];

/// Session type identifiers for report templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionType {
    #[default]
    Initial,
    FollowUp,
}

impl SessionType {
    /// Get the human-readable label for this session type
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Initial => "Initial Session",
            Self::FollowUp => "Follow-Up Session",
        }
    }

    /// Get the string identifier for this session type
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::FollowUp => "followup",
        }
    }

    /// Get the tag used in exported report filenames
    pub const fn export_tag(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::FollowUp => "FollowUp",
        }
    }
}

impl FromStr for SessionType {
    type Err = InvalidSessionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" => Ok(Self::Initial),
            "followup" | "follow-up" => Ok(Self::FollowUp),
            _ => Err(InvalidSessionTypeError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
