use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("unknown preference: {0}")]
    Unknown(String),
}

/// Forced-choice answer: which side depth map looks closer to reality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    Left,
    Right,
}

impl Preference {
    pub const ALL: [Preference; 2] = [Preference::Left, Preference::Right];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Left => "Left",
            Preference::Right => "Right",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Self::Left),
            "Right" => Ok(Self::Right),
            other => Err(PreferenceError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_exactly() {
        assert_eq!("Left".parse::<Preference>().unwrap(), Preference::Left);
        assert_eq!("Right".parse::<Preference>().unwrap(), Preference::Right);
        assert!("left".parse::<Preference>().is_err());
        assert!("Select an option".parse::<Preference>().is_err());
    }
}
