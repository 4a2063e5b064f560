use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How much of the dealer's hand the player gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The dealer's full hand total is part of the state.
    Full,
    /// Only the dealer's first card is visible.
    Hidden,
    /// Like `Hidden`, but the dealer's second card is revealed once the
    /// episode ends.
    Pomdp,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Full, Mode::Hidden, Mode::Pomdp];

    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Hidden => "hidden",
            Mode::Pomdp => "pomdp",
        }
    }

    pub const fn reveals_hidden_card(self) -> bool {
        matches!(self, Mode::Pomdp)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown observability mode {0:?} (expected full, hidden or pomdp)")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Mode::Full),
            "hidden" => Ok(Mode::Hidden),
            "pomdp" => Ok(Mode::Pomdp),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}
