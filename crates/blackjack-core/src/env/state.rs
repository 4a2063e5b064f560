use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of cells along each state axis. Covers every non-terminal sum.
pub const TABLE_SPAN: usize = 22;

/// Observable state as `(player sum, dealer value)`.
///
/// Every table in the workspace is laid out `[player][dealer]` to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub player: u8,
    pub dealer: u8,
}

impl State {
    pub const fn new(player: u8, dealer: u8) -> Self {
        Self { player, dealer }
    }

    /// Flat cell index into a `TABLE_SPAN x TABLE_SPAN` grid.
    ///
    /// Panics if either component is outside the table span.
    pub fn index(self) -> usize {
        let (player, dealer) = (self.player as usize, self.dealer as usize);
        assert!(
            player < TABLE_SPAN && dealer < TABLE_SPAN,
            "state {} outside table span",
            self
        );
        player * TABLE_SPAN + dealer
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            player: (index / TABLE_SPAN) as u8,
            dealer: (index % TABLE_SPAN) as u8,
        }
    }

    /// Folds an estimate of the hidden card into the dealer component.
    pub const fn with_dealer_offset(self, offset: u8) -> Self {
        Self {
            player: self.player,
            dealer: self.dealer + offset,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.player, self.dealer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hit,
    Stick,
}

impl Action {
    /// Iteration order doubles as the tie-break order for greedy selection.
    pub const ALL: [Action; 2] = [Action::Hit, Action::Stick];
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        match self {
            Action::Hit => 0,
            Action::Stick => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::Hit),
            1 => Some(Action::Stick),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Hit => "hit",
            Action::Stick => "stick",
        })
    }
}
