use serde::Serialize;

/// One of the two seats at the board. `A` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::A => "Player A",
            Player::B => "Player B",
        }
    }
}
