use crate::game::Player;

use super::episode::MatchResult;

/// Running tally over a series of matches.
#[derive(Debug, Clone, Default)]
pub struct MatchMetrics {
    wins_a: usize,
    wins_b: usize,
    draws: usize,
    total_turns: usize,
}

impl MatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &MatchResult) {
        match result.winner {
            Some(Player::A) => self.wins_a += 1,
            Some(Player::B) => self.wins_b += 1,
            None => self.draws += 1,
        }
        self.total_turns += result.turns();
    }

    pub fn games(&self) -> usize {
        self.wins_a + self.wins_b + self.draws
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::A => self.wins_a,
            Player::B => self.wins_b,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Fraction of recorded games won by `player`.
    pub fn win_rate(&self, player: Player) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.wins(player) as f32 / games as f32
    }

    pub fn average_length(&self) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.total_turns as f32 / games as f32
    }
}
