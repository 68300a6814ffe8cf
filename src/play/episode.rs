use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{region_count, GridState, Player, Position};

/// One turn of a match. `position` is `None` when the player passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchMove {
    pub player: Player,
    pub position: Option<Position>,
}

/// Result of playing a single match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub winner: Option<Player>,
    pub history: Vec<MatchMove>,
    pub final_state: GridState,
}

impl MatchResult {
    pub fn turns(&self) -> usize {
        self.history.len()
    }
}

/// Play `agent_a` (moving first) against `agent_b` from `start`.
///
/// The player whose move raises the region count wins. The match is drawn
/// when the board is emptied or both players pass in succession. An agent
/// returning anything other than its input or a one-move successor is an
/// error.
pub fn play_match(
    start: &GridState,
    agent_a: &mut dyn Agent,
    agent_b: &mut dyn Agent,
) -> Result<MatchResult, MatchError> {
    let mut state = start.clone();
    let mut player = Player::A;
    let mut history = Vec::new();
    let mut consecutive_passes = 0;

    let winner = loop {
        if state.is_empty() {
            log::info!("no counters left after {} turns: draw", history.len());
            break None;
        }

        let agent: &mut dyn Agent = match player {
            Player::A => &mut *agent_a,
            Player::B => &mut *agent_b,
        };
        let next = agent.select_move(&state);

        if next == state {
            log::info!("{} ({}) passes", player.name(), agent.name());
            history.push(MatchMove {
                player,
                position: None,
            });
            consecutive_passes += 1;
            if consecutive_passes >= 2 {
                log::info!("both players passed: draw");
                break None;
            }
            player = player.other();
            continue;
        }

        let position = state
            .move_to(&next)
            .ok_or(MatchError::IllegalMove { player })?;
        consecutive_passes = 0;
        history.push(MatchMove {
            player,
            position: Some(position),
        });
        log::debug!("{} ({}) takes from {position}", player.name(), agent.name());

        let won = region_count(&next) > region_count(&state);
        state = next;
        if won {
            log::info!("{} ({}) found the hinger", player.name(), agent.name());
            break Some(player);
        }
        player = player.other();
    };

    Ok(MatchResult {
        winner,
        history,
        final_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AgentConfig, RandomAgent, SearchAgent, Strategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(s: &str) -> GridState {
        s.parse().unwrap()
    }

    /// Always hands back whatever it was given.
    struct Passer;

    impl Agent for Passer {
        fn select_move(&mut self, state: &GridState) -> GridState {
            state.clone()
        }

        fn name(&self) -> &str {
            "Passer"
        }
    }

    /// Returns a board that is two moves away.
    struct Cheater;

    impl Agent for Cheater {
        fn select_move(&mut self, _state: &GridState) -> GridState {
            GridState::zeros(1, 3).unwrap()
        }

        fn name(&self) -> &str {
            "Cheater"
        }
    }

    #[test]
    fn test_first_player_takes_open_hinger() {
        let mut a = SearchAgent::new(Strategy::Minimax, AgentConfig::default(), StdRng::seed_from_u64(1));
        let mut b = RandomAgent::seeded(2);
        let result = play_match(&grid("1,1,1"), &mut a, &mut b).unwrap();
        assert_eq!(result.winner, Some(Player::A));
        assert_eq!(result.turns(), 1);
        assert_eq!(result.final_state, grid("1,0,1"));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut a = RandomAgent::seeded(1);
        let mut b = RandomAgent::seeded(2);
        let result = play_match(&GridState::zeros(2, 2).unwrap(), &mut a, &mut b).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.turns(), 0);
    }

    #[test]
    fn test_two_passes_end_in_draw() {
        let mut a = Passer;
        let mut b = Passer;
        let result = play_match(&grid("2,2"), &mut a, &mut b).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.turns(), 2);
        assert!(result.history.iter().all(|m| m.position.is_none()));
    }

    #[test]
    fn test_illegal_state_is_rejected() {
        let mut a = RandomAgent::seeded(1);
        let mut b = Cheater;
        let err = play_match(&grid("2,2,2"), &mut a, &mut b).unwrap_err();
        assert_eq!(err, MatchError::IllegalMove { player: Player::B });
    }

    #[test]
    fn test_random_match_terminates() {
        let start = grid("2,1,0,2,1;1,2,4,2,1;0,0,0,4,1;1,1,1,0,0");
        let mut a = RandomAgent::seeded(5);
        let mut b = RandomAgent::seeded(6);
        let result = play_match(&start, &mut a, &mut b).unwrap();
        assert!(result.turns() as u64 <= start.total());
        if let Some(last) = result.history.last() {
            if result.winner.is_some() {
                assert_eq!(result.winner, Some(last.player));
            }
        }
    }
}
