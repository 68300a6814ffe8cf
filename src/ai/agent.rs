use crate::game::GridState;

/// Universal interface for Hinger players.
pub trait Agent {
    /// Choose the state to move to from `state`. Returning `state` unchanged
    /// means the agent passes (no legal or acceptable move).
    fn select_move(&mut self, state: &GridState) -> GridState;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
