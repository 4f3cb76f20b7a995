//! Referee configuration.

/// Half-move clock value at which the game is drawn for too many
/// reversible moves
pub const DEFAULT_REVERSIBLE_MOVE_LIMIT: u32 = 2000;

/// Rule options fixed for the lifetime of one game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefereeConfig {
    /// Berkeley + Any: players may ask whether any pawn capture exists
    pub any_rule: bool,
    pub reversible_move_limit: u32,
}

impl RefereeConfig {
    pub fn with_any_rule(mut self, any_rule: bool) -> Self {
        self.any_rule = any_rule;
        self
    }

    pub fn with_reversible_move_limit(mut self, limit: u32) -> Self {
        self.reversible_move_limit = limit;
        self
    }
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            any_rule: true,
            reversible_move_limit: DEFAULT_REVERSIBLE_MOVE_LIMIT,
        }
    }
}
