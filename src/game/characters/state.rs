// Zombie behaviour states

/// Where a zombie is in its pursue/stun/death cycle
///
/// The state is derived from the zombie's stun timer and alive flag rather
/// than stored, so it can never disagree with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZombieState {
    /// Chasing the player
    #[default]
    Pursuing,
    /// Knocked back after a hit; no steering, no attacks
    Stunned,
    /// Terminal
    Dead,
}

impl ZombieState {
    /// Resolve the state from the raw fields
    pub fn from_parts(alive: bool, stun_timer: f32) -> Self {
        if !alive {
            Self::Dead
        } else if stun_timer > 0.0 {
            Self::Stunned
        } else {
            Self::Pursuing
        }
    }

    /// Check if the zombie steers towards its target
    pub fn can_move(&self) -> bool {
        matches!(self, Self::Pursuing)
    }

    /// Check if the zombie may land melee hits
    pub fn can_attack(&self) -> bool {
        matches!(self, Self::Pursuing)
    }

    /// Check if the zombie still reacts to hits
    pub fn can_be_hit(&self) -> bool {
        !matches!(self, Self::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(ZombieState::default(), ZombieState::Pursuing);
        assert_eq!(ZombieState::from_parts(true, 0.0), ZombieState::Pursuing);
    }

    #[test]
    fn test_stun_blocks_movement() {
        let state = ZombieState::from_parts(true, 0.2);
        assert_eq!(state, ZombieState::Stunned);
        assert!(!state.can_move());
        assert!(!state.can_attack());
        assert!(state.can_be_hit());
    }

    #[test]
    fn test_expired_stun_is_pursuing() {
        assert_eq!(ZombieState::from_parts(true, -0.01), ZombieState::Pursuing);
    }

    #[test]
    fn test_dead_wins_over_stun() {
        let state = ZombieState::from_parts(false, 0.5);
        assert_eq!(state, ZombieState::Dead);
        assert!(!state.can_be_hit());
        assert!(!state.can_move());
    }
}
