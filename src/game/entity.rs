// Shared state of everything that can be hit

use glam::Vec2;

/// Position, facing and health shared by every combatant
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// World position, mirrored from the physics body each tick
    pub position: Vec2,
    /// Facing angle in degrees
    pub rotation: f32,
    /// Collision footprint
    pub radius: f32,
    health: i32,
    max_health: i32,
    alive: bool,
}

impl Entity {
    pub fn new(position: Vec2, rotation: f32, radius: f32, max_health: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            position,
            rotation,
            radius,
            health: max_health,
            max_health,
            alive: max_health > 0,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Subtract `amount` from health, clamping at zero
    ///
    /// Reaching zero kills the entity for good; damage on a dead entity
    /// changes nothing. Negative amounts count as zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(health: i32) -> Entity {
        Entity::new(Vec2::ZERO, 0.0, 0.5, health)
    }

    #[test]
    fn test_damage_below_health() {
        for d in [0, 1, 37, 99] {
            let mut e = entity(100);
            e.take_damage(d);
            assert!(e.is_alive());
            assert_eq!(e.health(), 100 - d);
        }
    }

    #[test]
    fn test_damage_at_or_above_health_kills() {
        for d in [100, 101, 250, i32::MAX] {
            let mut e = entity(100);
            e.take_damage(d);
            assert!(!e.is_alive());
            assert_eq!(e.health(), 0);

            // Further damage keeps it dead at zero
            e.take_damage(5);
            assert!(!e.is_alive());
            assert_eq!(e.health(), 0);
        }
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut e = entity(50);
        e.take_damage(-10);
        assert_eq!(e.health(), 50);
    }
}
