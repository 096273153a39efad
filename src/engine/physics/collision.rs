use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Fixture categories used for contact filtering and contact dispatch
///
/// Each collider is tagged with one of these so the game can tell what
/// touched what when the physics step reports a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    /// The player character
    Player = 0b0000_0001,

    /// Hostile agents
    Zombie = 0b0000_0010,

    /// Power-up pickups (sensors)
    PowerUp = 0b0000_0100,

    /// Static level geometry
    Wall = 0b0000_1000,
}

impl FixtureKind {
    /// Convert to rapier2d's InteractionGroups
    pub fn interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The player touches everything in the level
            FixtureKind::Player => Group::from_bits_truncate(
                FixtureKind::Zombie as u32 | FixtureKind::PowerUp as u32 | FixtureKind::Wall as u32,
            ),

            // Zombies jostle each other, hit walls and the player, but walk
            // straight through pickups
            FixtureKind::Zombie => Group::from_bits_truncate(
                FixtureKind::Player as u32 | FixtureKind::Zombie as u32 | FixtureKind::Wall as u32,
            ),

            // Pickups only react to the player
            FixtureKind::PowerUp => Group::from_bits_truncate(FixtureKind::Player as u32),

            FixtureKind::Wall => Group::from_bits_truncate(
                FixtureKind::Player as u32 | FixtureKind::Zombie as u32,
            ),
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// Both colliders involved in the event
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            }
            | CollisionEvent::Stopped {
                collider1,
                collider2,
            } => (collider1, collider2),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, CollisionEvent::Started { .. })
    }
}

/// Queue for storing collision events during physics step
///
/// Events accumulate until the game drains them, so nothing raised by a
/// step is lost before the entities that care about it get to see it.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Add a collision event
    pub(crate) fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Melee only cares about touching, not how hard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_kind_bits() {
        let kinds = [
            FixtureKind::Player,
            FixtureKind::Zombie,
            FixtureKind::PowerUp,
            FixtureKind::Wall,
        ];

        for (i, a) in kinds.iter().enumerate() {
            for (j, b) in kinds.iter().enumerate() {
                if i != j {
                    assert_ne!(*a as u32, *b as u32, "Kinds must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_zombie_touches_player() {
        let zombie = FixtureKind::Zombie.interaction_groups();
        let player = FixtureKind::Player.interaction_groups();

        assert!(zombie.test(player), "Zombies must be able to reach the player");
    }

    #[test]
    fn test_zombie_ignores_pickups() {
        let zombie = FixtureKind::Zombie.interaction_groups();
        let pickup = FixtureKind::PowerUp.interaction_groups();

        assert!(!zombie.test(pickup), "Zombies should not trigger power-ups");
    }

    #[test]
    fn test_queue_drain_empties() {
        let queue = CollisionEventQueue::new();
        let event = CollisionEvent::Started {
            collider1: ColliderHandle::from_raw_parts(0, 0),
            collider2: ColliderHandle::from_raw_parts(1, 0),
        };
        queue.push(event);
        queue.push(CollisionEvent::Stopped {
            collider1: ColliderHandle::from_raw_parts(0, 0),
            collider2: ColliderHandle::from_raw_parts(1, 0),
        });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], event);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_event_colliders() {
        let a = ColliderHandle::from_raw_parts(3, 0);
        let b = ColliderHandle::from_raw_parts(7, 1);
        let event = CollisionEvent::Stopped {
            collider1: a,
            collider2: b,
        };
        assert_eq!(event.colliders(), (a, b));
        assert!(!event.is_started());
    }
}
