// Routing of physics contacts to game entities
//
// The physics step only knows colliders. Dispatch looks up both
// fixture tags of each queued event and turns the pairs the game cares
// about into contacts addressed to a specific zombie or pickup.

use log::debug;

use crate::engine::physics::{CollisionEvent, FixtureKind, FixtureTag, PhysicsWorld};
use crate::game::ids::{from_owner, PowerUpId, ZombieId};

/// A contact the combat core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// The player started touching this zombie
    MeleeBegin(ZombieId),
    /// The player stopped touching this zombie
    MeleeEnd(ZombieId),
    /// The player walked into this pickup
    PickupTouched(PowerUpId),
}

/// Take every event raised since the last call and resolve it, in the order
/// the physics step raised them
pub fn dispatch(physics: &mut PhysicsWorld) -> Vec<Contact> {
    let events = physics.drain_collision_events();
    let physics: &PhysicsWorld = physics;
    events
        .iter()
        .filter_map(|event| resolve(physics, event))
        .collect()
}

/// Resolve a single event. Pairs that don't involve the player, or whose
/// colliders are already gone, resolve to nothing.
pub fn resolve(physics: &PhysicsWorld, event: &CollisionEvent) -> Option<Contact> {
    let (a, b) = event.colliders();
    let (Some(tag_a), Some(tag_b)) = (physics.fixture_tag(a), physics.fixture_tag(b)) else {
        debug!("Dropping contact on untagged or removed collider: {:?}", event);
        return None;
    };

    let other = match (tag_a.kind, tag_b.kind) {
        (FixtureKind::Player, _) => tag_b,
        (_, FixtureKind::Player) => tag_a,
        _ => return None,
    };

    match other {
        FixtureTag {
            kind: FixtureKind::Zombie,
            owner,
        } => {
            let id = from_owner(owner);
            Some(if event.is_started() {
                Contact::MeleeBegin(id)
            } else {
                Contact::MeleeEnd(id)
            })
        }
        FixtureTag {
            kind: FixtureKind::PowerUp,
            owner,
        } if event.is_started() => Some(Contact::PickupTouched(from_owner(owner))),
        _ => None,
    }
}
