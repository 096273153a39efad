use super::collision::FixtureKind;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linear_damping: Real,
    angular_damping: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by impulses and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Damping slows the body down when nothing pushes it, which is what
    /// stops a top-down character from sliding forever
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn angular_damping(mut self, damping: Real) -> Self {
        self.angular_damping = damping;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (facing is tracked by the entity, not the body)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            // Top-down world: nothing falls
            .gravity_scale(0.0)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    kind: FixtureKind,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            kind: FixtureKind::Wall,
            is_sensor: false,
            friction: 0.0,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Set the fixture kind used for filtering
    pub fn kind(mut self, kind: FixtureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Make this a sensor (detects contact but doesn't push back)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape area)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider. Every game collider reports collision events.
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.kind.interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// Rigid body and collider configurations for the game's objects
pub mod presets {
    use super::*;

    /// Zombie body: dynamic, heavily damped so steering impulses don't
    /// accumulate into runaway speed
    pub fn zombie_body(x: Real, y: Real, damping: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .linear_damping(damping)
            .angular_damping(damping)
            .lock_rotation()
            .build()
    }

    pub fn zombie_collider(radius: Real, density: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .kind(FixtureKind::Zombie)
            .density(density)
            .build()
    }

    /// Player body: dynamic, never sleeps
    pub fn player_body(x: Real, y: Real, damping: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .linear_damping(damping)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    pub fn player_collider(radius: Real, density: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .kind(FixtureKind::Player)
            .density(density)
            .build()
    }

    /// Pickups sit still and only report overlap
    pub fn pickup_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    pub fn pickup_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .kind(FixtureKind::PowerUp)
            .sensor(true)
            .build()
    }

    pub fn wall_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    pub fn wall_collider(half_width: Real, half_height: Real) -> Collider {
        ColliderBuilder2D::box_shape(half_width, half_height)
            .kind(FixtureKind::Wall)
            .friction(0.3)
            .build()
    }
}
