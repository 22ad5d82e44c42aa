//! Per-tick numeric integration of movable entities.

use glam::Vec2;

use super::entity::Movable;
use super::world::World;

/// Entity-aware hook remapping a velocity or gravity vector before it is
/// applied (friction, wind zones, ...).
pub type VectorTransformFn = Box<dyn Fn(Vec2, &dyn Movable) -> Vec2>;

/// Integrator options. Gravity is off unless set.
#[derive(Default)]
pub struct MoverOptions {
    pub gravity: Option<Vec2>,
    pub velocity_transform: Option<VectorTransformFn>,
    pub gravity_transform: Option<VectorTransformFn>,
}

/// Advances every movable entity one discrete step per call.
pub struct ObjectMover {
    gravity: Option<Vec2>,
    velocity_transform: Option<VectorTransformFn>,
    gravity_transform: Option<VectorTransformFn>,
}

impl ObjectMover {
    pub fn new(options: MoverOptions) -> Self {
        Self {
            gravity: options.gravity,
            velocity_transform: options.velocity_transform,
            gravity_transform: options.gravity_transform,
        }
    }

    /// Run one discrete step: position integrates the old velocity, then
    /// gravity accumulates into velocity (semi-implicit Euler). Entities
    /// without the movable capability are skipped.
    pub fn advance(&self, world: &World) {
        let dt = 1.0 / world.ticks_per_second() as f32;

        for entity in world.entities() {
            let mut entity = entity.borrow_mut();
            let Some(movable) = entity.as_movable() else {
                continue;
            };

            let velocity = movable.velocity();
            let applied_velocity = match &self.velocity_transform {
                Some(transform) => transform(velocity, movable),
                None => velocity,
            };
            let position = movable.position() + applied_velocity * dt;
            movable.set_position(position);

            if let Some(gravity) = self.gravity {
                let applied_gravity = match &self.gravity_transform {
                    Some(transform) => transform(gravity, movable),
                    None => gravity,
                };
                let velocity =
                    movable.velocity() + applied_gravity * dt * movable.gravity_factor();
                movable.set_velocity(velocity);
            }
        }
    }
}
