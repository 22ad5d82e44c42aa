//! Simulation module
//!
//! The world/entity model and the per-tick subsystems. Everything here runs
//! on one thread: subsystems borrow the world for a single pass and act on
//! the entities exposing the matching capability.

pub mod collision;
pub mod entity;
pub mod mover;
pub mod out_of_bounds;
pub mod tween;
pub mod world;

pub use collision::{segments_intersect, CollisionDetector, CollisionInfo, Segment};
pub use entity::{
    entity_id, entity_ref, Bounded, Collidable, Drawable, Entity, EntityId, EntityRef, Movable,
    Tweenable,
};
pub use mover::{MoverOptions, ObjectMover, VectorTransformFn};
pub use out_of_bounds::OutOfBoundDetector;
pub use tween::{ObjectTweener, TweenEndFn, TweenOptions};
pub use world::{Bounds, World};
