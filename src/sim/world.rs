//! World container: simulation bounds, tick rate, and the entity set.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{entity_id, EntityRef};

/// Axis-aligned rectangle in projection space.
///
/// `top_left` must not exceed `bottom_right` on either axis; callers keep
/// that invariant, it is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl Bounds {
    pub fn new(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    /// True when the rectangles share no area. Edge contact still counts as
    /// overlap.
    #[inline]
    pub fn disjoint(&self, other: &Bounds) -> bool {
        other.bottom_right.x < self.top_left.x
            || other.bottom_right.y < self.top_left.y
            || other.top_left.x > self.bottom_right.x
            || other.top_left.y > self.bottom_right.y
    }
}

/// Owns the simulation bounds, tick rate and entity set. Pure container:
/// subsystems get a `&World` and scan the current membership; game logic
/// adds and removes entities, the world never creates or destroys them.
pub struct World {
    bounds: Bounds,
    ticks_per_second: u32,
    entities: Vec<EntityRef>,
}

impl World {
    pub fn new(bounds: Bounds, ticks_per_second: u32) -> Self {
        Self {
            bounds,
            ticks_per_second,
            entities: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Current entity set, in insertion order (kept stable so subsystem
    /// scans are deterministic).
    pub fn entities(&self) -> &[EntityRef] {
        &self.entities
    }

    pub fn contains(&self, entity: &EntityRef) -> bool {
        let id = entity_id(entity);
        self.entities.iter().any(|e| entity_id(e) == id)
    }

    /// Add an entity; re-adding one already present is a no-op.
    pub fn add(&mut self, entity: EntityRef) {
        if !self.contains(&entity) {
            self.entities.push(entity);
        }
    }

    /// Remove an entity; unknown entities are a no-op.
    pub fn remove(&mut self, entity: &EntityRef) {
        let id = entity_id(entity);
        self.entities.retain(|e| entity_id(e) != id);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
