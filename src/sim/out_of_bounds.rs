//! Out-of-bounds detection for bounded entities.

use super::entity::EntityRef;
use super::world::World;

/// Reports bounded entities whose rectangle left the world entirely.
#[derive(Default)]
pub struct OutOfBoundDetector;

impl OutOfBoundDetector {
    pub fn new() -> Self {
        Self
    }

    /// Invoke the callback once per bounded entity fully outside the world
    /// bounds. Partial overlap is never reported.
    pub fn detect(&self, world: &World, mut on_out_of_bounds: impl FnMut(&EntityRef)) {
        let world_bounds = world.bounds();

        for entity in world.entities() {
            let bounds = {
                let entity = entity.borrow();
                match entity.as_bounded() {
                    Some(bounded) => bounded.bounds(),
                    None => continue,
                }
            };

            if world_bounds.disjoint(&bounds) {
                on_out_of_bounds(entity);
            }
        }
    }
}
