//! Pairwise segment-intersection collision detection.
//!
//! Advisory only: colliding pairs are reported, never resolved.

use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec2;

use super::entity::{entity_id, EntityId, EntityRef};
use super::world::World;

/// A line segment used purely for intersection testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }
}

/// Counter-clockwise orientation of the triple (p1, p2, p3).
#[inline]
fn ccw(p1: Vec2, p2: Vec2, p3: Vec2) -> bool {
    (p3.y - p1.y) * (p2.x - p1.x) > (p2.y - p1.y) * (p3.x - p1.x)
}

/// Strict segment intersection: the endpoints of each segment must lie on
/// opposite orientation sides of the other. Colinear overlap and exact
/// endpoint touching do not count as intersections, and degenerate
/// zero-length segments never intersect anything.
pub fn segments_intersect(a: Segment, b: Segment) -> bool {
    ccw(a.from, b.from, b.to) != ccw(a.to, b.from, b.to)
        && ccw(a.from, a.to, b.from) != ccw(a.from, a.to, b.to)
}

/// An unordered pair of distinct colliding entities.
pub struct CollisionInfo {
    pub entities: [EntityRef; 2],
}

/// Scans all collidable pairs in a world.
#[derive(Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Invoke `on_collision` once per unordered pair of distinct entities
    /// with at least one intersecting segment pair. Every ordered pair is
    /// visited; an identity-pair set keeps reports unique regardless of
    /// iteration order.
    pub fn detect(&self, world: &World, mut on_collision: impl FnMut(CollisionInfo)) {
        let mut reported: HashSet<(EntityId, EntityId)> = HashSet::new();

        for (i, first) in world.entities().iter().enumerate() {
            let first_segments = {
                let entity = first.borrow();
                match entity.as_collidable() {
                    Some(collidable) => collidable.intersection_segments(),
                    None => continue,
                }
            };

            for (j, second) in world.entities().iter().enumerate() {
                if i == j || reported.contains(&pair_key(entity_id(first), entity_id(second))) {
                    continue;
                }

                let second_segments = {
                    let entity = second.borrow();
                    match entity.as_collidable() {
                        Some(collidable) => collidable.intersection_segments(),
                        None => continue,
                    }
                };

                if segment_sets_intersect(&first_segments, &second_segments) {
                    reported.insert(pair_key(entity_id(first), entity_id(second)));
                    on_collision(CollisionInfo {
                        entities: [Rc::clone(first), Rc::clone(second)],
                    });
                }
            }
        }
    }
}

fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The first intersecting segment pair settles the whole entity pair.
fn segment_sets_intersect(a: &[Segment], b: &[Segment]) -> bool {
    a.iter()
        .any(|sa| b.iter().any(|sb| segments_intersect(*sa, *sb)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{entity_ref, Collidable, Entity};
    use crate::sim::world::Bounds;

    struct Wire {
        segments: Vec<Segment>,
    }

    impl Wire {
        fn new(segments: Vec<Segment>) -> Self {
            Self { segments }
        }
    }

    impl Collidable for Wire {
        fn intersection_segments(&self) -> Vec<Segment> {
            self.segments.clone()
        }
    }

    impl Entity for Wire {
        fn as_collidable(&self) -> Option<&dyn Collidable> {
            Some(self)
        }
    }

    struct Inert;

    impl Entity for Inert {}

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
        Segment::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    fn test_world() -> World {
        World::new(Bounds::new(Vec2::ZERO, Vec2::ONE), 30)
    }

    #[test]
    fn test_x_crossing_intersects() {
        assert!(segments_intersect(
            seg(0.0, 0.0, 1.0, 1.0),
            seg(0.0, 1.0, 1.0, 0.0)
        ));
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            seg(0.0, 0.0, 1.0, 0.0),
            seg(0.0, 1.0, 1.0, 1.0)
        ));
    }

    #[test]
    fn test_endpoint_touch_is_not_an_intersection() {
        // Strict orientation convention: sharing an endpoint is a miss.
        assert!(!segments_intersect(
            seg(0.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 2.0, 0.0)
        ));
    }

    #[test]
    fn test_degenerate_segment_never_intersects() {
        assert!(!segments_intersect(
            seg(0.5, 0.5, 0.5, 0.5),
            seg(0.0, 0.0, 1.0, 1.0)
        ));
    }

    #[test]
    fn test_crossing_pair_reported_exactly_once() {
        let mut world = test_world();
        let a = entity_ref(Wire::new(vec![seg(0.0, 0.0, 1.0, 1.0)]));
        let b = entity_ref(Wire::new(vec![seg(0.0, 1.0, 1.0, 0.0)]));
        world.add(a.clone());
        world.add(b.clone());

        let mut collisions = Vec::new();
        CollisionDetector::new().detect(&world, |info| collisions.push(info));

        assert_eq!(collisions.len(), 1);
        let pair = &collisions[0].entities;
        let ids = [entity_id(&pair[0]), entity_id(&pair[1])];
        assert!(ids.contains(&entity_id(&a)));
        assert!(ids.contains(&entity_id(&b)));
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_disjoint_segments_report_nothing() {
        let mut world = test_world();
        world.add(entity_ref(Wire::new(vec![seg(0.0, 0.0, 0.1, 0.0)])));
        world.add(entity_ref(Wire::new(vec![seg(0.0, 1.0, 0.1, 1.0)])));

        let mut count = 0;
        CollisionDetector::new().detect(&world, |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_multi_segment_entities_report_pair_once() {
        // Two segments of `a` cross `b`; the pair must still be one report.
        let mut world = test_world();
        let a = entity_ref(Wire::new(vec![
            seg(0.0, 0.0, 1.0, 1.0),
            seg(0.0, 0.2, 1.0, 1.2),
        ]));
        let b = entity_ref(Wire::new(vec![seg(0.0, 1.0, 1.0, 0.0)]));
        world.add(a);
        world.add(b);

        let mut count = 0;
        CollisionDetector::new().detect(&world, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_three_way_crossings_report_each_pair() {
        let mut world = test_world();
        // Three long segments all crossing near the center.
        world.add(entity_ref(Wire::new(vec![seg(0.0, 0.0, 1.0, 1.0)])));
        world.add(entity_ref(Wire::new(vec![seg(0.0, 1.0, 1.0, 0.0)])));
        world.add(entity_ref(Wire::new(vec![seg(0.0, 0.4, 1.0, 0.6)])));

        let mut count = 0;
        CollisionDetector::new().detect(&world, |_| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_non_collidable_entities_are_skipped() {
        let mut world = test_world();
        world.add(entity_ref(Wire::new(vec![seg(0.0, 0.0, 1.0, 1.0)])));
        world.add(entity_ref(Inert));

        let mut count = 0;
        CollisionDetector::new().detect(&world, |_| count += 1);
        assert_eq!(count, 0);
    }
}
