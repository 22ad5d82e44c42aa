//! Point emission: turns a frame's drawables into one continuous path.

use glam::Vec2;

use crate::consts::TRAVEL_RESOLUTION_FACTOR;
use crate::draw::{Line, ResolutionScaler, Scene, Shape};
use crate::sim::{EntityRef, World};

use super::path::{Identity, PathOptimizer};

/// A drawable entity's output for one frame: its shapes, plus the optional
/// entry and exit anchors used to stitch successive entities into one path.
pub struct DrawInfo {
    pub shapes: Vec<Box<dyn Shape>>,
    pub first: Option<Vec2>,
    pub last: Option<Vec2>,
}

impl DrawInfo {
    /// Shapes with no anchors: the pen jumps straight in, nothing connects.
    pub fn new(shapes: Vec<Box<dyn Shape>>) -> Self {
        Self {
            shapes,
            first: None,
            last: None,
        }
    }

    pub fn with_anchors(shapes: Vec<Box<dyn Shape>>, first: Vec2, last: Vec2) -> Self {
        Self {
            shapes,
            first: Some(first),
            last: Some(last),
        }
    }
}

/// Emits the world's drawable entities into the scene as one ordered point
/// stream, bridging successive entities with reduced-density blanked travel
/// strokes.
pub struct Renderer {
    scene: Scene,
    optimizer: Box<dyn PathOptimizer>,
    last_point: Vec2,
}

impl Renderer {
    pub fn new(scene: Scene) -> Self {
        Self::with_optimizer(scene, Box::new(Identity))
    }

    pub fn with_optimizer(scene: Scene, optimizer: Box<dyn PathOptimizer>) -> Self {
        Self {
            scene,
            optimizer,
            last_point: Vec2::ZERO,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Render one frame: gather draw info from the world's drawables and
    /// then the extra entities, reorder through the path optimizer, and
    /// emit. The carried pen position is not reset between frames, keeping
    /// the connecting path continuous across renders.
    pub fn render(&mut self, world: &World, extra_entities: &[EntityRef]) {
        let draw_list: Vec<DrawInfo> = world
            .entities()
            .iter()
            .chain(extra_entities)
            .filter_map(|entity| {
                let entity = entity.borrow();
                entity.as_drawable().map(|drawable| drawable.draw())
            })
            .collect();

        for info in self.optimizer.order(draw_list) {
            if let Some(first) = info.first {
                // Travel stroke: blanked, and cheaper than content.
                self.scene.add(&ResolutionScaler::new(
                    Line::blank(self.last_point, first),
                    TRAVEL_RESOLUTION_FACTOR,
                ));
                self.last_point = first;
            }

            for shape in &info.shapes {
                self.scene.add(shape);
            }

            if let Some(last) = info.last {
                self.last_point = last;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Point, SceneOptions};
    use crate::sim::{entity_ref, Bounds, Drawable, Entity};

    struct Stroke {
        from: Vec2,
        to: Vec2,
    }

    impl Stroke {
        fn new(from: Vec2, to: Vec2) -> Self {
            Self { from, to }
        }
    }

    impl Drawable for Stroke {
        fn draw(&self) -> DrawInfo {
            DrawInfo::with_anchors(
                vec![Box::new(Line::new(self.from, self.to, [0.0, 1.0, 0.0]))],
                self.from,
                self.to,
            )
        }
    }

    impl Entity for Stroke {
        fn as_drawable(&self) -> Option<&dyn Drawable> {
            Some(self)
        }
    }

    struct Inert;

    impl Entity for Inert {}

    fn test_world() -> World {
        World::new(Bounds::new(Vec2::ZERO, Vec2::ONE), 30)
    }

    fn test_scene() -> Scene {
        Scene::new(SceneOptions {
            resolution: 100.0,
            transform: None,
        })
    }

    fn blanked_prefix(points: &[Point]) -> usize {
        points.iter().take_while(|p| p.is_blanked()).count()
    }

    #[test]
    fn test_travel_stroke_is_blanked_and_cheaper() {
        let mut world = test_world();
        // Unit-length stroke entered at (0, 1): the travel from the origin
        // is also unit length, so the density ratio is directly visible.
        world.add(entity_ref(Stroke::new(
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        )));

        let scene = test_scene();
        let mut renderer = Renderer::new(scene.clone());
        renderer.render(&world, &[]);

        let points = scene.snapshot();
        // Travel: 100 * 0.75 = 75 samples -> 76 points; content: 101.
        assert_eq!(blanked_prefix(&points), 76);
        assert_eq!(points.len(), 76 + 101);
    }

    #[test]
    fn test_last_point_carries_across_renders() {
        let mut world = test_world();
        let stroke = entity_ref(Stroke::new(Vec2::new(0.5, 0.5), Vec2::new(0.6, 0.5)));
        world.add(stroke);

        let scene = test_scene();
        let mut renderer = Renderer::new(scene.clone());

        renderer.render(&world, &[]);
        scene.reset();
        renderer.render(&world, &[]);

        // The second frame's travel starts where the first frame ended, not
        // back at the origin.
        let points = scene.snapshot();
        assert!((points[0].pos - Vec2::new(0.6, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_extra_entities_draw_after_world_entities() {
        let mut world = test_world();
        world.add(entity_ref(Stroke::new(Vec2::ZERO, Vec2::new(0.1, 0.0))));
        let extra = entity_ref(Stroke::new(Vec2::new(0.9, 0.9), Vec2::new(1.0, 0.9)));

        let scene = test_scene();
        let mut renderer = Renderer::new(scene.clone());
        renderer.render(&world, &[extra]);

        let points = scene.snapshot();
        assert!((points.last().unwrap().pos - Vec2::new(1.0, 0.9)).length() < 1e-6);
    }

    #[test]
    fn test_non_drawable_entities_are_skipped() {
        let mut world = test_world();
        world.add(entity_ref(Inert));

        let scene = test_scene();
        let mut renderer = Renderer::new(scene.clone());
        renderer.render(&world, &[]);

        assert!(scene.is_empty());
    }
}
