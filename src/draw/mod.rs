//! Drawing primitives and the scene frame buffer.
//!
//! `Shape` is the seam external primitive libraries implement; only the
//! straight `Line` ships here, because the renderer's travel strokes need it.

pub mod scaler;
pub mod scene;

pub use scaler::ResolutionScaler;
pub use scene::{Scene, SceneOptions, TransformFn};

use glam::Vec2;

/// One output sample: a position in projection space plus RGB color.
/// Black is a blanked point - the galvos move, the beam stays off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub pos: Vec2,
    pub color: [f32; 3],
}

impl Point {
    pub fn new(pos: Vec2, color: [f32; 3]) -> Self {
        Self { pos, color }
    }

    pub fn is_blanked(&self) -> bool {
        self.color == [0.0, 0.0, 0.0]
    }
}

/// Anything that can be sampled into a point sequence. `resolution` is the
/// requested number of samples across a full-width traversal of the
/// projection; implementations must be deterministic for a given resolution.
pub trait Shape {
    fn draw(&self, resolution: f32) -> Vec<Point>;
}

impl<S: Shape + ?Sized> Shape for &S {
    fn draw(&self, resolution: f32) -> Vec<Point> {
        (**self).draw(resolution)
    }
}

impl<S: Shape + ?Sized> Shape for Box<S> {
    fn draw(&self, resolution: f32) -> Vec<Point> {
        (**self).draw(resolution)
    }
}

/// A straight stroke between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub color: [f32; 3],
}

impl Line {
    pub fn new(from: Vec2, to: Vec2, color: [f32; 3]) -> Self {
        Self { from, to, color }
    }

    /// A blanked line: the pen travels, the beam stays off.
    pub fn blank(from: Vec2, to: Vec2) -> Self {
        Self::new(from, to, [0.0, 0.0, 0.0])
    }
}

impl Shape for Line {
    fn draw(&self, resolution: f32) -> Vec<Point> {
        let length = self.from.distance(self.to);
        let samples = ((length * resolution).ceil() as usize).max(1);

        (0..=samples)
            .map(|i| {
                let t = i as f32 / samples as f32;
                Point::new(self.from.lerp(self.to, t), self.color)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_sample_count_scales_with_length() {
        let short = Line::blank(Vec2::ZERO, Vec2::new(0.25, 0.0));
        let long = Line::blank(Vec2::ZERO, Vec2::new(1.0, 0.0));

        // 400 samples across the full width: a quarter of the width costs a
        // quarter of the samples.
        assert_eq!(long.draw(400.0).len(), 401);
        assert_eq!(short.draw(400.0).len(), 101);
    }

    #[test]
    fn test_line_endpoints_are_exact() {
        let line = Line::new(Vec2::new(0.2, 0.4), Vec2::new(0.8, 0.1), [1.0, 0.0, 0.0]);
        let points = line.draw(100.0);

        assert_eq!(points.first().unwrap().pos, line.from);
        assert!((points.last().unwrap().pos - line.to).length() < 1e-6);
        assert!(points.iter().all(|p| p.color == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_degenerate_line_still_emits() {
        let dot = Line::blank(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5));
        let points = dot.draw(500.0);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.is_blanked()));
    }
}
