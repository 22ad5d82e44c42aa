//! Resolution-scaling shape decorator.

use super::{Point, Shape};

/// Wraps a shape and scales the sampling resolution handed to it, so one
/// draw call can render coarser or finer than its siblings without touching
/// the shape's own logic.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionScaler<S> {
    inner: S,
    factor: f32,
}

impl<S: Shape> ResolutionScaler<S> {
    pub fn new(inner: S, factor: f32) -> Self {
        Self { inner, factor }
    }
}

impl<S: Shape> Shape for ResolutionScaler<S> {
    fn draw(&self, resolution: f32) -> Vec<Point> {
        self.inner.draw(resolution * self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Line;
    use glam::Vec2;

    #[test]
    fn test_scaler_reduces_sample_density() {
        let line = Line::blank(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let full = line.draw(400.0).len();
        let half = ResolutionScaler::new(line, 0.5).draw(400.0).len();

        assert_eq!(full, 401);
        assert_eq!(half, 201);
    }

    #[test]
    fn test_scalers_compose() {
        let line = Line::blank(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let quarter = ResolutionScaler::new(ResolutionScaler::new(line, 0.5), 0.5);
        assert_eq!(quarter.draw(400.0).len(), 101);
    }
}
