//! Beamline - entity simulation and vector-path rendering for laser projectors
//!
//! Core modules:
//! - `sim`: World/entity model, movement, collision, bounds and tween subsystems
//! - `draw`: Point/shape seam, scene frame buffer, resolution scaling
//! - `render`: Draw-order optimization and travel-stroke emission
//! - `runner`: Game seam and the single-threaded tick/frame scheduler

pub mod draw;
pub mod render;
pub mod runner;
pub mod sim;

pub use runner::{Game, PointSink, Runner, RunnerConfig};
pub use sim::{Bounds, Entity, EntityRef, World};

use glam::Vec2;

/// Default configuration constants
pub mod consts {
    /// Simulation steps per second
    pub const DEFAULT_TICKS_PER_SECOND: u32 = 30;
    /// Render frames per second; 30 is enough for most laser content
    pub const DEFAULT_FRAMES_PER_SECOND: f32 = 30.0;
    /// Requested samples across a full-width traversal of the projection
    pub const DEFAULT_RESOLUTION: f32 = 500.0;
    /// Output samples per second handed to the streaming sink
    pub const DEFAULT_POINTS_PER_SECOND: u32 = 30_000;
    /// Travel strokes between entities are sampled at this fraction of the
    /// content resolution
    pub const TRAVEL_RESOLUTION_FACTOR: f32 = 0.75;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Rotate a vector by an angle in radians
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}
