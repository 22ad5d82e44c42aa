//! Rendering pipeline: draw-order optimization and point emission.

pub mod path;
pub mod renderer;

pub use path::{Identity, LeftToRight, NearestNeighbor, PathOptimizer, PathStrategy, TopToBottom};
pub use renderer::{DrawInfo, Renderer};
