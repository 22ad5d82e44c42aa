//! Frame buffer and the fixed-rate frame loop.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::{Point, Shape};

/// Whole-buffer remap applied at the end of each frame (mirroring, color
/// mapping, ...).
pub type TransformFn = Box<dyn Fn(Vec<Point>) -> Vec<Point>>;

/// Scene construction options.
pub struct SceneOptions {
    /// Requested samples across a full-width traversal. Lower draws faster
    /// but less accurately, higher slower but more accurately.
    pub resolution: f32,
    /// Optional transform applied to the whole buffer once per frame.
    pub transform: Option<TransformFn>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            resolution: crate::consts::DEFAULT_RESOLUTION,
            transform: None,
        }
    }
}

struct SceneInner {
    points: Vec<Point>,
    resolution: f32,
    transform: Option<TransformFn>,
    frame_task: Option<JoinHandle<()>>,
}

/// The accumulated point buffer plus the frame loop that rebuilds it.
///
/// Cloning yields another handle to the same buffer; the streaming consumer
/// keeps one and snapshots at its own cadence, decoupled from the frame
/// rate.
#[derive(Clone)]
pub struct Scene {
    inner: Rc<RefCell<SceneInner>>,
}

impl Scene {
    pub fn new(options: SceneOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SceneInner {
                points: Vec::new(),
                resolution: options.resolution,
                transform: options.transform,
                frame_task: None,
            })),
        }
    }

    pub fn resolution(&self) -> f32 {
        self.inner.borrow().resolution
    }

    /// Sample a shape at the configured resolution and append it.
    pub fn add(&self, shape: &dyn Shape) {
        let points = shape.draw(self.resolution());
        self.inner.borrow_mut().points.extend(points);
    }

    /// Like [`add`](Self::add), remapping the sampled points first.
    pub fn add_transformed(
        &self,
        shape: &dyn Shape,
        transform: impl FnOnce(Vec<Point>) -> Vec<Point>,
    ) {
        let points = transform(shape.draw(self.resolution()));
        self.inner.borrow_mut().points.extend(points);
    }

    /// Empty the buffer.
    pub fn reset(&self) {
        self.inner.borrow_mut().points.clear();
    }

    /// Copy of the current buffer, for the streaming consumer.
    pub fn snapshot(&self) -> Vec<Point> {
        self.inner.borrow().points.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Begin the frame loop: each frame the buffer is reset, `render_frame`
    /// refills it through [`add`](Self::add), and the scene transform, if
    /// any, remaps the finished buffer. Restarting replaces a running loop.
    ///
    /// Must be called within a tokio `LocalSet`.
    pub fn start(&self, mut render_frame: impl FnMut() + 'static, fps: f32) {
        self.pause();
        debug!("scene frame loop starting at {fps} fps");

        let inner = Rc::clone(&self.inner);
        let period = Duration::from_secs_f32(1.0 / fps);
        let task = tokio::task::spawn_local(async move {
            let mut frames = interval(period);
            frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                frames.tick().await;

                inner.borrow_mut().points.clear();
                render_frame();

                let mut state = inner.borrow_mut();
                let points = mem::take(&mut state.points);
                let points = match state.transform.as_ref() {
                    Some(transform) => transform(points),
                    None => points,
                };
                state.points = points;
            }
        });
        self.inner.borrow_mut().frame_task = Some(task);
    }

    /// Halt the frame loop, keeping the last buffer contents.
    pub fn pause(&self) {
        if let Some(task) = self.inner.borrow_mut().frame_task.take() {
            debug!("scene frame loop paused");
            task.abort();
        }
    }

    /// Halt the frame loop and clear the buffer.
    pub fn stop(&self) {
        self.pause();
        self.reset();
    }
}
