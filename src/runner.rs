//! Game seam, configuration, and the single-threaded scheduler.
//!
//! The runner owns the wiring an embedding process would otherwise do by
//! hand: the fixed-rate simulation tick, the scene frame loop, and the
//! hand-off to an external streaming sink. Everything runs on one thread;
//! tasks are spawned on a tokio `LocalSet` and cancellation is an abort
//! between iterations, never an interruption of work in flight.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::consts;
use crate::draw::{Scene, SceneOptions};
use crate::render::{PathStrategy, Renderer};
use crate::sim::{Bounds, World};

/// Game logic driven by the runner: `update` once per simulation tick,
/// `render` once per frame. The message hooks exist for an embedding
/// transport; their defaults do nothing.
pub trait Game {
    fn update(&mut self);
    fn render(&mut self, renderer: &mut Renderer);

    /// First message for a newly attached observer.
    fn welcome_message(&self) -> Option<String> {
        None
    }

    /// Outbound status message, polled once per tick.
    fn outbound_message(&mut self) -> Option<String> {
        None
    }

    /// Inbound text from a remote observer.
    fn on_message(&mut self, _message: &str) {}
}

/// External streaming device seam: consumes the live scene at a target
/// sample rate, on its own cadence. The scene handle it keeps observes
/// every frame the loop produces.
pub trait PointSink {
    fn stream(&mut self, scene: &Scene, points_per_second: u32);
}

/// The recognized configuration surface.
///
/// Transform hooks are function values and therefore live on
/// [`MoverOptions`](crate::sim::MoverOptions), not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub world_bounds: Bounds,
    pub ticks_per_second: u32,
    pub resolution: f32,
    pub frames_per_second: f32,
    pub points_per_second: u32,
    pub gravity: Option<Vec2>,
    pub path_strategy: PathStrategy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            world_bounds: Bounds::new(Vec2::ZERO, Vec2::ONE),
            ticks_per_second: consts::DEFAULT_TICKS_PER_SECOND,
            resolution: consts::DEFAULT_RESOLUTION,
            frames_per_second: consts::DEFAULT_FRAMES_PER_SECOND,
            points_per_second: consts::DEFAULT_POINTS_PER_SECOND,
            gravity: None,
            path_strategy: PathStrategy::default(),
        }
    }
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

type SharedGame = Rc<RefCell<Box<dyn Game>>>;

/// Wires world, scene, renderer and game together, and owns their loops.
pub struct Runner {
    config: RunnerConfig,
    world: Rc<RefCell<World>>,
    scene: Scene,
    renderer: Rc<RefCell<Renderer>>,
    game: SharedGame,
    outbound: Option<Rc<dyn Fn(String)>>,
    tick_task: RefCell<Option<JoinHandle<()>>>,
}

impl Runner {
    /// Build the full pipeline. The factory receives the shared world handle
    /// so game logic can keep it.
    pub fn new(
        config: RunnerConfig,
        game_factory: impl FnOnce(Rc<RefCell<World>>) -> Box<dyn Game>,
    ) -> Self {
        let world = Rc::new(RefCell::new(World::new(
            config.world_bounds,
            config.ticks_per_second,
        )));
        let scene = Scene::new(SceneOptions {
            resolution: config.resolution,
            ..SceneOptions::default()
        });
        let renderer = Rc::new(RefCell::new(Renderer::with_optimizer(
            scene.clone(),
            config.path_strategy.optimizer(),
        )));
        let game = Rc::new(RefCell::new(game_factory(Rc::clone(&world))));

        Self {
            config,
            world,
            scene,
            renderer,
            game,
            outbound: None,
            tick_task: RefCell::new(None),
        }
    }

    /// Hook receiving each outbound game message (polled once per tick).
    pub fn with_outbound(mut self, hook: impl Fn(String) + 'static) -> Self {
        self.outbound = Some(Rc::new(hook));
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn world(&self) -> Rc<RefCell<World>> {
        Rc::clone(&self.world)
    }

    pub fn scene(&self) -> Scene {
        self.scene.clone()
    }

    /// Forward an inbound observer message to the game.
    pub fn deliver_message(&self, message: &str) {
        self.game.borrow_mut().on_message(message);
    }

    /// The game's welcome message for a newly attached observer.
    pub fn welcome_message(&self) -> Option<String> {
        self.game.borrow().welcome_message()
    }

    /// Hand the live scene to the streaming sink at the configured sample
    /// rate. The sink streams on its own cadence; the runner never hears
    /// from it again.
    pub fn attach_sink(&self, sink: &mut dyn PointSink) {
        sink.stream(&self.scene, self.config.points_per_second);
    }

    /// Spawn the simulation tick task and start the frame loop. Must be
    /// called within a tokio `LocalSet`. Restarting replaces running loops.
    pub fn start(&self) {
        self.stop_ticks();
        info!(
            "runner starting: {} ticks/s simulation, {} fps render",
            self.config.ticks_per_second, self.config.frames_per_second
        );

        let game = Rc::clone(&self.game);
        let outbound = self.outbound.clone();
        let period = Duration::from_secs_f32(1.0 / self.config.ticks_per_second as f32);
        let task = tokio::task::spawn_local(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let message = {
                    let mut game = game.borrow_mut();
                    game.update();
                    game.outbound_message()
                };
                if let (Some(message), Some(hook)) = (message, &outbound) {
                    hook(message);
                }
            }
        });
        *self.tick_task.borrow_mut() = Some(task);

        let game = Rc::clone(&self.game);
        let renderer = Rc::clone(&self.renderer);
        self.scene.start(
            move || game.borrow_mut().render(&mut renderer.borrow_mut()),
            self.config.frames_per_second,
        );
    }

    /// Abort both loops; nothing in flight is interrupted. The scene buffer
    /// is cleared.
    pub fn stop(&self) {
        self.stop_ticks();
        self.scene.stop();
    }

    fn stop_ticks(&self) {
        if let Some(task) = self.tick_task.borrow_mut().take() {
            task.abort();
        }
    }
}
