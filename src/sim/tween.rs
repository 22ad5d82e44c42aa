//! Tick-driven progress tweens.

use std::rc::Rc;

use log::debug;

use super::entity::{entity_id, EntityRef};
use super::world::World;

/// Completion callback, fired once when a non-repeating tween finishes.
pub type TweenEndFn = Box<dyn FnOnce(&EntityRef)>;

/// Options for starting a tween.
#[derive(Default)]
pub struct TweenOptions {
    /// Wrap progress back to zero instead of completing.
    pub repeat: bool,
    /// Fired on completion; not when overridden, nor when stopped without
    /// callbacks.
    pub on_end: Option<TweenEndFn>,
}

struct ActiveTween {
    entity: EntityRef,
    elapsed_ticks: u32,
    duration_ticks: f32,
    repeat: bool,
    on_end: Option<TweenEndFn>,
}

/// Drives at most one active tween per entity, advancing all of them one
/// tick per `update` call.
#[derive(Default)]
pub struct ObjectTweener {
    tweens: Vec<ActiveTween>,
}

impl ObjectTweener {
    pub fn new() -> Self {
        Self { tweens: Vec::new() }
    }

    /// Begin a tween over `duration` seconds at the world's tick rate. An
    /// already-active tween on the same entity is silently discarded without
    /// firing its callback. A non-positive duration (or a zero tick rate)
    /// completes on the first update.
    pub fn start(
        &mut self,
        world: &World,
        entity: &EntityRef,
        duration: f32,
        options: TweenOptions,
    ) {
        let id = entity_id(entity);
        if let Some(index) = self.tweens.iter().position(|t| entity_id(&t.entity) == id) {
            debug!("tween restarted on active entity; previous tween dropped");
            self.tweens.remove(index);
        }

        self.tweens.push(ActiveTween {
            entity: Rc::clone(entity),
            elapsed_ticks: 0,
            duration_ticks: world.ticks_per_second() as f32 * duration,
            repeat: options.repeat,
            on_end: options.on_end,
        });
    }

    /// Remove an active tween before completion; the callback fires only
    /// when `fire_callbacks` is set. Unknown entities are a no-op.
    pub fn stop(&mut self, entity: &EntityRef, fire_callbacks: bool) {
        let id = entity_id(entity);
        let Some(index) = self.tweens.iter().position(|t| entity_id(&t.entity) == id) else {
            return;
        };
        let tween = self.tweens.remove(index);
        if fire_callbacks {
            if let Some(on_end) = tween.on_end {
                on_end(&tween.entity);
            }
        }
    }

    /// Entities with a currently-active tween.
    pub fn tweened_entities(&self) -> Vec<EntityRef> {
        self.tweens.iter().map(|t| Rc::clone(&t.entity)).collect()
    }

    pub fn is_tweening(&self, entity: &EntityRef) -> bool {
        let id = entity_id(entity);
        self.tweens.iter().any(|t| entity_id(&t.entity) == id)
    }

    /// Advance every active tween one tick. Progress counts whole ticks
    /// against the duration; a tween completes on the update where progress
    /// reaches 1.0, without applying the final value. Repeating tweens wrap
    /// back to zero instead.
    pub fn update(&mut self) {
        let mut finished: Vec<ActiveTween> = Vec::new();

        let mut index = 0;
        while index < self.tweens.len() {
            let tween = &mut self.tweens[index];
            tween.elapsed_ticks += 1;

            let progress = if tween.duration_ticks > 0.0 {
                tween.elapsed_ticks as f32 / tween.duration_ticks
            } else {
                1.0
            };

            if progress >= 1.0 {
                if tween.repeat {
                    tween.elapsed_ticks = 0;
                    apply_progress(&tween.entity, 0.0);
                    index += 1;
                } else {
                    finished.push(self.tweens.remove(index));
                }
            } else {
                apply_progress(&tween.entity, progress);
                index += 1;
            }
        }

        // Callbacks run after the sweep so they can safely touch entities.
        for tween in finished {
            if let Some(on_end) = tween.on_end {
                on_end(&tween.entity);
            }
        }
    }
}

fn apply_progress(entity: &EntityRef, progress: f32) {
    let mut entity = entity.borrow_mut();
    if let Some(tweenable) = entity.as_tweenable() {
        tweenable.set_tween(progress);
    }
}
