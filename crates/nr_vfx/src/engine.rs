//! Bounded pool of live effects.
//!
//! Spawning always succeeds. Capacity is enforced lazily: every
//! `cull_interval` updates, anything beyond `max_live` is dropped from the
//! oldest end. The engine has no notion of which effects matter more.

use crate::effects::Effect;
use nr_core::SimRng;
use nr_render::RenderTarget;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    pub max_live: usize,
    pub cull_interval: u32,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_live: 150,
            cull_interval: 30,
        }
    }
}

pub struct EffectsEngine {
    slots: VecDeque<(EffectId, Effect)>,
    next_id: u64,
    limits: EngineLimits,
    updates: u64,
    culled_total: u64,
}

impl EffectsEngine {
    pub fn new(limits: EngineLimits) -> Self {
        Self {
            slots: VecDeque::new(),
            next_id: 0,
            limits: EngineLimits {
                max_live: limits.max_live,
                cull_interval: limits.cull_interval.max(1),
            },
            updates: 0,
            culled_total: 0,
        }
    }

    pub fn spawn(&mut self, effect: impl Into<Effect>) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.slots.push_back((id, effect.into()));
        id
    }

    pub fn update(&mut self, camera_speed: f32, dt: f32, rng: &mut SimRng) {
        for (_, effect) in self.slots.iter_mut() {
            effect.update(camera_speed, dt, rng);
        }
        self.slots.retain(|(_, effect)| !effect.is_expired());

        self.updates += 1;
        if self.updates % self.limits.cull_interval as u64 == 0 {
            self.cull();
        }
    }

    fn cull(&mut self) {
        let excess = self.slots.len().saturating_sub(self.limits.max_live);
        if excess == 0 {
            return;
        }
        self.slots.drain(..excess);
        self.culled_total += excess as u64;
        log::debug!(
            "Effect cap reached: culled {} oldest ({} live, cap {})",
            excess,
            self.slots.len(),
            self.limits.max_live
        );
    }

    /// Paints every live effect in spawn order.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        for (_, effect) in &self.slots {
            effect.draw(target);
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.slots.iter().map(|(id, _)| *id)
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> + '_ {
        self.slots.iter().map(|(_, effect)| effect)
    }

    pub fn culled_total(&self) -> u64 {
        self.culled_total
    }

    pub fn limits(&self) -> EngineLimits {
        self.limits
    }
}

impl Default for EffectsEngine {
    fn default() -> Self {
        Self::new(EngineLimits::default())
    }
}
