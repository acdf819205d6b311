//! Game state and core simulation types
//!
//! Physics bodies live in the [`PhysicsWorld`]; this state holds the
//! gameplay objects that reference them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rescue::RescueContainer;
use super::world::{GrainHandle, PhysicsWorld};
use crate::display_to_physics;
use crate::settings::Settings;

/// Domain events emitted by the simulation for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A rescue container was built (or rebuilt) at a display position
    RescueSpawned { position: Vec2 },
    /// A grain landed inside the rescue container
    SugarCollected { grain: GrainHandle, count: u32 },
    /// The rescue container's floor was opened
    RescueEmptied { count: u32 },
    /// The rescue container detonated at a physics-space center
    RescueDetonated { center: Vec2, pushed: usize },
    /// The sugar flow released its last grain
    FlowExhausted,
}

/// Seeded emitter releasing sugar grains at a fixed rate
#[derive(Debug, Clone)]
pub struct SugarSource {
    /// Spawn point in display pixels
    pub origin: Vec2,
    /// Grains per second
    pub rate: f32,
    /// Horizontal jitter in display pixels
    pub spread: f32,
    /// Grains still to release
    pub remaining: u32,
    accumulator: f32,
    rng: Pcg32,
}

impl SugarSource {
    pub fn new(origin: Vec2, rate: f32, total: u32, spread: f32, seed: u64) -> Self {
        Self {
            origin,
            rate,
            spread,
            remaining: total,
            accumulator: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Vec2::from(settings.flow_origin),
            settings.flow_rate,
            settings.flow_total,
            settings.flow_spread,
            settings.flow_seed,
        )
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Release the grains due in the next `dt` seconds
    pub fn emit(&mut self, world: &mut PhysicsWorld, dt: f32) -> Vec<GrainHandle> {
        let mut spawned = Vec::new();
        if self.is_exhausted() || self.rate <= 0.0 {
            return spawned;
        }

        self.accumulator += dt * self.rate;
        while self.accumulator >= 1.0 && self.remaining > 0 {
            self.accumulator -= 1.0;
            self.remaining -= 1;

            let jitter = if self.spread > 0.0 {
                self.rng.random_range(-self.spread..=self.spread)
            } else {
                0.0
            };
            let pos = display_to_physics(self.origin + Vec2::new(jitter, 0.0));
            spawned.push(world.spawn_grain(pos));
        }
        spawned
    }
}

/// Complete game state for one level
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    /// The summoned rescue container, if any
    pub rescue: Option<RescueContainer>,
    pub source: SugarSource,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events waiting for the presentation layer
    pub events: Vec<GameEvent>,
    /// Rescue containers summoned this level
    pub rescues_summoned: u32,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let source = SugarSource::from_settings(&settings);
        Self {
            settings,
            rescue: None,
            source,
            time_ticks: 0,
            events: Vec::new(),
            rescues_summoned: 0,
        }
    }

    /// Bring up a rescue container, rebuilding a spent one in place
    ///
    /// Returns false while a live container already exists.
    pub fn summon_rescue(&mut self, world: &mut PhysicsWorld) -> bool {
        let config = self.settings.rescue_config();
        let result = if let Some(rescue) = self.rescue.as_mut() {
            if !rescue.is_exploded() {
                log::debug!("Rescue container already active");
                return false;
            }
            rescue.reinitialize(world, config)
        } else {
            RescueContainer::new(world, config).map(|c| self.rescue = Some(c))
        };

        match result {
            Ok(()) => {
                self.rescues_summoned += 1;
                true
            }
            Err(err) => {
                log::error!("Cannot summon rescue container: {}", err);
                false
            }
        }
    }

    /// Grains collected by the current rescue container
    pub fn rescue_count(&self) -> u32 {
        self.rescue.as_ref().map_or(0, RescueContainer::count)
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_source_emits_at_rate() {
        let mut world = PhysicsWorld::new();
        let mut source = SugarSource::new(Vec2::new(100.0, 50.0), 10.0, 100, 4.0, 7);
        let mut total = 0;
        for _ in 0..60 {
            total += source.emit(&mut world, SIM_DT).len();
        }
        assert!((9..=10).contains(&total), "got {total}");
        assert_eq!(world.grains().len(), total);
    }

    #[test]
    fn test_source_stops_when_exhausted() {
        let mut world = PhysicsWorld::new();
        let mut source = SugarSource::new(Vec2::new(100.0, 50.0), 1000.0, 3, 0.0, 7);
        assert_eq!(source.emit(&mut world, 1.0).len(), 3);
        assert!(source.is_exhausted());
        assert!(source.emit(&mut world, 1.0).is_empty());
    }

    #[test]
    fn test_source_jitter_is_deterministic() {
        let mut world_a = PhysicsWorld::new();
        let mut world_b = PhysicsWorld::new();
        let mut a = SugarSource::new(Vec2::new(100.0, 50.0), 100.0, 10, 6.0, 42);
        let mut b = SugarSource::new(Vec2::new(100.0, 50.0), 100.0, 10, 6.0, 42);
        let ga = a.emit(&mut world_a, 0.1);
        let gb = b.emit(&mut world_b, 0.1);
        let pa: Vec<_> = ga.iter().map(|g| world_a.grain_position(*g)).collect();
        let pb: Vec<_> = gb.iter().map(|g| world_b.grain_position(*g)).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_summon_only_when_absent_or_spent() {
        let mut world = PhysicsWorld::new();
        let mut state = GameState::new(Settings::default());
        assert!(state.summon_rescue(&mut world));
        assert!(!state.summon_rescue(&mut world));
        assert_eq!(world.wall_count(), 3);

        if let Some(rescue) = state.rescue.as_mut() {
            rescue.explode(&mut world, &[]);
        }
        assert!(state.summon_rescue(&mut world));
        assert_eq!(world.wall_count(), 3);
        assert_eq!(state.rescues_summoned, 2);
    }

    #[test]
    fn test_summon_with_bad_settings_fails() {
        let mut world = PhysicsWorld::new();
        let settings = Settings {
            rescue_width: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(settings);
        assert!(!state.summon_rescue(&mut world));
        assert!(state.rescue.is_none());
    }
}
