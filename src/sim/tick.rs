//! Fixed timestep simulation tick
//!
//! Host loop that drives the rescue container and the sugar flow, then
//! advances physics.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use super::world::PhysicsWorld;
use crate::consts::BLAST_RADIUS;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Nudge direction in display space (arrow keys), each axis in -1..=1
    pub nudge: Vec2,
    /// Summon a rescue container (or rebuild a spent one)
    pub summon: bool,
    /// Open the rescue container's floor
    pub empty: bool,
    /// Detonate the rescue container now
    pub detonate: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, world: &mut PhysicsWorld, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if input.summon {
        state.summon_rescue(world);
    }

    let was_exhausted = state.source.is_exhausted();
    state.source.emit(world, dt);
    if !was_exhausted && state.source.is_exhausted() {
        log::info!("Sugar flow exhausted after {} ticks", state.time_ticks);
        state.events.push(GameEvent::FlowExhausted);
    }

    if let Some(rescue) = state.rescue.as_mut() {
        let settings = &state.settings;

        // It cannot go back up once it goes down
        let mut nudge = input.nudge;
        if nudge.y < 0.0 && !settings.rescue_allow_upward {
            nudge.y = 0.0;
        }
        if nudge != Vec2::ZERO {
            let delta = nudge * settings.rescue_nudge_px;
            rescue.move_by(world, delta.x, delta.y);
        }

        if input.empty {
            rescue.empty(world);
        }

        if !rescue.is_exploded() {
            let reach = rescue.bounds().size().length();
            for grain in world.grains_within(rescue.center(), reach) {
                rescue.collect(world, grain);
            }

            rescue.advance(dt);
            let expired = rescue.poll_detonation(settings.rescue_lifetime_secs);
            let manual = input.detonate && rescue.trigger_detonation();
            if expired || manual {
                let nearby = world.grains_within(rescue.center(), BLAST_RADIUS);
                rescue.explode(world, &nearby);
            }
        }

        state.events.extend(rescue.drain_events());
    }

    world.step(dt);
}
