//! Sugar Rescue headless entry point
//!
//! Runs a scripted rescue session against the physics world and logs what a
//! renderer and mixer would receive each second.

use std::collections::BTreeMap;

use glam::Vec2;

use sugar_rescue::audio::AudioManager;
use sugar_rescue::consts::{FPS, SIM_DT};
use sugar_rescue::hud::{GRAVITY_ARROW_START, StatusBoard};
use sugar_rescue::sim::{GameEvent, GameState, PhysicsWorld, TickInput, tick};
use sugar_rescue::Settings;

/// Session length in seconds
const SESSION_SECS: u32 = 40;

/// Scripted input for a given tick
fn scripted_input(tick_index: u32) -> TickInput {
    let secs = tick_index as f32 * SIM_DT;
    TickInput {
        summon: tick_index == 0 || tick_index == 36 * FPS,
        nudge: if (3.0..4.0).contains(&secs) {
            Vec2::new(1.0, 0.0)
        } else if (6.0..6.5).contains(&secs) {
            Vec2::new(0.0, 1.0)
        } else {
            Vec2::ZERO
        },
        empty: tick_index == 10 * FPS,
        detonate: tick_index == 38 * FPS,
    }
}

fn main() {
    env_logger::init();
    log::info!("Sugar Rescue (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_string());
    let settings = Settings::load_or_default(&settings_path);

    let mut world = PhysicsWorld::new();
    let mut audio = AudioManager::from_settings(&settings);
    let mut board = StatusBoard::new(settings.hud_color);
    let show_arrow = settings.show_gravity_arrow;
    let flow_total = settings.flow_total;
    let mut state = GameState::new(settings);

    audio.start_background();

    let mut total_collected = 0u32;
    for tick_index in 0..SESSION_SECS * FPS {
        let input = scripted_input(tick_index);
        tick(&mut state, &mut world, &input, SIM_DT);

        for event in state.drain_events() {
            audio.handle_event(&event);
            match event {
                GameEvent::SugarCollected { .. } => total_collected += 1,
                GameEvent::RescueEmptied { count } => {
                    board.show_message(format!("Released {} grains", count), 2.0);
                }
                GameEvent::RescueDetonated { pushed, .. } => {
                    board.show_message(format!("Boom! {} grains scattered", pushed), 2.0);
                }
                GameEvent::RescueSpawned { position } => {
                    log::info!("Rescue ready at ({:.0}, {:.0})", position.x, position.y);
                }
                GameEvent::FlowExhausted => board.show_message("Sugar flow finished", 2.0),
            }
        }

        board.advance(SIM_DT);
        let sugar_left = flow_total.saturating_sub(total_collected);
        board.update_values(total_collected, BTreeMap::new(), sugar_left, 1);

        for request in audio.drain_requests() {
            log::debug!(
                "{:?} {} on channel {} at {:.2}",
                request.action,
                request.clip,
                request.channel,
                request.volume
            );
        }

        if tick_index % FPS == 0 {
            let labels = board.frame_labels(state.rescue.as_ref());
            let line: Vec<_> = labels.iter().map(|l| l.text.trim().to_string()).collect();
            log::info!("[{:>2}s] {}", tick_index / FPS, line.join(" | "));
            if show_arrow {
                if let Some(arrow) = board.gravity_arrow(world.gravity(), GRAVITY_ARROW_START) {
                    log::trace!("gravity arrow {:?} -> {:?}", arrow.start, arrow.end);
                }
            }
        }
    }

    log::info!(
        "Session over: {} grains rescued, {} rescue containers summoned",
        total_collected,
        state.rescues_summoned
    );
}
