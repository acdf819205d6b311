//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (grains in spawn order)
//! - No rendering or audio dependencies; effects leave as `GameEvent`s

pub mod blast;
pub mod rescue;
pub mod state;
pub mod tick;
pub mod wall;
pub mod world;

pub use blast::{blast_impulse, blast_magnitude};
pub use rescue::{RescueConfig, RescueContainer, RescuePhase};
pub use state::{GameEvent, GameState, SugarSource};
pub use tick::{TickInput, tick};
pub use wall::{ContainerBounds, WallLayout, WallSegment, WallSide};
pub use world::{GrainHandle, PhysicsWorld};
