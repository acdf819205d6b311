//! Rescue container: a summonable, movable open-top bucket
//!
//! The container catches falling sugar in emergencies. It can be nudged around
//! (carrying its grains with it), emptied through its floor, and finally
//! detonates with a radial blast that scatters nearby grains.
//!
//! Lifecycle: `Active` -> `ActiveEmptied` -> `Exploded`, or straight from
//! `Active` to `Exploded`. `reinitialize` returns any state to `Active`.
//!
//! The container exclusively owns its wall colliders. Grain bodies belong to
//! the [`PhysicsWorld`]; the container only remembers their handles.

use glam::Vec2;
use rapier2d::prelude::ColliderHandle;
use serde::{Deserialize, Serialize};

use super::blast::blast_impulse;
use super::state::GameEvent;
use super::wall::{ContainerBounds, WallLayout, WallSegment, WallSide};
use super::world::{GrainHandle, PhysicsWorld};
use crate::error::RescueError;
use crate::{delta_to_physics, display_to_physics, pixels_to_units};

/// Placement and sizing for a rescue container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RescueConfig {
    /// Center in display pixels (Y down)
    pub center: Vec2,
    /// Width in display pixels
    pub width: f32,
    /// Height in display pixels
    pub height: f32,
    /// Sugar the host expects the container to gather
    pub needed_sugar: u32,
}

impl RescueConfig {
    pub fn new(center: Vec2, width: f32, height: f32, needed_sugar: u32) -> Self {
        Self {
            center,
            width,
            height,
            needed_sugar,
        }
    }

    fn validate(&self) -> Result<(), RescueError> {
        let extent_ok = |v: f32| v.is_finite() && v > 0.0;
        if !extent_ok(self.width) || !extent_ok(self.height) {
            return Err(RescueError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        if !self.center.is_finite() {
            return Err(RescueError::InvalidPosition {
                x: self.center.x,
                y: self.center.y,
            });
        }
        Ok(())
    }
}

/// Lifecycle phase of a rescue container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RescuePhase {
    /// All three walls present
    Active,
    /// Bottom wall removed, side walls still present
    ActiveEmptied,
    /// Terminal: no walls, no further interaction
    Exploded,
}

/// Collider handles currently inserted into the world
#[derive(Debug, Default, Clone, Copy)]
struct WallHandles {
    left: Option<ColliderHandle>,
    right: Option<ColliderHandle>,
    bottom: Option<ColliderHandle>,
}

impl WallHandles {
    fn get(&self, side: WallSide) -> Option<ColliderHandle> {
        match side {
            WallSide::Left => self.left,
            WallSide::Right => self.right,
            WallSide::Bottom => self.bottom,
        }
    }
}

/// A movable, time-limited container for rescuing sugar grains
#[derive(Debug)]
pub struct RescueContainer {
    /// Reference position in display pixels
    position: Vec2,
    /// Physical extent in simulation units
    size: Vec2,
    layout: WallLayout,
    handles: WallHandles,
    count: u32,
    collected: Vec<GrainHandle>,
    needed_sugar: u32,
    emptied: bool,
    exploded: bool,
    explosion_triggered: bool,
    /// Seconds since the walls were built
    elapsed: f32,
    events: Vec<GameEvent>,
}

impl RescueContainer {
    /// Build the container and insert its three walls into `world`
    pub fn new(world: &mut PhysicsWorld, config: RescueConfig) -> Result<Self, RescueError> {
        config.validate()?;
        let mut container = Self::unbuilt(&config);
        container.insert_walls(world);
        container.events.push(GameEvent::RescueSpawned {
            position: container.position,
        });

        log::info!(
            "Rescue container spawned at ({:.0}, {:.0}), {}x{} px, needs {}",
            config.center.x,
            config.center.y,
            config.width,
            config.height,
            config.needed_sugar
        );
        Ok(container)
    }

    /// Replace all state in place as if freshly constructed
    ///
    /// Walls still owned by this container are retracted first. Undrained
    /// events survive so the host does not miss the previous detonation.
    pub fn reinitialize(
        &mut self,
        world: &mut PhysicsWorld,
        config: RescueConfig,
    ) -> Result<(), RescueError> {
        config.validate()?;
        self.retract_walls(world);

        let events = std::mem::take(&mut self.events);
        *self = Self::unbuilt(&config);
        self.events = events;
        self.insert_walls(world);
        self.events.push(GameEvent::RescueSpawned {
            position: self.position,
        });

        log::info!(
            "Rescue container reinitialized at ({:.0}, {:.0})",
            config.center.x,
            config.center.y
        );
        Ok(())
    }

    fn unbuilt(config: &RescueConfig) -> Self {
        let size = Vec2::new(pixels_to_units(config.width), pixels_to_units(config.height));
        Self {
            position: config.center,
            size,
            layout: WallLayout::around(display_to_physics(config.center), size / 2.0),
            handles: WallHandles::default(),
            count: 0,
            collected: Vec::new(),
            needed_sugar: config.needed_sugar,
            emptied: false,
            exploded: false,
            explosion_triggered: false,
            elapsed: 0.0,
            events: Vec::new(),
        }
    }

    fn insert_walls(&mut self, world: &mut PhysicsWorld) {
        self.handles.left = Some(world.insert_wall(&self.layout.left));
        self.handles.right = Some(world.insert_wall(&self.layout.right));
        if !self.emptied {
            self.handles.bottom = Some(world.insert_wall(&self.layout.bottom));
        }
    }

    fn retract_walls(&mut self, world: &mut PhysicsWorld) {
        for handle in [
            self.handles.left.take(),
            self.handles.right.take(),
            self.handles.bottom.take(),
        ]
        .into_iter()
        .flatten()
        {
            world.remove_wall(handle);
        }
    }

    /// Translate the container by a display-space delta
    ///
    /// Collected grains ride along (unless the floor is open) and are clamped
    /// into the interior at the new position. Walls are retracted and rebuilt
    /// rather than moved. An exploded container only tracks its position.
    pub fn move_by(&mut self, world: &mut PhysicsWorld, dx: f32, dy: f32) {
        let delta = Vec2::new(dx, dy);
        self.position += delta;
        if self.exploded {
            return;
        }

        let next = WallLayout::around(display_to_physics(self.position), self.size / 2.0);

        // Forget grains the world has since removed
        self.collected.retain(|grain| world.grain_position(*grain).is_some());

        if !self.emptied {
            let shift = delta_to_physics(delta);
            let bounds = next.bounds();
            for &grain in &self.collected {
                if let Some(pos) = world.grain_position(grain) {
                    world.set_grain_position(grain, bounds.clamp(pos + shift));
                }
            }
        }

        self.retract_walls(world);
        self.layout = next;
        self.insert_walls(world);
    }

    /// Try to collect a grain; true only the first time it is seen inside
    pub fn collect(&mut self, world: &mut PhysicsWorld, grain: GrainHandle) -> bool {
        if self.exploded {
            return false;
        }
        let Some(pos) = world.grain_position(grain) else {
            return false;
        };
        if !self.layout.bounds().contains(pos) || self.collected.contains(&grain) {
            return false;
        }

        self.count += 1;
        self.collected.push(grain);
        world.set_grain_velocity(grain, Vec2::ZERO);
        self.events.push(GameEvent::SugarCollected {
            grain,
            count: self.count,
        });
        log::debug!("Rescue collected grain {:?} (count={})", grain, self.count);
        true
    }

    /// Open the floor: remove the bottom wall
    ///
    /// Returns false if already emptied or exploded.
    pub fn empty(&mut self, world: &mut PhysicsWorld) -> bool {
        if self.exploded || self.emptied {
            return false;
        }
        if let Some(handle) = self.handles.bottom.take() {
            world.remove_wall(handle);
        }
        self.emptied = true;
        self.events.push(GameEvent::RescueEmptied { count: self.count });
        log::info!("Rescue container emptied with {} grains", self.count);
        true
    }

    /// Detonate: push nearby grains outward and remove all walls
    ///
    /// Only candidates within the blast radius of the center are affected.
    /// Returns the number of grains pushed; a second call does nothing.
    pub fn explode(&mut self, world: &mut PhysicsWorld, candidates: &[GrainHandle]) -> usize {
        if self.exploded {
            return 0;
        }

        let center = self.layout.center();
        let mut pushed = 0;
        for &grain in candidates {
            let Some(pos) = world.grain_position(grain) else {
                continue;
            };
            if let Some(impulse) = blast_impulse(pos - center) {
                world.apply_impulse_at(grain, impulse, pos);
                pushed += 1;
            }
        }

        self.retract_walls(world);
        self.exploded = true;
        self.events.push(GameEvent::RescueDetonated { center, pushed });

        log::info!(
            "Rescue container exploded at ({:.2}, {:.2}), pushed {} grains, final count {}",
            center.x,
            center.y,
            pushed,
            self.count
        );
        pushed
    }

    /// Zero the counter; an exploded container keeps its final count
    pub fn count_reset(&mut self) {
        if !self.exploded {
            self.count = 0;
        }
    }

    // ===== Lifetime =====

    /// Advance the lifetime counter by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !self.exploded {
            self.elapsed += dt;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds left before `lifetime` runs out (never negative)
    pub fn remaining(&self, lifetime: f32) -> f32 {
        (lifetime - self.elapsed).max(0.0)
    }

    /// Arm detonation; true only on the first successful call
    pub fn trigger_detonation(&mut self) -> bool {
        if self.exploded || self.explosion_triggered {
            return false;
        }
        self.explosion_triggered = true;
        true
    }

    /// Arm detonation once the lifetime has run out
    ///
    /// Returns true exactly once per container lifetime.
    pub fn poll_detonation(&mut self, lifetime: f32) -> bool {
        self.elapsed >= lifetime && self.trigger_detonation()
    }

    // ===== Queries =====

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn needed_sugar(&self) -> u32 {
        self.needed_sugar
    }

    pub fn has_enough(&self) -> bool {
        self.count >= self.needed_sugar
    }

    pub fn is_emptied(&self) -> bool {
        self.emptied
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub fn explosion_triggered(&self) -> bool {
        self.explosion_triggered
    }

    pub fn phase(&self) -> RescuePhase {
        if self.exploded {
            RescuePhase::Exploded
        } else if self.emptied {
            RescuePhase::ActiveEmptied
        } else {
            RescuePhase::Active
        }
    }

    /// Reference position in display pixels
    pub fn display_position(&self) -> Vec2 {
        self.position
    }

    /// Center in physics units, read from the wall endpoints
    pub fn center(&self) -> Vec2 {
        self.layout.center()
    }

    pub fn bounds(&self) -> ContainerBounds {
        self.layout.bounds()
    }

    /// Walls currently present in the world
    pub fn walls(&self) -> impl Iterator<Item = (WallSide, WallSegment)> + '_ {
        [WallSide::Left, WallSide::Right, WallSide::Bottom]
            .into_iter()
            .filter(|side| self.handles.get(*side).is_some())
            .map(|side| (side, *self.layout.get(side)))
    }

    pub fn collected(&self) -> &[GrainHandle] {
        &self.collected
    }

    pub fn contains_grain(&self, grain: GrainHandle) -> bool {
        self.collected.contains(&grain)
    }

    /// Take the domain events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
