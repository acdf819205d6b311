//! rapier2d physics world for sugar grains and static walls

use std::collections::HashMap;

use glam::Vec2;
use rapier2d::prelude::*;

use super::wall::WallSegment;
use crate::consts::{
    GRAIN_ELASTICITY, GRAIN_FRICTION, GRAIN_MASS, GRAIN_RADIUS, GRAVITY, SIM_DT,
};

/// A sugar grain is addressed by its rigid body handle
pub type GrainHandle = RigidBodyHandle;

#[inline]
fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

#[inline]
fn to_point(v: Vec2) -> Point<Real> {
    point![v.x, v.y]
}

/// Manages the rapier2d world shared by grains and static geometry
///
/// Static wall colliders are inserted and retracted by whoever owns their
/// handles; the world only keeps a record of their shape for inspection.
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    gravity: Vec2,
    /// Live static segments keyed by collider handle
    walls: HashMap<ColliderHandle, WallSegment>,
    /// Live grains in spawn order
    grains: Vec<GrainHandle>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let integration_parameters = IntegrationParameters {
            dt: SIM_DT,
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vec2::new(GRAVITY.0, GRAVITY.1),
            walls: HashMap::new(),
            grains: Vec::new(),
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        let gravity = to_vector(self.gravity);
        let physics_hooks = ();
        let event_handler = ();

        self.pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &event_handler,
        );
    }

    // ===== Static geometry =====

    /// Insert a static segment collider and return its handle
    pub fn insert_wall(&mut self, wall: &WallSegment) -> ColliderHandle {
        let collider = ColliderBuilder::new(SharedShape::capsule(
            to_point(wall.a),
            to_point(wall.b),
            wall.thickness,
        ))
        .friction(wall.friction)
        .restitution(wall.elasticity)
        .build();

        let handle = self.collider_set.insert(collider);
        self.walls.insert(handle, *wall);
        handle
    }

    /// Remove a static segment; returns false if it was already gone
    pub fn remove_wall(&mut self, handle: ColliderHandle) -> bool {
        if self.walls.remove(&handle).is_none() {
            return false;
        }
        self.collider_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.rigid_body_set,
                true,
            )
            .is_some()
    }

    pub fn wall(&self, handle: ColliderHandle) -> Option<&WallSegment> {
        self.walls.get(&handle)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    // ===== Sugar grains =====

    /// Spawn a dynamic sugar grain at `pos` (physics units)
    pub fn spawn_grain(&mut self, pos: Vec2) -> GrainHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(pos))
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::ball(GRAIN_RADIUS)
            .mass(GRAIN_MASS)
            .friction(GRAIN_FRICTION)
            .restitution(GRAIN_ELASTICITY)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.grains.push(handle);
        handle
    }

    /// Remove a grain and its collider
    pub fn remove_grain(&mut self, handle: GrainHandle) -> bool {
        self.grains.retain(|g| *g != handle);
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    pub fn grains(&self) -> &[GrainHandle] {
        &self.grains
    }

    pub fn grain_position(&self, handle: GrainHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let t = body.translation();
            Vec2::new(t.x, t.y)
        })
    }

    pub fn set_grain_position(&mut self, handle: GrainHandle, pos: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.set_translation(to_vector(pos), true);
                true
            }
            None => false,
        }
    }

    pub fn grain_velocity(&self, handle: GrainHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let v = body.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    pub fn set_grain_velocity(&mut self, handle: GrainHandle, vel: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.set_linvel(to_vector(vel), true);
                true
            }
            None => false,
        }
    }

    /// Apply an impulse to a grain at a world point
    pub fn apply_impulse_at(&mut self, handle: GrainHandle, impulse: Vec2, point: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.apply_impulse_at_point(to_vector(impulse), to_point(point), true);
                true
            }
            None => false,
        }
    }

    /// Grains whose center lies strictly within `radius` of `center`
    pub fn grains_within(&self, center: Vec2, radius: f32) -> Vec<GrainHandle> {
        self.grains
            .iter()
            .copied()
            .filter(|g| {
                self.grain_position(*g)
                    .is_some_and(|p| p.distance(center) < radius)
            })
            .collect()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
