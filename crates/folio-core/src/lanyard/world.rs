//! Rigid-body badge simulation on rapier.
//!
//! Three rope joints hang the chain from the fixed body; a spherical joint
//! hangs the card from the last link by the top of its face. Stepping runs at
//! a fixed rate with an accumulator.

use super::{BodyId, PhysicsWorld};
use crate::constants::*;
use glam::{Quat, Vec3};
use rapier3d::prelude::*;

#[inline]
fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn from_na(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub struct RapierWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
    handles: [RigidBodyHandle; BodyId::COUNT],
    ropes: Vec<(BodyId, BodyId, f32)>,
    accumulator: f32,
    steps_taken: u64,
}

impl RapierWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self::with_positions(LANYARD_INITIAL_POSITIONS.map(Vec3::from_array), gravity)
    }

    pub fn with_positions(positions: [Vec3; BodyId::COUNT], gravity: Vec3) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut impulse_joints = ImpulseJointSet::new();

        let handles = BodyId::ALL.map(|id| {
            let builder = if id == BodyId::Fixed {
                RigidBodyBuilder::fixed()
            } else {
                RigidBodyBuilder::dynamic()
                    .linear_damping(LANYARD_LINEAR_DAMPING)
                    .angular_damping(LANYARD_ANGULAR_DAMPING)
                    .can_sleep(true)
            };
            let handle = bodies.insert(builder.translation(to_na(positions[id.index()])).build());
            let collider = match id {
                BodyId::Fixed => None,
                BodyId::J1 | BodyId::J2 | BodyId::J3 => Some(ColliderBuilder::ball(
                    LANYARD_JOINT_RADII[id.index() - 1],
                )),
                BodyId::Card => {
                    let [hx, hy] = LANYARD_CARD_HALF_EXTENTS;
                    Some(ColliderBuilder::cuboid(hx, hy, LANYARD_CARD_HALF_DEPTH))
                }
            };
            if let Some(collider) = collider {
                colliders.insert_with_parent(collider.build(), handle, &mut bodies);
            }
            handle
        });

        let mut ropes = Vec::with_capacity(3);
        for pair in [BodyId::Fixed, BodyId::J1, BodyId::J2, BodyId::J3].windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let max_length = positions[a.index()].distance(positions[b.index()]);
            let joint = RopeJointBuilder::new(max_length)
                .local_anchor1(point![0.0, 0.0, 0.0])
                .local_anchor2(point![0.0, 0.0, 0.0])
                .build();
            impulse_joints.insert(handles[a.index()], handles[b.index()], joint, true);
            ropes.push((a, b, max_length));
        }
        let [ax, ay, az] = LANYARD_CARD_ANCHOR;
        let hinge = SphericalJointBuilder::new()
            .local_anchor1(point![0.0, 0.0, 0.0])
            .local_anchor2(point![ax, ay, az])
            .build();
        impulse_joints.insert(
            handles[BodyId::J3.index()],
            handles[BodyId::Card.index()],
            hinge,
            true,
        );

        let params = IntegrationParameters {
            dt: LANYARD_TIMESTEP_SEC,
            ..IntegrationParameters::default()
        };
        Self {
            gravity: to_na(gravity),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints,
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
            handles,
            ropes,
            accumulator: 0.0,
            steps_taken: 0,
        }
    }

    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// `(current, max)` length of each rope joint, top first.
    pub fn rope_lengths(&self) -> Vec<(f32, f32)> {
        self.ropes
            .iter()
            .map(|&(a, b, max)| {
                let d = self.joint_translation(a).distance(self.joint_translation(b));
                (d, max)
            })
            .collect()
    }

    /// Distance between the last rope body and the card's hanging point.
    pub fn anchor_gap(&self) -> f32 {
        let card = self.joint_translation(BodyId::Card)
            + self.joint_rotation(BodyId::Card) * Vec3::from_array(LANYARD_CARD_ANCHOR);
        self.joint_translation(BodyId::J3).distance(card)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(self.handles[id.index()])
    }

    fn substep(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
        self.steps_taken += 1;
    }

    /// Bleed spin about the vertical axis so the card turns back to face the camera.
    fn settle_card_facing(&mut self) {
        let Some(card) = self.body_mut(BodyId::Card) else {
            return;
        };
        if !card.is_dynamic() {
            return;
        }
        let ang = *card.angvel();
        let twist = card.rotation().j;
        card.set_angvel(vector![ang.x, ang.y - twist * LANYARD_UPRIGHT_GAIN, ang.z], false);
    }
}

impl PhysicsWorld for RapierWorld {
    fn step(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let h = LANYARD_TIMESTEP_SEC;
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= h && steps < LANYARD_MAX_STEPS_PER_FRAME {
            self.substep();
            self.accumulator -= h;
            steps += 1;
        }
        // after a long stall, drop the backlog instead of catching up
        self.accumulator = self.accumulator.min(h);
        self.settle_card_facing();
    }

    fn joint_translation(&self, id: BodyId) -> Vec3 {
        self.bodies
            .get(self.handles[id.index()])
            .map(|b| from_na(b.translation()))
            .unwrap_or(Vec3::ZERO)
    }

    fn joint_rotation(&self, id: BodyId) -> Quat {
        self.bodies
            .get(self.handles[id.index()])
            .map(|b| {
                let r = b.rotation();
                Quat::from_xyzw(r.i, r.j, r.k, r.w)
            })
            .unwrap_or(Quat::IDENTITY)
    }

    fn set_kinematic_target(&mut self, id: BodyId, target: Vec3) {
        if id == BodyId::Fixed {
            return;
        }
        // a dragged card pulls the whole chain, so none of it may stay asleep
        for handle in self.handles {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.wake_up(true);
            }
        }
        let Some(body) = self.body_mut(id) else {
            return;
        };
        if !body.is_kinematic() {
            body.set_body_type(RigidBodyType::KinematicPositionBased, true);
        }
        body.set_next_kinematic_translation(to_na(target));
    }

    fn release_kinematic(&mut self, id: BodyId) {
        if id == BodyId::Fixed {
            return;
        }
        if let Some(body) = self.body_mut(id) {
            body.set_body_type(RigidBodyType::Dynamic, true);
        }
    }
}
