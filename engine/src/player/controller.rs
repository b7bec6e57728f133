//! First-Person Controller
//!
//! Runs one simulation step of the character in a fixed order:
//!
//! 1. Ground probe: contact, slope, landings
//! 2. Pose: input requests, roof veto, blend step, camera mounts
//! 3. Jump: power decay, ceiling cut, jump input
//! 4. Velocity: ground or air branch, written into the body
//! 5. Footsteps and look
//!
//! Later stages read what earlier stages produced this frame and nothing else.
//!
//! # Physics Model
//!
//! - Standing: 1.8 m tall, 3.5 m/s
//! - Sprinting: 7.0 m/s
//! - Jump: 12 m/s of upward power, decaying at 7 m/s per second
//! - Gravity is left to the host's physics step and switched off while rising
//!
//! # Usage
//!
//! ```rust,ignore
//! use vantage_engine::player::FirstPersonController;
//! use vantage_engine::input::InputFrame;
//! use vantage_engine::physics::SceneWorld;
//!
//! let mut controller = FirstPersonController::default();
//! let mut world = SceneWorld::new();
//!
//! // Each frame:
//! let output = controller.step(delta_time, &input, &mut world);
//! for event in controller.drain_events() {
//!     audio.handle(event);
//! }
//! physics.set_velocity(player_body, output.velocity);
//! ```

use glam::{Quat, Vec2, Vec3};

use super::constraints::Constraints;
use super::footsteps::{FootstepCue, FootstepTimer};
use super::jump::JumpController;
use super::look::LookController;
use super::movement::{MovementFrame, MovementMode, VelocitySolver};
use super::pose::{PoseState, PoseStateData, StateRegistry};
use super::states::{ButtonInputMode, PoseIntents, StatesModule};
use super::traverser::{CameraMounts, OverheadCheck, Traverser};
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::events::{ControllerEvent, EventQueue};
use crate::input::ControllerInput;
use crate::physics::{CharacterBody, PhysicsWorld};
use crate::probe::{GroundProbe, ProbeFrame, RoofProbe};

/// Longest step the controller will simulate in one call (seconds).
pub const MAX_STEP: f32 = 0.1;

/// What the host needs after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Velocity to hand to the physics step
    pub velocity: Vec3,
    /// Whether the physics step should apply gravity
    pub use_gravity: bool,
    pub grounded: bool,
    /// Discrete pose (the blend target)
    pub state: PoseState,
    /// Live collider envelope; apply height and radius to the collision shape
    pub envelope: PoseStateData,
    pub camera: CameraMounts,
    /// Camera rotation relative to the body
    pub camera_rotation: Quat,
    pub ground_normal: Vec3,
    pub slope: f32,
    pub directional_slope: f32,
    pub mode: MovementMode,
    pub footstep: Option<FootstepCue>,
}

/// Roof probe bound to the world and body position for one pose update.
struct RoofQuery<'a, W: PhysicsWorld + ?Sized> {
    roof: &'a mut RoofProbe,
    world: &'a W,
    position: Vec3,
}

impl<W: PhysicsWorld + ?Sized> OverheadCheck for RoofQuery<'_, W> {
    fn clearance(&mut self, envelope: &PoseStateData) -> Option<f32> {
        let frame = ProbeFrame {
            position: self.position,
            height: envelope.height,
            radius: envelope.radius,
        };
        self.roof.clearance(self.world, &frame)
    }
}

#[derive(Debug, Clone)]
pub struct FirstPersonController {
    body: CharacterBody,
    registry: StateRegistry,
    constraints: Constraints,
    ground: GroundProbe,
    roof: RoofProbe,
    traverser: Traverser,
    states: StatesModule,
    jump: JumpController,
    movement: VelocitySolver,
    look: LookController,
    footsteps: FootstepTimer,
    events: EventQueue,
    gravity: f32,
}

static_assertions::assert_impl_all!(FirstPersonController: Send, Sync);

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::build(ControllerConfig::default(), CharacterBody::default())
    }
}

impl FirstPersonController {
    /// Validate `config` and place the character at `body`.
    pub fn new(config: ControllerConfig, body: CharacterBody) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self::build(config, body))
    }

    /// Default configuration, standing at `position`.
    pub fn at(position: Vec3) -> Self {
        Self::build(ControllerConfig::default(), CharacterBody::at(position))
    }

    fn build(config: ControllerConfig, body: CharacterBody) -> Self {
        let initial = config
            .states
            .try_get(config.initial_state)
            .unwrap_or(config.states.standing);

        Self {
            body,
            constraints: config.constraints,
            ground: GroundProbe::from_config(&config.ground),
            roof: RoofProbe::new(config.roof),
            traverser: Traverser::new(config.traverser, initial),
            states: StatesModule::new(config.sprint_mode),
            jump: JumpController::new(config.jump),
            movement: VelocitySolver::new(config.movement),
            look: LookController::new(config.look, body.yaw),
            footsteps: FootstepTimer::new(config.footsteps),
            events: EventQueue::new(),
            gravity: config.gravity,
            registry: config.states,
        }
    }

    /// Run one frame. `dt` is clamped to `[0, MAX_STEP]`.
    pub fn step<I, W>(&mut self, dt: f32, input: &I, world: &mut W) -> FrameOutput
    where
        I: ControllerInput + ?Sized,
        W: PhysicsWorld + ?Sized,
    {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_STEP) } else { 0.0 };

        let move_input = if self.constraints.movement() {
            input.movement_axis()
        } else {
            Vec2::ZERO
        };

        // Ground
        let envelope = *self.traverser.current();
        let probe_frame = ProbeFrame {
            position: self.body.position,
            height: envelope.height,
            radius: envelope.radius,
        };
        let travel = self.body.transform_direction(self.movement.speed().local_vector());
        let grounded = self.ground.process(
            &*world,
            &probe_frame,
            travel,
            self.jump.is_active(),
            &mut self.events,
        );

        // Pose
        let intents = PoseIntents {
            sprint: input.sprint(),
            crouch: input.crouch(),
            prone: input.prone(),
        };
        self.states.process(
            intents,
            grounded,
            &self.constraints,
            &mut self.traverser,
            &self.registry,
            &mut self.events,
        );
        let mut overhead = RoofQuery {
            roof: &mut self.roof,
            world: &*world,
            position: self.body.position,
        };
        let envelope = self.traverser.advance(dt, &self.registry, &mut overhead, &mut self.events);

        // Jump
        let roof_solid = !grounded && self.jump.is_active() && {
            let frame = ProbeFrame {
                position: self.body.position,
                height: envelope.height,
                radius: envelope.radius,
            };
            self.roof.check(&*world, &frame) && self.roof.hit_is_solid()
        };
        if self.jump.process(grounded, roof_solid, dt, &mut self.events) {
            self.ground.jump_ended(self.body.position);
        }
        if input.jump() {
            match self.traverser.state() {
                PoseState::Crouching | PoseState::Proning => {
                    self.traverser.go_to(PoseState::Standing, &self.registry, &mut self.events);
                }
                _ => {
                    self.jump.try_jump(
                        grounded,
                        self.ground.result(),
                        &self.constraints,
                        world,
                        &mut self.events,
                    );
                }
            }
        }

        // Velocity
        let ground = self.ground.result();
        let movement_frame = MovementFrame {
            input: move_input,
            movement_allowed: self.constraints.movement(),
            grounded,
            ground_normal: ground.normal,
            on_dynamic_body: grounded && ground.on_dynamic_body(),
            jump_power: self.jump.power_value(),
            jump_start_velocity: self.jump.start_velocity(),
            pose_speed: envelope.speed,
            target_speed: self.traverser.target().speed,
            gravity: self.gravity,
            dt,
        };
        let mode = self.movement.solve(&movement_frame, &mut self.body);

        // Footsteps and look
        let footstep = self.footsteps.process(
            self.movement.speed().vector(),
            grounded,
            self.traverser.state(),
            ground.surface,
            dt,
            &mut self.events,
        );
        self.look.process(input.look_axis(), self.constraints.look(), &mut self.body, dt);

        FrameOutput {
            velocity: self.body.velocity,
            use_gravity: self.body.use_gravity,
            grounded,
            state: self.traverser.state(),
            envelope,
            camera: self.traverser.camera_mounts(),
            camera_rotation: self.look.pitch_rotation(),
            ground_normal: ground.normal,
            slope: self.ground.slope().value(),
            directional_slope: self.ground.directional_slope(),
            mode,
            footstep,
        }
    }

    /// Take every event produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        self.events.drain().collect()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn body(&self) -> &CharacterBody {
        &self.body
    }

    /// The host writes back the integrated position here.
    pub fn body_mut(&mut self) -> &mut CharacterBody {
        &mut self.body
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    pub fn state(&self) -> PoseState {
        self.traverser.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded()
    }

    pub fn can_jump(&self) -> bool {
        self.jump.can_jump(self.ground.is_grounded(), &self.constraints)
    }

    /// Request a pose directly, bypassing input.
    ///
    /// Fails for a custom state with no registered data.
    pub fn go_to(&mut self, state: PoseState) -> Result<bool, ControllerError> {
        let data = self.registry.try_get(state)?;
        Ok(self.traverser.request_transition(data, &mut self.events))
    }

    /// Camera mounts the given pose would produce once settled.
    pub fn camera_mounts_for(&self, state: PoseState) -> Result<CameraMounts, ControllerError> {
        let data = self.registry.try_get(state)?;
        Ok(self.traverser.camera_mounts_for(&data))
    }

    pub fn camera_mounts(&self) -> CameraMounts {
        self.traverser.camera_mounts()
    }

    /// Replace the custom pose. Takes effect on the next request.
    pub fn set_custom_state(&mut self, height: f32, radius: f32, speed: f32) {
        self.registry.set_custom(height, radius, speed);
    }

    pub fn set_sprint_mode(&mut self, mode: ButtonInputMode) {
        self.states.set_sprint_mode(mode);
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut Constraints {
        &mut self.constraints
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn traverser(&self) -> &Traverser {
        &self.traverser
    }

    pub fn ground(&self) -> &GroundProbe {
        &self.ground
    }

    pub fn roof(&self) -> &RoofProbe {
        &self.roof
    }

    pub fn jump(&self) -> &JumpController {
        &self.jump
    }

    pub fn movement(&self) -> &VelocitySolver {
        &self.movement
    }

    pub fn look(&self) -> &LookController {
        &self.look
    }

    pub fn look_mut(&mut self) -> &mut LookController {
        &mut self.look
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }
}
