use std::sync::Arc;

use glam::Vec3;
use tracing::{info, warn};

use super::frame_transformer::FrameTransformer;
use super::input::{InputForceMapper, InputSource, TouchSnapshot};
use super::physics::PhysicsBody;
use super::pose_receiver::PoseReceiver;
use super::pose_source::PoseSource;
use crate::config::ControllerConfig;
use crate::error::ConfigError;
use crate::model::{AnchorState, ObjectTransform, TrackedPoseState};

/// Result of one [`PoseController::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub transform: ObjectTransform,
    /// Force handed to the physics body this tick, if one was attached
    pub force: Option<Vec3>,
}

/// Per-tick driver tying the pose mailbox, frame conversion and force mapping together
pub struct PoseController {
    receiver: PoseReceiver,
    transformer: FrameTransformer,
    force_mapper: Option<InputForceMapper>,
    body: Option<Box<dyn PhysicsBody>>,
    input: Option<Box<dyn InputSource>>,
    transform: ObjectTransform,
    warned_missing_body: bool,
}

impl PoseController {
    /// Anchor at `initial_position` and subscribe to `source`.
    ///
    /// Without a source the controller still ticks but stays at the anchor.
    pub fn new(
        config: ControllerConfig,
        initial_position: Vec3,
        source: Option<&mut dyn PoseSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let receiver = PoseReceiver::new();
        match source {
            Some(source) => source.register(Arc::new(receiver.clone())),
            None => warn!("no pose source available; tracked object will stay at its start position"),
        }

        let anchor = AnchorState::new(initial_position, config.movement_scale);
        info!(
            start = ?anchor.start_position(),
            movement_scale = anchor.movement_scale(),
            force_mapping = config.force.is_some(),
            "pose controller ready"
        );

        Ok(Self {
            receiver,
            transformer: FrameTransformer::new(anchor),
            force_mapper: config.force.map(InputForceMapper::new),
            body: None,
            input: None,
            transform: ObjectTransform::at(initial_position),
            warned_missing_body: false,
        })
    }

    pub fn with_body(mut self, body: Box<dyn PhysicsBody>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_input(mut self, input: Box<dyn InputSource>) -> Self {
        self.input = Some(input);
        self
    }

    /// Handle for feeding samples directly, bypassing a [`PoseSource`]
    pub fn receiver(&self) -> PoseReceiver {
        self.receiver.clone()
    }

    pub fn anchor(&self) -> &AnchorState {
        self.transformer.anchor()
    }

    pub fn tracked_pose(&self) -> TrackedPoseState {
        self.receiver.latest()
    }

    /// Transform computed by the most recent tick
    pub fn transform(&self) -> ObjectTransform {
        self.transform
    }

    /// Recompute the object transform from the latest pose, then apply input force.
    pub fn update(&mut self) -> TickOutput {
        let state = self.receiver.latest();
        self.transform = self.transformer.transform(&state);

        let force = self.apply_input_force();

        TickOutput {
            transform: self.transform,
            force,
        }
    }

    fn apply_input_force(&mut self) -> Option<Vec3> {
        let mapper = self.force_mapper.as_ref()?;

        let Some(body) = self.body.as_mut() else {
            if !self.warned_missing_body {
                warn!("force mapping enabled but no physics body attached; skipping");
                self.warned_missing_body = true;
            }
            return None;
        };

        let snapshot = self
            .input
            .as_ref()
            .map(|input| input.snapshot())
            .unwrap_or_else(TouchSnapshot::default);

        let force = mapper.force(&snapshot, self.transform.rotation);
        body.add_force(force);
        Some(force)
    }
}
