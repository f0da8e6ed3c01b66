// CONTROLLER: pose intake, frame conversion, input and per-tick update
pub mod pose_receiver;
pub mod pose_source;
pub mod frame_transformer;
pub mod input;
pub mod physics;
pub mod frame_loop;

pub use pose_receiver::{PoseListener, PoseMailbox, PoseReceiver};
pub use pose_source::{PoseDispatcher, PoseSource};
pub use frame_transformer::{FrameTransformer, DEVICE_TO_CAMERA, TRACKING_TO_WORLD};
pub use input::{InputForceMapper, InputSource, Touch, TouchEvent, TouchPhase, TouchSnapshot, TouchState};
pub use physics::PhysicsBody;
pub use frame_loop::{PoseController, TickOutput};
