// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod utils;
pub mod config;
pub mod error;

// MVC Architecture (no view: rendering is the host's job)
pub mod model;
pub mod controller;

pub use config::{ControllerConfig, ForceConfig};
pub use error::ConfigError;
pub use controller::{PoseController, PoseDispatcher, PoseListener, PoseReceiver, PoseSource, TickOutput};
pub use model::{AnchorState, CoordinateFrame, FramePair, ObjectTransform, PoseSample, PoseStatus, TrackedPoseState};
