// MODEL: pose data, anchor and output transform
pub mod pose;
pub mod anchor;
pub mod transform;

pub use pose::{CoordinateFrame, FramePair, PoseSample, PoseStatus, TrackedPoseState};
pub use anchor::AnchorState;
pub use transform::{ObjectTransform, TransformUniform};
