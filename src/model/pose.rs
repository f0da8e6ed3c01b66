use glam::{Quat, Vec3};

/// Reference frames a pose source can report against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateFrame {
    GlobalWgs84,
    AreaDescription,
    StartOfService,
    PreviousDevicePose,
    Device,
    Imu,
    Display,
    CameraColor,
    CameraDepth,
    CameraFisheye,
    Invalid,
}

/// Base/target pair a sample is expressed in: the pose of `target` relative to `base`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramePair {
    pub base: CoordinateFrame,
    pub target: CoordinateFrame,
}

impl FramePair {
    /// Device pose relative to where the tracking service started.
    pub const DEVICE_IN_SERVICE: FramePair = FramePair {
        base: CoordinateFrame::StartOfService,
        target: CoordinateFrame::Device,
    };

    pub const fn new(base: CoordinateFrame, target: CoordinateFrame) -> Self {
        Self { base, target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseStatus {
    Initializing,
    Valid,
    Invalid,
    Unknown,
}

impl PoseStatus {
    pub fn is_valid(self) -> bool {
        self == PoseStatus::Valid
    }
}

/// One pose report as delivered by the sensor, in double precision.
///
/// `orientation` is stored x, y, z, w.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSample {
    pub timestamp: f64,
    pub frame: FramePair,
    pub translation: [f64; 3],
    pub orientation: [f64; 4],
    pub status: PoseStatus,
}

impl PoseSample {
    pub fn new(frame: FramePair, translation: [f64; 3], orientation: [f64; 4], status: PoseStatus) -> Self {
        Self {
            timestamp: 0.0,
            frame,
            translation,
            orientation,
            status,
        }
    }

    /// Valid device-in-service sample, the common case
    pub fn device(translation: [f64; 3], orientation: [f64; 4]) -> Self {
        Self::new(FramePair::DEVICE_IN_SERVICE, translation, orientation, PoseStatus::Valid)
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_status(mut self, status: PoseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn translation_f32(&self) -> Vec3 {
        let [x, y, z] = self.translation;
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Orientation narrowed to f32, taken as-is (not renormalised).
    pub fn orientation_f32(&self) -> Quat {
        let [x, y, z, w] = self.orientation;
        Quat::from_xyzw(x as f32, y as f32, z as f32, w as f32)
    }
}

/// Latest accepted device pose in the tracking frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoseState {
    pub position: Vec3,
    pub orientation: Quat,
}

impl TrackedPoseState {
    /// Zero translation, identity orientation. Used at startup and on tracking loss.
    pub const RESET: TrackedPoseState = TrackedPoseState {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    pub fn from_sample(sample: &PoseSample) -> Self {
        Self::new(sample.translation_f32(), sample.orientation_f32())
    }

    pub fn is_reset(&self) -> bool {
        *self == Self::RESET
    }
}

impl Default for TrackedPoseState {
    fn default() -> Self {
        Self::RESET
    }
}
