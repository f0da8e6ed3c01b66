//! Tracking-frame to world-frame conversion.
//!
//! The sensor reports the device in a right-handed, Z-up frame anchored at the
//! start of the tracking service. The renderer is Y-up with the camera looking
//! down +Z. Two constant basis changes bridge the conventions:
//!
//! ```text
//! world_from_tracking = TRACKING_TO_WORLD * TRS(pose) * DEVICE_TO_CAMERA
//! ```

use glam::{Mat4, Vec3, Vec4};

use crate::model::{AnchorState, ObjectTransform, TrackedPoseState};
use crate::utils::look_rotation;

/// Swaps the up and forward axes between tracking and world conventions
pub const TRACKING_TO_WORLD: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

/// Flips the device's forward axis into camera-forward convention
pub const DEVICE_TO_CAMERA: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, -1.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

/// Stateless per-tick conversion of the tracked pose into an object transform
#[derive(Debug, Clone, Copy)]
pub struct FrameTransformer {
    anchor: AnchorState,
}

impl FrameTransformer {
    pub fn new(anchor: AnchorState) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> &AnchorState {
        &self.anchor
    }

    /// Full world-from-tracking matrix for a tracked pose (no anchor applied).
    pub fn world_from_tracking(state: &TrackedPoseState) -> Mat4 {
        let ss_t_d = Mat4::from_scale_rotation_translation(Vec3::ONE, state.orientation, state.position);
        TRACKING_TO_WORLD * ss_t_d * DEVICE_TO_CAMERA
    }

    pub fn transform(&self, state: &TrackedPoseState) -> ObjectTransform {
        let world = Self::world_from_tracking(state);

        let position = self.anchor.place(world.w_axis.truncate());
        let rotation = look_rotation(world.z_axis.truncate(), world.y_axis.truncate());

        ObjectTransform::new(position, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::same_rotation;
    use glam::Quat;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn transformer(scale: f32) -> FrameTransformer {
        FrameTransformer::new(AnchorState::new(Vec3::new(2.0, 1.0, -3.0), scale))
    }

    #[test]
    fn test_reset_pose_snaps_to_anchor() {
        let t = transformer(3.0).transform(&TrackedPoseState::RESET);
        // exact equality: zero offset must not perturb the anchor
        assert_eq!(t.position, Vec3::new(2.0, 1.0, -3.0));
        assert!(same_rotation(t.rotation, Quat::from_rotation_x(FRAC_PI_2), 1e-5), "got {:?}", t.rotation);
    }

    #[test]
    fn test_basis_swaps_up_and_forward() {
        // tracking z (up) becomes world y, tracking y (forward) becomes world z
        let state = TrackedPoseState::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let world = FrameTransformer::world_from_tracking(&state);
        assert_eq!(world.w_axis.truncate(), Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_position_scales_before_anchor() {
        let state = TrackedPoseState::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let t = transformer(3.0).transform(&state);
        assert_eq!(t.position, Vec3::new(2.0 + 3.0, 1.0 + 9.0, -3.0 + 6.0));
    }

    #[test]
    fn test_scale_linearity() {
        let state = TrackedPoseState::new(
            Vec3::new(0.3, -1.2, 0.8),
            Quat::from_rotation_z(0.4) * Quat::from_rotation_x(0.2),
        );
        let start = Vec3::new(2.0, 1.0, -3.0);
        let single = transformer(3.0).transform(&state);
        let double = transformer(6.0).transform(&state);

        let offset_single = single.position - start;
        let offset_double = double.position - start;
        assert!(offset_double.abs_diff_eq(offset_single * 2.0, 1e-5));
        assert!(same_rotation(single.rotation, double.rotation, 1e-6));
    }

    #[test]
    fn test_device_upright_looks_along_world_forward() {
        // device rotated +90° about tracking X: its -Z (back camera) now points along tracking +Y
        let state = TrackedPoseState::new(Vec3::ZERO, Quat::from_rotation_x(FRAC_PI_2));
        let t = transformer(1.0).transform(&state);
        assert!(t.forward().abs_diff_eq(Vec3::Z, 1e-5), "forward {:?}", t.forward());
        assert!(t.up().abs_diff_eq(Vec3::Y, 1e-5), "up {:?}", t.up());
    }

    #[test]
    fn test_yaw_turns_around_world_up() {
        let upright = Quat::from_rotation_x(FRAC_PI_2);
        let yawed = Quat::from_rotation_z(FRAC_PI_4) * upright;
        let t = transformer(1.0).transform(&TrackedPoseState::new(Vec3::ZERO, yawed));
        // still level: up stays world Y and forward stays in the XZ plane
        assert!(t.up().abs_diff_eq(Vec3::Y, 1e-5), "up {:?}", t.up());
        assert!(t.forward().y.abs() < 1e-5);
    }

    #[test]
    fn test_deterministic() {
        let state = TrackedPoseState::new(Vec3::new(0.1, 0.2, 0.3), Quat::from_rotation_y(0.7));
        let transformer = transformer(10.0);
        assert_eq!(transformer.transform(&state), transformer.transform(&state));
    }
}
