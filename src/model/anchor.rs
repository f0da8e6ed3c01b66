use glam::Vec3;

/// World-space origin and scale that tracked motion is applied against.
///
/// Captured once from the object's initial position; tracked offsets are
/// scaled by `movement_scale` and then added to `start_position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorState {
    start_position: Vec3,
    movement_scale: f32,
}

impl AnchorState {
    pub fn new(start_position: Vec3, movement_scale: f32) -> Self {
        Self {
            start_position,
            movement_scale,
        }
    }

    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    pub fn movement_scale(&self) -> f32 {
        self.movement_scale
    }

    /// Scale a raw world-frame offset and place it relative to the anchor.
    pub fn place(&self, offset: Vec3) -> Vec3 {
        offset * self.movement_scale + self.start_position
    }
}
