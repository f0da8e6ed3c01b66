use glam::{Mat4, Quat, Vec3};

/// Render-frame placement of the tracked object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl ObjectTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Rotate a local-space direction into world space (ignores position).
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }

    pub fn forward(&self) -> Vec3 {
        self.transform_direction(Vec3::Z)
    }

    pub fn up(&self) -> Vec3 {
        self.transform_direction(Vec3::Y)
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn to_uniform(&self) -> TransformUniform {
        TransformUniform {
            transform: self.to_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Model matrix laid out for direct upload into a uniform buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub transform: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_direction_ignores_position() {
        let t = ObjectTransform::new(Vec3::new(100.0, 5.0, 3.0), Quat::from_rotation_y(FRAC_PI_2));
        let dir = t.transform_direction(Vec3::Z);
        assert!(dir.abs_diff_eq(Vec3::X, 1e-6), "got {dir:?}");
    }

    #[test]
    fn test_uniform_bytes_match_matrix() {
        let t = ObjectTransform::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let uniform = t.to_uniform();
        let bytes = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), 64);
        // translation lives in the last column
        assert_eq!(uniform.transform[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
