use glam::{Mat3, Quat, Vec3};

const DEGENERATE_EPSILON: f32 = 1e-6;

/// Rotation that maps local +Z onto `forward` and local +Y as close to `up` as possible.
///
/// A zero `forward` yields identity. When `up` is parallel to `forward` the
/// roll is undefined and the shortest arc from +Z is used instead.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    if forward.length_squared() < DEGENERATE_EPSILON {
        return Quat::IDENTITY;
    }
    let z = forward.normalize();

    let x = up.cross(z);
    if x.length_squared() < DEGENERATE_EPSILON {
        return Quat::from_rotation_arc(Vec3::Z, z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// True when two rotations describe the same orientation (q and -q are equal)
pub fn same_rotation(a: Quat, b: Quat, epsilon: f32) -> bool {
    (a.dot(b).abs() - 1.0).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_look_rotation_identity() {
        let q = look_rotation(Vec3::Z, Vec3::Y);
        assert!(same_rotation(q, Quat::IDENTITY, 1e-6), "got {q:?}");
    }

    #[test]
    fn test_look_rotation_maps_axes() {
        let forward = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = look_rotation(forward, Vec3::Y);
        assert!((q * Vec3::Z).abs_diff_eq(forward, 1e-5));
        assert!((q * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_look_rotation_down() {
        // looking straight down with +Z as up is a quarter turn about X
        let q = look_rotation(Vec3::NEG_Y, Vec3::Z);
        assert!(same_rotation(q, Quat::from_rotation_x(FRAC_PI_2), 1e-5), "got {q:?}");
    }

    #[test]
    fn test_look_rotation_orthonormalises_up() {
        let q = look_rotation(Vec3::Z, Vec3::new(0.0, 1.0, 0.7));
        assert!(same_rotation(q, Quat::IDENTITY, 1e-5), "got {q:?}");
    }

    #[test]
    fn test_look_rotation_degenerate_inputs() {
        assert_eq!(look_rotation(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);

        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!((q * Vec3::Z).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_same_rotation_ignores_sign() {
        let q = Quat::from_rotation_z(0.3);
        assert!(same_rotation(q, -q, 1e-6));
        assert!(!same_rotation(q, Quat::IDENTITY, 1e-6));
    }
}
