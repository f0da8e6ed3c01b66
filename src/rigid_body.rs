use glam::Vec3;

use posebridge::controller::PhysicsBody;

/// Minimal point-mass body (gravity, ground plane, fall-speed clamp).
///
/// Forces added during a tick are accumulated and consumed by [`RigidBody::step`].
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub ground_height: f32,
    pending_force: Vec3,
}

impl RigidBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass: 1.0,
            gravity: -9.8,
            max_fall_speed: 20.0,
            ground_height: 0.0,
            pending_force: Vec3::ZERO,
        }
    }

    #[cfg(test)]
    fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn on_ground(&self) -> bool {
        self.position.y <= self.ground_height
    }

    /// Integrate accumulated force plus gravity over `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let accel = self.pending_force / self.mass.max(f32::EPSILON) + Vec3::new(0.0, self.gravity, 0.0);
        self.pending_force = Vec3::ZERO;

        self.velocity += accel * dt;
        self.velocity.y = self.velocity.y.max(-self.max_fall_speed);
        self.position += self.velocity * dt;

        // Ground collision
        if self.position.y < self.ground_height {
            self.position.y = self.ground_height;
            self.velocity.y = self.velocity.y.max(0.0);
        }
    }
}

impl PhysicsBody for RigidBody {
    fn add_force(&mut self, force: Vec3) {
        self.pending_force += force;
    }
}
