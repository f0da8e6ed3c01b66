use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

/// Receives the per-tick force produced by the input mapper
pub trait PhysicsBody {
    fn add_force(&mut self, force: Vec3);
}

/// Lets the caller keep stepping a body it has also handed to a controller
impl<T: PhysicsBody> PhysicsBody for Rc<RefCell<T>> {
    fn add_force(&mut self, force: Vec3) {
        self.borrow_mut().add_force(force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Accumulator(Vec3);

    impl PhysicsBody for Accumulator {
        fn add_force(&mut self, force: Vec3) {
            self.0 += force;
        }
    }

    #[test]
    fn test_shared_body_accumulates_through_handle() {
        let shared = Rc::new(RefCell::new(Accumulator::default()));
        let mut handle: Box<dyn PhysicsBody> = Box::new(shared.clone());
        handle.add_force(Vec3::X);
        handle.add_force(Vec3::Y);
        assert_eq!(shared.borrow().0, Vec3::new(1.0, 1.0, 0.0));
    }
}
