use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod rigid_body;

use glam::{Quat, Vec2, Vec3};
use tracing::{error, info};

// Import from the library crate
use posebridge::{logging, controller, model};
use posebridge::ControllerConfig;

use controller::{PoseController, PoseDispatcher, TouchEvent, TouchState};
use rigid_body::RigidBody;
use model::{CoordinateFrame, FramePair, PoseSample, PoseStatus};

const TICK_RATE: f32 = 60.0;
const SENSOR_RATE: f32 = 100.0;
const DEMO_SECONDS: f32 = 6.0;

/// Stand-in for a tracking service: walks the device around a circle while
/// holding it upright, drops tracking for a moment, and sprinkles in samples
/// the controller is expected to ignore.
fn spawn_sensor(dispatcher: PoseDispatcher, running: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let started = Instant::now();
        let period = Duration::from_secs_f32(1.0 / SENSOR_RATE);
        let upright = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);

        while running.load(Ordering::Relaxed) {
            let t = started.elapsed().as_secs_f64();
            let angle = t * 0.8;
            let heading = Quat::from_rotation_z(angle as f32) * upright;

            let status = if (2.0..2.5).contains(&t) { PoseStatus::Invalid } else { PoseStatus::Valid };
            let sample = PoseSample::new(
                FramePair::DEVICE_IN_SERVICE,
                [0.5 * angle.cos(), 0.5 * angle.sin(), 0.05 * (t * 3.0).sin()],
                [heading.x as f64, heading.y as f64, heading.z as f64, heading.w as f64],
                status,
            )
            .with_timestamp(t);
            dispatcher.publish(Some(&sample));

            // unrelated frame pair, must not move the object
            let imu = PoseSample::new(
                FramePair::new(CoordinateFrame::Imu, CoordinateFrame::Device),
                [9.0, 9.0, 9.0],
                [0.0, 0.0, 0.0, 1.0],
                PoseStatus::Valid,
            );
            dispatcher.publish(Some(&imu));

            thread::sleep(period);
        }
        dispatcher.publish(None);
    })
}

/// Scripted finger: a drag early on, a tap later
fn scripted_touch(frame: u32, touches: &mut TouchState) {
    match frame {
        60 => touches.process_event(&TouchEvent::Start { id: 1, position: Vec2::new(200.0, 400.0) }),
        61..=90 => {
            let step = (frame - 60) as f32;
            touches.process_event(&TouchEvent::Move { id: 1, position: Vec2::new(200.0 + step * 4.0, 400.0 - step * 2.0) });
        }
        91 => touches.process_event(&TouchEvent::End { id: 1, position: Vec2::new(320.0, 340.0) }),
        240 => touches.process_event(&TouchEvent::Start { id: 2, position: Vec2::new(100.0, 100.0) }),
        242 => touches.process_event(&TouchEvent::End { id: 2, position: Vec2::new(101.0, 100.0) }),
        _ => {}
    }
}

fn main() -> ExitCode {
    logging::init();

    let config = match ControllerConfig::touch_driven().with_env_overrides() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let start = Vec3::new(0.0, 1.0, 0.0);
    let mut dispatcher = PoseDispatcher::new();
    let body = Rc::new(RefCell::new(RigidBody::new(start)));
    let touches = Rc::new(RefCell::new(TouchState::new()));

    let mut pose_controller = match PoseController::new(config, start, Some(&mut dispatcher)) {
        Ok(c) => c
            .with_body(Box::new(body.clone()))
            .with_input(Box::new(touches.clone())),
        Err(e) => {
            error!("failed to create pose controller: {e}");
            return ExitCode::FAILURE;
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    let sensor = spawn_sensor(dispatcher.clone(), running.clone());

    let dt = 1.0 / TICK_RATE;
    let frames = (DEMO_SECONDS * TICK_RATE) as u32;
    for frame in 0..frames {
        let frame_start = Instant::now();

        scripted_touch(frame, &mut touches.borrow_mut());
        let out = pose_controller.update();
        body.borrow_mut().step(dt);
        touches.borrow_mut().end_frame();

        if frame % 30 == 0 || out.force.is_some_and(|f| f != Vec3::ZERO) {
            let rb = body.borrow();
            info!(
                frame,
                position = ?out.transform.position,
                forward = ?out.transform.forward(),
                force = ?out.force,
                body = ?rb.position,
                grounded = rb.on_ground(),
                "tick"
            );
        }

        if let Some(rest) = Duration::from_secs_f32(dt).checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    running.store(false, Ordering::Relaxed);
    if sensor.join().is_err() {
        error!("sensor thread panicked");
        return ExitCode::FAILURE;
    }

    info!(final_position = ?pose_controller.transform().position, "demo finished");
    ExitCode::SUCCESS
}
