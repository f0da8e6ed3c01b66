//! Platform-agnostic touch handling and touch-to-force mapping
use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};
use tracing::debug;

use crate::config::ForceConfig;

/// Max travel (screen pixels) for a press to still count as a tap
pub const TAP_SLOP: f32 = 10.0;
/// Max frames a press may last and still count as a tap
pub const TAP_MAX_FRAMES: u32 = 15;
/// Max frames between consecutive taps for them to chain into a multi-tap
pub const MULTI_TAP_FRAMES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

/// One contact as seen during the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: Vec2,
    /// Movement since the previous frame, in screen pixels
    pub delta: Vec2,
    pub tap_count: u32,
}

impl Touch {
    pub fn moved(delta: Vec2) -> Self {
        Self {
            id: 0,
            phase: TouchPhase::Moved,
            position: Vec2::ZERO,
            delta,
            tap_count: 0,
        }
    }

    pub fn tap() -> Self {
        Self {
            id: 0,
            phase: TouchPhase::Ended,
            position: Vec2::ZERO,
            delta: Vec2::ZERO,
            tap_count: 1,
        }
    }
}

/// Active touches for one tick, in the order they began
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchSnapshot {
    pub touches: Vec<Touch>,
}

impl TouchSnapshot {
    pub fn new(touches: Vec<Touch>) -> Self {
        Self { touches }
    }

    pub fn single(touch: Touch) -> Self {
        Self::new(vec![touch])
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }
}

/// Queried once per tick for the current touch state
pub trait InputSource {
    fn snapshot(&self) -> TouchSnapshot;
}

impl InputSource for TouchSnapshot {
    fn snapshot(&self) -> TouchSnapshot {
        self.clone()
    }
}

impl<T: InputSource> InputSource for Rc<RefCell<T>> {
    fn snapshot(&self) -> TouchSnapshot {
        self.borrow().snapshot()
    }
}

/// Platform-independent touch events
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    Start { id: u64, position: Vec2 },
    Move { id: u64, position: Vec2 },
    End { id: u64, position: Vec2 },
    Cancel { id: u64 },
    FocusLost,
}

#[derive(Debug, Clone)]
struct ActiveTouch {
    id: u64,
    phase: TouchPhase,
    origin: Vec2,
    position: Vec2,
    delta: Vec2,
    frames_alive: u32,
    tap_count: u32,
}

impl ActiveTouch {
    fn is_live(&self) -> bool {
        !matches!(self.phase, TouchPhase::Ended | TouchPhase::Canceled)
    }
}

/// Accumulates platform touch events between ticks
#[derive(Debug, Default)]
pub struct TouchState {
    touches: Vec<ActiveTouch>,
    // position and age in frames of the most recent completed tap, with its count
    last_tap: Option<(Vec2, u32, u32)>,
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &TouchEvent) {
        match *event {
            TouchEvent::Start { id, position } => {
                self.touches.retain(|t| t.id != id);
                self.touches.push(ActiveTouch {
                    id,
                    phase: TouchPhase::Began,
                    origin: position,
                    position,
                    delta: Vec2::ZERO,
                    frames_alive: 0,
                    tap_count: 0,
                });
            }
            TouchEvent::Move { id, position } => {
                if let Some(touch) = self.find_live_mut(id) {
                    touch.delta += position - touch.position;
                    touch.position = position;
                    if touch.phase != TouchPhase::Began || touch.delta != Vec2::ZERO {
                        touch.phase = TouchPhase::Moved;
                    }
                }
            }
            TouchEvent::End { id, position } => {
                let Some(index) = self.touches.iter().position(|t| t.id == id && t.is_live()) else {
                    return;
                };
                let touch = &mut self.touches[index];
                touch.delta += position - touch.position;
                touch.position = position;
                touch.phase = TouchPhase::Ended;

                if touch.frames_alive <= TAP_MAX_FRAMES && touch.origin.distance(position) <= TAP_SLOP {
                    let count = match self.last_tap {
                        Some((at, age, count))
                            if age <= MULTI_TAP_FRAMES && at.distance(position) <= TAP_SLOP =>
                        {
                            count + 1
                        }
                        _ => 1,
                    };
                    touch.tap_count = count;
                    self.last_tap = Some((position, 0, count));
                }
            }
            TouchEvent::Cancel { id } => {
                if let Some(touch) = self.find_live_mut(id) {
                    touch.phase = TouchPhase::Canceled;
                    touch.delta = Vec2::ZERO;
                }
            }
            TouchEvent::FocusLost => {
                self.clear();
            }
        }
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn clear(&mut self) {
        self.touches.clear();
        self.last_tap = None;
    }

    /// Advance to the next frame: drop finished touches and zero the deltas.
    pub fn end_frame(&mut self) {
        self.touches.retain(ActiveTouch::is_live);
        for touch in &mut self.touches {
            touch.delta = Vec2::ZERO;
            touch.phase = TouchPhase::Stationary;
            touch.frames_alive = touch.frames_alive.saturating_add(1);
        }
        self.last_tap = self
            .last_tap
            .map(|(at, age, count)| (at, age + 1, count))
            .filter(|&(_, age, _)| age <= MULTI_TAP_FRAMES);
    }

    // Ended and canceled touches only wait for end_frame to drop them
    fn find_live_mut(&mut self, id: u64) -> Option<&mut ActiveTouch> {
        self.touches.iter_mut().find(|t| t.id == id && t.is_live())
    }
}

impl InputSource for TouchState {
    fn snapshot(&self) -> TouchSnapshot {
        TouchSnapshot::new(
            self.touches
                .iter()
                .map(|t| Touch {
                    id: t.id,
                    phase: t.phase,
                    position: t.position,
                    delta: t.delta,
                    tap_count: t.tap_count,
                })
                .collect(),
        )
    }
}

/// Turns a touch snapshot into a world-space force for the tracked body.
///
/// A single dragging finger pushes along the object's facing (screen x to
/// local X, screen y to local Z); a single tap jumps straight up.
#[derive(Debug, Clone, Copy)]
pub struct InputForceMapper {
    speed: f32,
    jump: f32,
}

impl InputForceMapper {
    pub fn new(config: ForceConfig) -> Self {
        Self {
            speed: config.speed,
            jump: config.jump,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn jump(&self) -> f32 {
        self.jump
    }

    /// Mapped vector before `speed` is applied.
    pub fn direction(&self, input: &TouchSnapshot, rotation: Quat) -> Vec3 {
        match input.touches.as_slice() {
            [touch] if touch.phase == TouchPhase::Moved => {
                let local = Vec3::new(touch.delta.x, 0.0, touch.delta.y);
                rotation * local
            }
            [touch] if touch.tap_count == 1 => {
                debug!("jump");
                Vec3::new(0.0, self.jump, 0.0)
            }
            _ => Vec3::ZERO,
        }
    }

    pub fn force(&self, input: &TouchSnapshot, rotation: Quat) -> Vec3 {
        self.direction(input, rotation) * self.speed
    }
}
