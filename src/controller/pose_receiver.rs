//! Sink for asynchronously delivered pose samples.
//!
//! The pose source may call in from any thread at any rate; the per-tick
//! update reads from the same single-slot mailbox. Position and orientation
//! are always written and read as one pair under the lock.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, trace};

use crate::model::{FramePair, PoseSample, TrackedPoseState};

/// Callback capability handed to a pose source
pub trait PoseListener: Send + Sync {
    /// `None` models an absent payload; it is logged and otherwise ignored.
    fn on_pose_available(&self, sample: Option<&PoseSample>);
}

/// Single-slot store holding only the latest accepted pose
#[derive(Debug, Clone, Default)]
pub struct PoseMailbox {
    slot: Arc<Mutex<TrackedPoseState>>,
}

impl PoseMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, state: TrackedPoseState) {
        *self.lock() = state;
    }

    pub fn latest(&self) -> TrackedPoseState {
        *self.lock()
    }

    // The slot is plain Copy data, so a writer that panicked cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, TrackedPoseState> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Accepts start-of-service → device samples and applies the tracking-loss policy
#[derive(Debug, Clone, Default)]
pub struct PoseReceiver {
    mailbox: PoseMailbox,
}

impl PoseReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mailbox(mailbox: PoseMailbox) -> Self {
        Self { mailbox }
    }

    pub fn mailbox(&self) -> &PoseMailbox {
        &self.mailbox
    }

    pub fn latest(&self) -> TrackedPoseState {
        self.mailbox.latest()
    }

    pub fn handle_sample(&self, sample: &PoseSample) {
        if sample.frame != FramePair::DEVICE_IN_SERVICE {
            trace!(frame = ?sample.frame, "ignoring pose for unrelated frame pair");
            return;
        }

        if sample.status.is_valid() {
            self.mailbox.store(TrackedPoseState::from_sample(sample));
        } else {
            // Snap back to the anchor instead of holding the last known pose.
            debug!(status = ?sample.status, timestamp = sample.timestamp, "pose not valid, resetting tracked pose");
            self.mailbox.store(TrackedPoseState::RESET);
        }
    }
}

impl PoseListener for PoseReceiver {
    fn on_pose_available(&self, sample: Option<&PoseSample>) {
        match sample {
            Some(sample) => self.handle_sample(sample),
            None => debug!("pose callback delivered no sample"),
        }
    }
}
