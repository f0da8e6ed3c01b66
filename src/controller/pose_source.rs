use std::sync::{Arc, RwLock};

use tracing::trace;

use super::pose_receiver::PoseListener;
use crate::model::PoseSample;

/// Something that pushes pose samples to registered listeners.
///
/// Session setup and permissions are the source's business; by the time
/// samples flow they are assumed to have succeeded.
pub trait PoseSource {
    fn register(&mut self, listener: Arc<dyn PoseListener>);
}

/// In-process fan-out source. Clones share the listener list, so one clone
/// can sit on a sensor thread publishing while another is handed out for
/// registration.
#[derive(Clone, Default)]
pub struct PoseDispatcher {
    listeners: Arc<RwLock<Vec<Arc<dyn PoseListener>>>>,
}

impl PoseDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or_else(|p| p.into_inner().len())
    }

    /// Deliver one sample (or an empty payload) to every listener.
    pub fn publish(&self, sample: Option<&PoseSample>) {
        let listeners = match self.listeners.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if listeners.is_empty() {
            trace!("pose published with no listeners");
        }
        for listener in listeners.iter() {
            listener.on_pose_available(sample);
        }
    }
}

impl PoseSource for PoseDispatcher {
    fn register(&mut self, listener: Arc<dyn PoseListener>) {
        match self.listeners.write() {
            Ok(mut guard) => guard.push(listener),
            Err(poisoned) => poisoned.into_inner().push(listener),
        }
    }
}
