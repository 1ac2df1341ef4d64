use pingtrend_model::RunSnapshot;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct CheckpointSlot {
    pub latest_snapshot: Option<RunSnapshot>,
    pub output_path: PathBuf,
    pub history: Vec<RunSnapshot>,
}

/// Shared handle to the most recent run snapshot.
///
/// The probe session is the only writer; the finish path reads it once the
/// session has returned (or been interrupted). Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct Checkpoint {
    slot: Arc<Mutex<CheckpointSlot>>,
}

impl Checkpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&self, output_path: PathBuf, history: Vec<RunSnapshot>) {
        let mut slot = self.lock();
        slot.output_path = output_path;
        slot.history = history;
    }

    /// Last write wins.
    pub fn update(&self, snapshot: RunSnapshot) {
        self.lock().latest_snapshot = Some(snapshot);
    }

    pub fn read(&self) -> Option<RunSnapshot> {
        self.lock().latest_snapshot.clone()
    }

    pub fn output_path(&self) -> PathBuf {
        self.lock().output_path.clone()
    }

    pub fn history(&self) -> Vec<RunSnapshot> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, CheckpointSlot> {
        // a panicked writer still leaves a whole snapshot behind
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
