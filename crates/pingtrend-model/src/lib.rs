//! Shared data structures for pingtrend.

use serde::{Deserialize, Serialize};

/// Result of a single echo probe. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeOutcome {
    Reply { latency_ms: f64 },
    Timeout,
}

/// Aggregate statistics for one run against one resolved address.
///
/// This is also the shape of every element in the history file, so field
/// names are part of the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSnapshot {
    pub target: String,
    pub timestamp: String,
    pub sent: u32,
    pub received: u32,
    pub loss_percent: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl RunSnapshot {
    pub fn lost(&self) -> u32 {
        self.sent.saturating_sub(self.received)
    }

    pub fn has_latency(&self) -> bool {
        self.min.is_some() && self.max.is_some() && self.avg.is_some()
    }
}
