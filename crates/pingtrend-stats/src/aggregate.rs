use pingtrend_model::{ProbeOutcome, RunSnapshot};

/// Running counters for one probe session.
#[derive(Debug, Default, Clone)]
pub struct StatsAggregator {
    sent: u32,
    lost: u32,
    samples: Vec<f64>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: ProbeOutcome) {
        self.sent += 1;
        match outcome {
            ProbeOutcome::Reply { latency_ms } => self.samples.push(latency_ms),
            ProbeOutcome::Timeout => self.lost += 1,
        }
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn received(&self) -> u32 {
        self.sent - self.lost
    }

    pub fn snapshot(&self, target: &str, timestamp: impl Into<String>) -> RunSnapshot {
        let sent = self.sent;
        let received = self.received();
        let (min, max, avg) = match latency_summary(&self.samples) {
            Some((min, max, avg)) => (Some(min), Some(max), Some(avg)),
            None => (None, None, None),
        };

        RunSnapshot {
            target: target.to_string(),
            timestamp: timestamp.into(),
            sent,
            received,
            loss_percent: loss_percent(sent, received),
            min,
            max,
            avg,
        }
    }
}

/// No probes sent counts as total loss.
pub fn loss_percent(sent: u32, received: u32) -> f64 {
    if sent == 0 {
        return 100.0;
    }
    100.0 * f64::from(sent - received) / f64::from(sent)
}

fn latency_summary(samples: &[f64]) -> Option<(f64, f64, f64)> {
    let first = *samples.first()?;
    let (min, max, sum) = samples
        .iter()
        .fold((first, first, 0.0), |(min, max, sum), &value| {
            (min.min(value), max.max(value), sum + value)
        });
    // rounding in the sum can push the mean a hair outside the observed range
    let avg = (sum / samples.len() as f64).clamp(min, max);
    Some((min, max, avg))
}
