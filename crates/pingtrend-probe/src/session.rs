use crate::checkpoint::Checkpoint;
use crate::runner::{EchoTransport, ProbeSettings};
use crate::stop::StopSignal;
use anyhow::Result;
use chrono::{Local, SecondsFormat};
use log::debug;
use pingtrend_model::{ProbeOutcome, RunSnapshot};
use pingtrend_stats::StatsAggregator;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// The requested number of probes was sent.
    Completed(RunSnapshot),
    /// A stop was requested; the checkpoint holds whatever was collected.
    Interrupted,
}

/// Runs probes against `address` until `settings.count` is reached or `stop`
/// fires, refreshing `checkpoint` after every probe.
///
/// A probe that is in flight when the stop arrives is discarded. Transport
/// errors end the session with `Err`; the checkpoint still holds the last
/// complete snapshot.
pub fn run_session<T, F>(
    transport: &T,
    address: IpAddr,
    settings: &ProbeSettings,
    checkpoint: &Checkpoint,
    stop: &StopSignal,
    mut on_probe: F,
) -> Result<SessionEnd>
where
    T: EchoTransport + ?Sized,
    F: FnMut(&ProbeOutcome),
{
    let target = address.to_string();
    let mut stats = StatsAggregator::new();

    while settings.count.map_or(true, |count| stats.sent() < count) {
        if stop.is_triggered() {
            return Ok(SessionEnd::Interrupted);
        }

        let result = transport.probe(address, settings.timeout, settings.packet_size);
        if stop.is_triggered() {
            debug!("discarding probe {} in flight at stop", stats.sent() + 1);
            return Ok(SessionEnd::Interrupted);
        }

        let outcome = result?;
        stats.record(outcome);
        checkpoint.update(stats.snapshot(&target, now_timestamp()));
        on_probe(&outcome);

        let more = settings.count.map_or(true, |count| stats.sent() < count);
        if more && stop.wait_timeout(settings.interval) {
            return Ok(SessionEnd::Interrupted);
        }
    }

    let snapshot = stats.snapshot(&target, now_timestamp());
    checkpoint.update(snapshot.clone());
    Ok(SessionEnd::Completed(snapshot))
}

pub fn describe_outcome(address: IpAddr, outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Reply { latency_ms } => {
            format!("Reply from {address}: time={latency_ms:.2}ms")
        }
        ProbeOutcome::Timeout => "Request timed out.".to_string(),
    }
}

pub fn now_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_reply_and_timeout() {
        let address: IpAddr = "192.0.2.1".parse().unwrap();
        assert_eq!(
            describe_outcome(address, &ProbeOutcome::Reply { latency_ms: 12.346 }),
            "Reply from 192.0.2.1: time=12.35ms"
        );
        assert_eq!(
            describe_outcome(address, &ProbeOutcome::Timeout),
            "Request timed out."
        );
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let stamp = now_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
