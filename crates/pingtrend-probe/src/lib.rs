//! Echo probing: transport, host resolution and the checkpointed probe loop.

pub mod checkpoint;
pub mod parser;
pub mod resolve;
pub mod runner;
pub mod session;
pub mod stop;

pub use checkpoint::{Checkpoint, CheckpointSlot};
pub use parser::parse_reply_latency;
pub use resolve::resolve_host;
pub use runner::{EchoTransport, ProbeSettings, SystemPingTransport};
pub use session::{describe_outcome, now_timestamp, run_session, SessionEnd};
pub use stop::StopSignal;
