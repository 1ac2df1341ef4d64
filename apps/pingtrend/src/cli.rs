use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "ping_history.json";
pub const DEFAULT_TIMEOUT_SECS: f64 = 4.0;
pub const DEFAULT_PACKET_SIZE: u32 = 56;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pingtrend",
    version,
    about = "Ping a host, keep a history of runs and compare against previous results"
)]
pub struct Cli {
    /// Host name or IP address. Prompts interactively when omitted.
    pub target: Option<String>,

    /// Packets to send (runs until Ctrl-C when omitted)
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Timeout per ping in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Echo payload size in bytes
    #[arg(short = 's', long, default_value_t = DEFAULT_PACKET_SIZE)]
    pub packet_size: u32,

    /// History file to append results to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Directory holding the history files
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// History file to compare against (defaults to the output file)
    #[arg(short = 'C', long)]
    pub compare: Option<String>,
}
