use crate::parser::parse_reply_latency;
use anyhow::{anyhow, Context, Result};
use log::debug;
use pingtrend_model::ProbeOutcome;
use std::net::IpAddr;
use std::process::{Command, Output};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Number of probes to send; `None` runs until interrupted.
    pub count: Option<u32>,
    pub timeout: Duration,
    pub packet_size: u32,
    pub interval: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            count: None,
            timeout: Duration::from_secs(4),
            packet_size: 56,
            interval: Duration::from_secs(1),
        }
    }
}

/// Sends a single echo request and waits for the reply or the timeout.
pub trait EchoTransport {
    fn probe(&self, address: IpAddr, timeout: Duration, packet_size: u32) -> Result<ProbeOutcome>;
}

/// Transport backed by the platform `ping` utility, one process per probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPingTransport;

impl EchoTransport for SystemPingTransport {
    fn probe(&self, address: IpAddr, timeout: Duration, packet_size: u32) -> Result<ProbeOutcome> {
        let args = ping_args(address, timeout, packet_size);
        debug!("running ping {}", args.join(" "));

        let output = isolated_command("ping", &args)
            .output()
            .with_context(|| format!("failed to spawn ping for {address}"))?;

        classify_output(address, &output)
    }
}

/// The child gets its own process group so a terminal Ctrl-C reaches only
/// us; an in-flight probe then finishes or times out on its own.
fn isolated_command(program: &str, args: &[String]) -> Command {
    let mut command = Command::new(program);
    command.args(args);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command
}

fn classify_output(address: IpAddr, output: &Output) -> Result<ProbeOutcome> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if let Some(latency_ms) = parse_reply_latency(&stdout) {
        return Ok(ProbeOutcome::Reply { latency_ms });
    }

    if output.status.success() || output.status.code() == Some(NO_REPLY_STATUS) {
        return Ok(ProbeOutcome::Timeout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(anyhow!(
        "ping failed for {address} (status: {}): {}{}",
        output.status,
        stderr.trim(),
        stdout.trim()
    ))
}

#[cfg(target_os = "macos")]
const NO_REPLY_STATUS: i32 = 2;
#[cfg(not(target_os = "macos"))]
const NO_REPLY_STATUS: i32 = 1;

fn timeout_secs(timeout: Duration) -> u64 {
    let millis = timeout.as_millis() as u64;
    ((millis + 999) / 1000).max(1)
}

fn ping_args(address: IpAddr, timeout: Duration, packet_size: u32) -> Vec<String> {
    if cfg!(target_os = "windows") {
        vec![
            "-n".to_string(),
            "1".to_string(),
            "-w".to_string(),
            timeout.as_millis().max(1).to_string(),
            "-l".to_string(),
            packet_size.to_string(),
            address.to_string(),
        ]
    } else {
        let timeout_flag = if cfg!(target_os = "macos") { "-t" } else { "-W" };
        vec![
            "-n".to_string(),
            "-c".to_string(),
            "1".to_string(),
            timeout_flag.to_string(),
            timeout_secs(timeout).to_string(),
            "-s".to_string(),
            packet_size.to_string(),
            address.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_rounds_up_to_whole_seconds() {
        assert_eq!(timeout_secs(Duration::from_millis(4000)), 4);
        assert_eq!(timeout_secs(Duration::from_millis(2500)), 3);
        assert_eq!(timeout_secs(Duration::from_millis(10)), 1);
        assert_eq!(timeout_secs(Duration::ZERO), 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_args_request_one_probe() {
        let address: IpAddr = "192.0.2.1".parse().unwrap();
        let args = ping_args(address, Duration::from_secs_f64(1.5), 120);
        assert_eq!(
            args,
            vec!["-n", "-c", "1", "-W", "2", "-s", "120", "192.0.2.1"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn child_leads_its_own_process_group() {
        let script = r#"[ "$(ps -o pgid= -p $$ | tr -d ' ')" = "$$" ]"#;
        let status = isolated_command("sh", &["-c".to_string(), script.to_string()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn classify_reply_and_silence() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        let address: IpAddr = "192.0.2.1".parse().unwrap();

        let reply = Output {
            status: ExitStatus::from_raw(0),
            stdout: b"64 bytes from 192.0.2.1: icmp_seq=1 ttl=57 time=3.25 ms\n".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(
            classify_output(address, &reply).unwrap(),
            ProbeOutcome::Reply { latency_ms: 3.25 }
        );

        // wait status encoding: exit code lives in the high byte
        let silent = Output {
            status: ExitStatus::from_raw(NO_REPLY_STATUS << 8),
            stdout: b"1 packets transmitted, 0 received, 100% packet loss\n".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(classify_output(address, &silent).unwrap(), ProbeOutcome::Timeout);

        let broken = Output {
            status: ExitStatus::from_raw(68 << 8),
            stdout: Vec::new(),
            stderr: b"ping: sendmsg: Operation not permitted\n".to_vec(),
        };
        let err = classify_output(address, &broken).unwrap_err();
        assert!(err.to_string().contains("Operation not permitted"));
    }
}
