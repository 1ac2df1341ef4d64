mod cli;
mod paths;
mod prompt;
mod report;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::Cli;
use log::{info, warn};
use paths::history_paths;
use pingtrend_model::RunSnapshot;
use pingtrend_probe::{
    describe_outcome, resolve_host, run_session, Checkpoint, ProbeSettings, SessionEnd,
    StopSignal, SystemPingTransport,
};
use prompt::Prompter;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut cli = Cli::parse();

    if cli.target.is_none() {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        cli = match prompter.collect(cli, paths::base_dir())? {
            Some(cli) => cli,
            None => return Ok(ExitCode::SUCCESS),
        };
    }

    let target = cli.target.clone().unwrap_or_default();
    let settings = ProbeSettings {
        count: cli.count,
        timeout: Duration::try_from_secs_f64(cli.timeout)
            .ok()
            .filter(|timeout| !timeout.is_zero())
            .ok_or_else(|| anyhow!("timeout must be a positive number of seconds"))?,
        packet_size: cli.packet_size,
        ..ProbeSettings::default()
    };

    let address =
        resolve_host(&target).with_context(|| format!("Error resolving host {target}."))?;
    info!("resolved {target} to {address}");

    let directory = cli.directory.clone().unwrap_or_else(paths::base_dir);
    let files = history_paths(&directory, &cli.output, cli.compare.as_deref());
    let history = pingtrend_history::load(&files.compare, &address.to_string());
    info!(
        "loaded {} previous runs from {:?}",
        history.len(),
        files.compare
    );

    let checkpoint = Checkpoint::new();
    checkpoint.configure(files.output, history);

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.trigger())
        .context("failed to install Ctrl-C handler")?;

    println!(
        "PING {} ({}) {} bytes of data.",
        target, address, settings.packet_size
    );

    let ended = run_session(
        &SystemPingTransport,
        address,
        &settings,
        &checkpoint,
        &stop,
        |outcome| println!("{}", describe_outcome(address, outcome)),
    );

    match ended {
        Ok(SessionEnd::Completed(snapshot)) => {
            println!("\nFinal results:");
            finish_run(&snapshot, &checkpoint)?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionEnd::Interrupted) => {
            if let Some(snapshot) = checkpoint.read() {
                println!("\nInterrupted by user. Saving results...");
                finish_run(&snapshot, &checkpoint)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("\nError during pinging: {err:#}");
            match checkpoint.read() {
                Some(snapshot) => {
                    println!("\nAttempting to save partial results due to error...");
                    if let Err(save_err) = finish_run(&snapshot, &checkpoint) {
                        eprintln!("error: {save_err:#}");
                    }
                }
                None => println!("No stats collected; nothing to save."),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Saves `snapshot`, then shows the comparison and the run summary. The
/// report is printed even when the save fails.
fn finish_run(snapshot: &RunSnapshot, checkpoint: &Checkpoint) -> Result<()> {
    let output_path = checkpoint.output_path();
    let saved = save_results(snapshot, &output_path);

    print!("{}", report::render_comparison(snapshot, &checkpoint.history()));
    print!("{}", report::render_current(snapshot));

    saved
}

fn save_results(snapshot: &RunSnapshot, path: &Path) -> Result<()> {
    match pingtrend_history::append(snapshot, path) {
        Ok(()) => {
            println!("Results saved to {}", path.display());
            Ok(())
        }
        Err(err) => {
            warn!("could not save results to {:?}: {:#}", path, err);
            Err(err.context(format!("failed to save results to {}", path.display())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingtrend_model::ProbeOutcome;
    use pingtrend_probe::EchoTransport;
    use std::cell::Cell;
    use std::net::IpAddr;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Replies to the first three probes, then behaves like Ctrl-C mid-probe.
    struct InterruptAfterThree {
        calls: Cell<u32>,
        stop: StopSignal,
    }

    impl EchoTransport for InterruptAfterThree {
        fn probe(&self, _: IpAddr, _: Duration, _: u32) -> Result<ProbeOutcome> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() > 3 {
                self.stop.trigger();
                return Err(anyhow!("interrupted"));
            }
            Ok(ProbeOutcome::Reply {
                latency_ms: f64::from(self.calls.get()),
            })
        }
    }

    #[test]
    fn interrupted_run_saves_exactly_one_entry() {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("pingtrend-app-{}-{}", std::process::id(), stamp));
        let files = history_paths(&dir, "runs", None);
        let address: IpAddr = "192.0.2.1".parse().unwrap();

        let checkpoint = Checkpoint::new();
        checkpoint.configure(files.output.clone(), Vec::new());
        let stop = StopSignal::new();
        let transport = InterruptAfterThree {
            calls: Cell::new(0),
            stop: stop.clone(),
        };
        let settings = ProbeSettings {
            count: Some(5),
            interval: Duration::ZERO,
            ..ProbeSettings::default()
        };

        let ended = run_session(&transport, address, &settings, &checkpoint, &stop, |_| {}).unwrap();
        assert_eq!(ended, SessionEnd::Interrupted);

        let snapshot = checkpoint.read().unwrap();
        finish_run(&snapshot, &checkpoint).unwrap();

        let saved = pingtrend_history::load_all(&files.output);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].sent, 3);
        assert_eq!(saved[0].target, "192.0.2.1");

        let history = pingtrend_history::load(&files.output, "192.0.2.1");
        assert_eq!(history.len(), 1);
    }
}
