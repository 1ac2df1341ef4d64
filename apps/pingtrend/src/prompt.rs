use crate::cli::Cli;
use crate::paths::valid_file_name;
use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn invalid<D: Display>(&mut self, default: D) -> Result<()> {
        writeln!(self.output, "Invalid input, using default {default}.")?;
        Ok(())
    }

    /// Empty input keeps `default`; anything below `min_value` is rejected.
    pub fn ask_u32(
        &mut self,
        prompt: &str,
        default: Option<u32>,
        min_value: u32,
    ) -> Result<Option<u32>> {
        let value = self.ask(prompt)?;
        if value.is_empty() {
            return Ok(default);
        }
        match value.parse::<u32>() {
            Ok(parsed) if parsed >= min_value && value.chars().all(|c| c.is_ascii_digit()) => {
                Ok(Some(parsed))
            }
            _ => {
                self.invalid(display_opt(default))?;
                Ok(default)
            }
        }
    }

    /// Accepts only finite values above zero.
    pub fn ask_f64(&mut self, prompt: &str, default: f64) -> Result<f64> {
        let value = self.ask(prompt)?;
        if value.is_empty() {
            return Ok(default);
        }
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Ok(parsed),
            _ => {
                self.invalid(default)?;
                Ok(default)
            }
        }
    }

    pub fn ask_file_name(&mut self, prompt: &str, default: &str) -> Result<String> {
        let value = self.ask(prompt)?;
        if value.is_empty() {
            return Ok(default.to_string());
        }
        match valid_file_name(&value) {
            Some(name) => Ok(name),
            None => {
                writeln!(self.output, "Invalid filename, using default {default}.")?;
                Ok(default.to_string())
            }
        }
    }

    pub fn ask_directory(&mut self, prompt: &str, fallback: PathBuf) -> Result<PathBuf> {
        let value = self.ask(prompt)?;
        if value.is_empty() {
            return Ok(fallback);
        }
        let path = PathBuf::from(value);
        if path.is_dir() {
            Ok(path)
        } else {
            writeln!(self.output, "Directory does not exist, using default directory.")?;
            Ok(fallback)
        }
    }

    /// Fills in `cli` from answers. Returns `None` when the user leaves the
    /// host empty.
    pub fn collect(&mut self, mut cli: Cli, base_dir: PathBuf) -> Result<Option<Cli>> {
        writeln!(self.output, "For help run pingtrend -h")?;
        let target = self.ask("Enter host to ping (or Enter to exit): ")?;
        if target.is_empty() {
            writeln!(self.output, "Exiting.")?;
            return Ok(None);
        }
        cli.target = Some(target);

        cli.count = self.ask_u32("Number of packets (empty=continuous): ", None, 1)?;
        cli.timeout = self.ask_f64(
            &format!("Timeout in seconds (default {}): ", cli.timeout),
            cli.timeout,
        )?;
        let packet_size = self.ask_u32(
            &format!("Packet size bytes (default {}): ", cli.packet_size),
            Some(cli.packet_size),
            1,
        )?;
        cli.packet_size = packet_size.unwrap_or(cli.packet_size);
        cli.output = self.ask_file_name(
            &format!("Results filename (default {}): ", cli.output),
            &cli.output.clone(),
        )?;
        cli.directory = Some(self.ask_directory(
            "Directory to save (default program dir): ",
            base_dir,
        )?);
        let compare_default = cli.compare.clone().unwrap_or_else(|| cli.output.clone());
        cli.compare = Some(self.ask_file_name(
            "Comparison filename (default same): ",
            &compare_default,
        )?);

        Ok(Some(cli))
    }
}

fn display_opt(value: Option<u32>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
