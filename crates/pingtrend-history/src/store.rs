use anyhow::{anyhow, Result};
use log::debug;
use pingtrend_model::RunSnapshot;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Loads the history entries recorded for `target`, oldest first.
///
/// A missing or unparseable file is treated as "no history" rather than an
/// error, and entries that do not look like a run snapshot are skipped.
pub fn load(path: &Path, target: &str) -> Vec<RunSnapshot> {
    load_all(path)
        .into_iter()
        .filter(|entry| entry.target == target)
        .collect()
}

/// Loads every snapshot in the file regardless of target.
pub fn load_all(path: &Path) -> Vec<RunSnapshot> {
    read_entries(path)
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                debug!("skipping history entry in {:?}: {}", path, err);
                None
            }
        })
        .collect()
}

/// Appends `snapshot` to the history file, rewriting the whole list.
///
/// Existing entries are written back untouched, including ones this tool
/// cannot read.
pub fn append(snapshot: &RunSnapshot, path: &Path) -> Result<()> {
    let mut entries = read_entries(path);
    entries.push(serde_json::to_value(snapshot)?);
    replace_history(path, &entries)
}

fn read_entries(path: &Path) -> Vec<Value> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!("no history at {:?}: {}", path, err);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Array(entries)) => entries,
        Ok(single) => vec![single],
        Err(err) => {
            debug!("ignoring malformed history {:?}: {}", path, err);
            Vec::new()
        }
    }
}

/// Swaps in the new history list via a staging file in the same directory, so
/// a crash mid-save leaves either the old list or the new one.
fn replace_history(path: &Path, entries: &[Value]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|err| anyhow!("failed to create history directory {:?}: {}", dir, err))?;

    let json = serde_json::to_vec_pretty(entries)?;
    let staging = staging_path(path);
    if let Err(err) = write_synced(&staging, &json) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(anyhow!("failed to replace history {:?}: {}", path, err));
    }

    // the rename is only durable once the directory entry is flushed
    if let Ok(handle) = fs::File::open(dir) {
        let _ = handle.sync_all();
    }
    debug!("saved {} history entries to {:?}", entries.len(), path);
    Ok(())
}

fn write_synced(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)
        .map_err(|err| anyhow!("failed to create {:?}: {}", path, err))?;
    file.write_all(data)
        .and_then(|()| file.sync_all())
        .map_err(|err| anyhow!("failed to write {:?}: {}", path, err))
}

/// `ping_history.json` stages as `ping_history.json.<pid>.saving`.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ping_history.json".to_string());
    path.with_file_name(format!("{}.{}.saving", name, std::process::id()))
}
