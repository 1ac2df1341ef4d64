use std::path::{Path, PathBuf};

/// Directory next to the running executable, or the working directory.
pub fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn with_json_suffix(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    }
}

/// Checks a user-typed file name. Names with path separators or NUL bytes
/// are rejected.
pub fn valid_file_name(name: &str) -> Option<String> {
    if name.contains('/') || name.contains('\0') {
        return None;
    }
    Some(with_json_suffix(name))
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPaths {
    pub output: PathBuf,
    pub compare: PathBuf,
}

pub fn history_paths(directory: &Path, output: &str, compare: Option<&str>) -> HistoryPaths {
    let output = with_json_suffix(output);
    let compare = compare
        .map(with_json_suffix)
        .unwrap_or_else(|| output.clone());

    HistoryPaths {
        output: directory.join(output),
        compare: directory.join(compare),
    }
}
