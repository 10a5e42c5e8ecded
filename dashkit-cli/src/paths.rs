//! Where dashkit keeps its config file and logs.
//!
//! `None` everywhere means the platform has no home directory to offer.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";

/// `chrono` format of an archived log's file name.
const ARCHIVE_FORMAT: &str = "%Y-%m-%dT%H-%M-%S.log";

/// Archived runs kept next to `latest.log`.
const KEEP_ARCHIVED_LOGS: usize = 25;

fn dashkit_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "dashkit", "dashkit")
}

/// e.g. `~/.cache/dashkit` on Linux.
pub fn cache_dir() -> Option<PathBuf> {
    Some(dashkit_dirs()?.cache_dir().to_owned())
}

/// e.g. `~/.config/dashkit/config.toml` on Linux.
pub fn config_file() -> Option<PathBuf> {
    Some(dashkit_dirs()?.config_dir().join("config.toml"))
}

pub fn log_file() -> Option<PathBuf> {
    Some(cache_dir()?.join(LATEST_LOG))
}

/// Archive the previous `latest.log` under a timestamped name and prune old
/// archives. Call once at startup, before the new log file is created.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let archived = chrono::Local::now().format(ARCHIVE_FORMAT).to_string();
        if let Err(e) = fs::rename(&latest, dir.join(archived)) {
            eprintln!("Could not archive {}: {e}", latest.display());
        }
    }
    prune_old_logs(dir, KEEP_ARCHIVED_LOGS);
}

/// Keep the `keep` most recently modified archives.
fn prune_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut archives: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            let file_name = entry.file_name();
            file_name != LATEST_LOG
                && Path::new(&file_name).extension().is_some_and(|ext| ext == "log")
        })
        .collect();
    if archives.len() <= keep {
        return;
    }

    // Oldest first.
    archives.sort_by_key(|entry| entry.metadata().and_then(|m| m.modified()).ok());
    let surplus = archives.len() - keep;
    for entry in archives.into_iter().take(surplus) {
        if let Err(e) = fs::remove_file(entry.path()) {
            eprintln!("Could not remove {}: {e}", entry.path().display());
        }
    }
}
