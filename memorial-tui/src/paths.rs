//! Where the console keeps its files.
//!
//! Databases live in the platform data directory, logs in the cache
//! directory (XDG on Linux, the usual locations on macOS and Windows).

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Archived logs kept next to `latest.log`.
const KEEP_ARCHIVED_LOGS: usize = 25;

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "console-";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "memorial", "memorial-admin")
}

/// `~/.local/share/memorial-admin` on Linux.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

pub fn tokens_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("tokens.db"))
}

/// Log of the current run, in the cache directory.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join(LATEST_LOG))
}

/// Archives the previous run's log and prunes old archives.
///
/// Must run before the logger opens `latest.log`.
pub fn rotate_logs() {
    if let Some(dirs) = project_dirs() {
        rotate_logs_in(dirs.cache_dir(), KEEP_ARCHIVED_LOGS);
    }
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let archived = dir.join(format!("{}{}.log", ARCHIVE_PREFIX, stamp));
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("Failed to archive {}: {}", latest.display(), e);
        }
    }

    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    // Archive names embed the timestamp, so name order is age order.
    let mut archives: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotate_archives_latest_and_prunes_oldest() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=4 {
            fs::write(dir.path().join(format!("console-2020010{}-000000.log", day)), "old").unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "last run").unwrap();
        fs::write(dir.path().join("notes.log"), "").unwrap();

        rotate_logs_in(dir.path(), 2);

        let names = names(dir.path());
        assert!(!names.contains(&LATEST_LOG.to_string()));
        // The oldest fixtures go; the fresh archive sorts after them.
        assert!(!names.contains(&"console-20200101-000000.log".to_string()));
        assert!(names.contains(&"console-20200104-000000.log".to_string()));
        assert_eq!(names.iter().filter(|n| n.starts_with(ARCHIVE_PREFIX)).count(), 2);
        assert!(names.contains(&"notes.log".to_string()));
    }

    #[test]
    fn test_rotate_without_previous_log() {
        let dir = tempfile::tempdir().unwrap();
        rotate_logs_in(dir.path(), 25);
        assert!(names(dir.path()).is_empty());
    }

    #[test]
    fn test_databases_share_data_dir() {
        if let (Some(settings), Some(tokens)) = (settings_db(), tokens_db()) {
            assert_eq!(settings.parent(), tokens.parent());
        }
    }
}
