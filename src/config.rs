use crate::storage::{DEFAULT_DATA_DIR, DEFAULT_DATA_FILE};
use crate::task_list::DuplicatePolicy;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    /// One serialized response per line.
    Json,
}

/// Session settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub duplicates: DuplicatePolicy,
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: Path::new(DEFAULT_DATA_DIR).join(DEFAULT_DATA_FILE),
            duplicates: DuplicatePolicy::Allow,
            output: OutputMode::Text,
        }
    }
}

impl Config {
    pub fn new(data_file: Option<&str>, reject_duplicates: bool, json: bool) -> Self {
        let defaults = Config::default();
        Config {
            data_file: data_file.map(expand_home).unwrap_or(defaults.data_file),
            duplicates: if reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Allow
            },
            output: if json { OutputMode::Json } else { OutputMode::Text },
        }
    }
}

/// Expands a leading `~/` (or a bare `~`), which the shell leaves alone when
/// the path arrives through an environment variable or `--data=~/...`.
fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(None, false, false);
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file, PathBuf::from("data/chiron.txt"));
    }

    #[test]
    fn test_flags() {
        let config = Config::new(Some("/tmp/tasks.txt"), true, true);
        assert_eq!(config.data_file, PathBuf::from("/tmp/tasks.txt"));
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.output, OutputMode::Json);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("notes/tasks.txt"), PathBuf::from("notes/tasks.txt"));
        assert_eq!(expand_home("~user/tasks.txt"), PathBuf::from("~user/tasks.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/tasks.txt"), home.join("tasks.txt"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
