use crate::command_parser::parse_date_time;
use crate::error::StorageError;
use crate::task_model::Task;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATA_FILE: &str = "chiron.txt";

/// Tasks read back from disk, plus how many lines had to be dropped.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    pub skipped: usize,
}

/// Line-oriented, pipe-delimited task file:
///
/// ```text
/// T | 0 | read book
/// D | 1 | return book | 2026-02-05
/// E | 0 | meeting | 2026-02-10 1400 | 2026-02-10 1600
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file. A missing file is a first run and yields no tasks;
    /// corrupted lines are skipped one by one.
    pub fn load(&self) -> Result<Loaded, StorageError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no task file yet, starting empty");
                return Ok(Loaded::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        // Decoded per line, so one bad byte only costs its own record.
        let mut loaded = Loaded::default();
        for (number, raw) in content.split(|&b| b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let Ok(line) = std::str::from_utf8(raw) else {
                warn!(line = number + 1, "skipping task line that is not valid UTF-8");
                loaded.skipped += 1;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_save_line(line) {
                Some(task) => loaded.tasks.push(task),
                None => {
                    warn!(line = number + 1, content = line, "skipping corrupted task line");
                    loaded.skipped += 1;
                }
            }
        }
        info!(
            path = %self.path.display(),
            tasks = loaded.tasks.len(),
            skipped = loaded.skipped,
            "loaded tasks"
        );
        Ok(loaded)
    }

    /// Rewrites the whole file, creating its directory if needed.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, format_save_file(tasks)).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), tasks = tasks.len(), "saved tasks");
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Storage::new(Path::new(DEFAULT_DATA_DIR).join(DEFAULT_DATA_FILE))
    }
}

/// One newline-terminated save line per task, in list order.
pub fn format_save_file(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| task.to_save_string() + "\n")
        .collect()
}

/// Parses one save line, or `None` if it is corrupted.
pub fn parse_save_line(line: &str) -> Option<Task> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }

    let done = fields[1] == "1";
    let description = fields[2];
    if description.is_empty() {
        return None;
    }

    let mut task = match fields[0] {
        "T" => Task::todo(description),
        "D" => {
            let by = parse_date_time(fields.get(3)?)?;
            Task::deadline(description, by)
        }
        "E" => {
            let from = parse_date_time(fields.get(3)?)?;
            let to = parse_date_time(fields.get(4)?)?;
            Task::event(description, from, to)
        }
        _ => return None,
    };
    task.done = done;
    Some(task)
}
