use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

// Formats accepted on input and written to the save file.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const INPUT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H%M";

// Human-facing formats, e.g. "Feb 05 2026" / "Feb 05 2026 1400".
pub const DISPLAY_DATE_FORMAT: &str = "%b %d %Y";
pub const DISPLAY_DATE_TIME_FORMAT: &str = "%b %d %Y %H%M";

/// A calendar point plus whether its time-of-day was given explicitly.
///
/// Date-only literals are stored at midnight with `has_time == false`, so
/// "2026-02-05" and "2026-02-05 0000" stay distinguishable.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStamp {
    pub value: NaiveDateTime,
    pub has_time: bool,
}

impl DateStamp {
    pub fn date_only(date: NaiveDate) -> Self {
        DateStamp {
            value: date.and_time(NaiveTime::MIN),
            has_time: false,
        }
    }

    pub fn with_time(value: NaiveDateTime) -> Self {
        DateStamp { value, has_time: true }
    }

    pub fn display(&self) -> String {
        if self.has_time {
            self.value.format(DISPLAY_DATE_TIME_FORMAT).to_string()
        } else {
            self.value.date().format(DISPLAY_DATE_FORMAT).to_string()
        }
    }

    /// Renders in the same grammar the command parser accepts.
    pub fn to_input_format(&self) -> String {
        if self.has_time {
            self.value.format(INPUT_DATE_TIME_FORMAT).to_string()
        } else {
            self.value.date().format(INPUT_DATE_FORMAT).to_string()
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaskKind {
    Todo,
    Deadline { by: DateStamp },
    Event { from: DateStamp, to: DateStamp },
}

impl TaskKind {
    fn icon(&self) -> &'static str {
        match self {
            TaskKind::Todo => "[T]",
            TaskKind::Deadline { .. } => "[D]",
            TaskKind::Event { .. } => "[E]",
        }
    }

    fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Task::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: DateStamp) -> Self {
        Task::new(description, TaskKind::Deadline { by })
    }

    pub fn event(description: impl Into<String>, from: DateStamp, to: DateStamp) -> Self {
        Task::new(description, TaskKind::Event { from, to })
    }

    fn new(description: impl Into<String>, kind: TaskKind) -> Self {
        Task {
            description: description.into(),
            done: false,
            kind,
        }
    }

    fn status_icon(&self) -> char {
        if self.done { 'X' } else { ' ' }
    }

    /// Pipe-delimited line written to the storage file.
    pub fn to_save_string(&self) -> String {
        let done_flag = if self.done { '1' } else { '0' };
        let head = format!("{} | {} | {}", self.kind.tag(), done_flag, self.description);
        match &self.kind {
            TaskKind::Todo => head,
            TaskKind::Deadline { by } => format!("{} | {}", head, by.to_input_format()),
            TaskKind::Event { from, to } => format!(
                "{} | {} | {}",
                head,
                from.to_input_format(),
                to.to_input_format()
            ),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {}", self.kind.icon(), self.status_icon(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by.display()),
            TaskKind::Event { from, to } => {
                write!(f, " (from: {} to: {})", from.display(), to.display())
            }
        }
    }
}
