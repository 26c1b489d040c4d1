//! What a front end gets back for one line of input.
//!
//! The console loop prints `message`; a graphical shell or test harness can
//! take the same value as JSON.

use crate::error::CommandError;
use crate::task_model::{Task, TaskKind};
use serde::Serialize;
use std::fmt::Write;

pub const GREETING: &str = "Chiron: I'm here.\nWhat are we working on today?";
pub const FAREWELL: &str = "Chiron: Rest well. Progress favours the consistent.";

pub const HELP_TEXT: &str = "\
Try:
  todo <description>
  deadline <description> /by <yyyy-mm-dd> [HHmm]
  event <description> /from <yyyy-mm-dd> [HHmm] /to <yyyy-mm-dd> [HHmm]
  list
  mark <n>
  unmark <n>
  delete <n>
  find <keyword>
  help
  bye";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub ok: bool,
    pub message: String,
    pub keep_running: bool,
    /// Set when the command succeeded but its result could not be saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Tasks the command touched or listed, for front ends that render them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

impl Response {
    pub fn new(message: impl Into<String>) -> Self {
        Response {
            ok: true,
            message: message.into(),
            keep_running: true,
            warning: None,
            hint: None,
            tasks: Vec::new(),
        }
    }

    pub fn exit(message: impl Into<String>) -> Self {
        Response {
            keep_running: false,
            ..Response::new(message)
        }
    }

    pub fn error(error: &CommandError) -> Self {
        Response {
            ok: false,
            hint: error.usage_hint().map(str::to_string),
            ..Response::new(format!("Chiron: {}", error))
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Text for a console: the message, then any warning and hint.
    pub fn render(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if let Some(warning) = &self.warning {
            lines.push(format!("Warning: {}", warning));
        }
        if let Some(hint) = &self.hint {
            lines.push(hint.clone());
        }
        lines.join("\n")
    }
}

pub fn render_added(task: &Task, size: usize) -> String {
    let note = match task.kind {
        TaskKind::Todo => "Noted. Small steps still move you forward.",
        TaskKind::Deadline { .. } => "A deadline sharpens focus. Respect it.",
        TaskKind::Event { .. } => "Logged. Be present when the time comes.",
    };
    format!(
        "Chiron: {}\n  {}. {}\nNow you have {} task(s).",
        note, size, task, size
    )
}

pub fn render_deleted(task: &Task, size: usize) -> String {
    format!(
        "Chiron: Letting go can be a form of clarity.\n  {}\nNow you have {} task(s).",
        task, size
    )
}

pub fn render_marked(task: &Task, number: usize) -> String {
    let note = if task.done {
        "Well done. Momentum is built like this."
    } else {
        "Then it isn't finished yet. That's alright."
    };
    format!("Chiron: {}\n  {}. {}", note, number, task)
}

pub fn render_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "Chiron: Your list is empty.".to_string();
    }
    let mut out = String::from("Chiron: Here's what you owe yourself:");
    push_numbered(&mut out, tasks.iter());
    out
}

pub fn render_found(matches: &[&Task]) -> String {
    if matches.is_empty() {
        return "Chiron: I found nothing matching that.".to_string();
    }
    let mut out = String::from("Chiron: Here are the matching tasks in your list:");
    push_numbered(&mut out, matches.iter().copied());
    out
}

fn push_numbered<'a>(out: &mut String, tasks: impl Iterator<Item = &'a Task>) {
    for (i, task) in tasks.enumerate() {
        // Writing into a String cannot fail.
        let _ = write!(out, "\n{}. {}", i + 1, task);
    }
}
