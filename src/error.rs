//! Error types for parsing, executing and persisting commands.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::command_parser::CommandWord;

/// Rejection of a single input line. Nothing is mutated when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Say something. An empty line tells me nothing.")]
    EmptyInput,

    #[error("I don't know the command '{0}'.")]
    UnknownCommand(String),

    #[error("A todo needs a description.")]
    EmptyTodo,

    #[error("A deadline needs details.")]
    EmptyDeadline,

    #[error("Deadlines need a /by.")]
    MissingBy,

    #[error("Deadline description is missing.")]
    MissingDeadlineDescription,

    #[error("Deadline date/time is missing.")]
    MissingDeadlineDate,

    #[error("An event needs details.")]
    EmptyEvent,

    #[error("Events need both /from and /to, in that order.")]
    MissingFromTo,

    #[error("Event description is missing.")]
    MissingEventDescription,

    #[error("Event start date/time is missing.")]
    MissingEventStart,

    #[error("Event end date/time is missing.")]
    MissingEventEnd,

    #[error("I can only read dates as yyyy-mm-dd (optional time: HHmm), not '{raw}'.")]
    InvalidDateTime { command: CommandWord, raw: String },

    #[error("Descriptions cannot contain '|'.")]
    ReservedCharacter(CommandWord),

    #[error("Give me a task number.")]
    MissingIndex(CommandWord),

    #[error("'{raw}' is not a task number.")]
    NotANumber { command: CommandWord, raw: String },

    #[error("Find what? Give me a keyword.")]
    EmptyKeyword,
}

impl ParseError {
    /// The command this error belongs to, when the command word was recognised.
    pub fn command(&self) -> Option<CommandWord> {
        match self {
            ParseError::EmptyInput | ParseError::UnknownCommand(_) => None,
            ParseError::EmptyTodo => Some(CommandWord::Todo),
            ParseError::EmptyDeadline
            | ParseError::MissingBy
            | ParseError::MissingDeadlineDescription
            | ParseError::MissingDeadlineDate => Some(CommandWord::Deadline),
            ParseError::EmptyEvent
            | ParseError::MissingFromTo
            | ParseError::MissingEventDescription
            | ParseError::MissingEventStart
            | ParseError::MissingEventEnd => Some(CommandWord::Event),
            ParseError::EmptyKeyword => Some(CommandWord::Find),
            ParseError::InvalidDateTime { command, .. }
            | ParseError::ReservedCharacter(command)
            | ParseError::MissingIndex(command)
            | ParseError::NotANumber { command, .. } => Some(*command),
        }
    }

    pub fn usage_hint(&self) -> &'static str {
        match self.command() {
            Some(word) => word.usage(),
            None => crate::response::HELP_TEXT,
        }
    }
}

/// Failure while running an already parsed command against the task list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Task {index} doesn't exist. You have {size} task(s).")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("This task already exists: {0}")]
    Duplicate(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to read tasks from '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to save tasks to '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Anything a single line of input can fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl CommandError {
    pub fn usage_hint(&self) -> Option<&'static str> {
        match self {
            CommandError::Parse(e) => Some(e.usage_hint()),
            CommandError::Execution(ExecutionError::IndexOutOfRange { .. }) => {
                Some("Use 'list' to see task numbers.")
            }
            CommandError::Execution(ExecutionError::Duplicate(_)) => None,
        }
    }
}
