//! Chiron: a personal task tracker driven by short text commands and kept in
//! a flat pipe-delimited file.

pub mod command_exec;
pub mod command_parser;
pub mod config;
pub mod error;
pub mod response;
pub mod storage;
pub mod task_list;
pub mod task_model;

pub use command_exec::{execute, run_line};
pub use command_parser::{parse_command, parse_date_time, Command};
pub use config::{Config, OutputMode};
pub use error::{CommandError, ExecutionError, ParseError, StorageError};
pub use response::Response;
pub use storage::Storage;
pub use task_list::{DuplicatePolicy, TaskList};
pub use task_model::{DateStamp, Task, TaskKind};
