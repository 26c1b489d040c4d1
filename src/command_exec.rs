use crate::command_parser::{parse_command, Command};
use crate::error::{CommandError, ExecutionError};
use crate::response::{self, Response};
use crate::storage::Storage;
use crate::task_list::TaskList;
use tracing::warn;

/// Runs a parsed command against `tasks`, saving after every mutation.
///
/// Range and duplicate checks happen before anything changes. A failed save
/// does not undo the change; it comes back as a warning on the response.
pub fn execute(
    command: Command,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, ExecutionError> {
    let response = match command {
        Command::Bye => Response::exit(response::FAREWELL),
        Command::Help => Response::new(response::HELP_TEXT),
        Command::List => {
            let listed = tasks.as_slice().to_vec();
            Response::new(response::render_list(&listed)).with_tasks(listed)
        }
        Command::Find(keyword) => {
            let matches = tasks.find(&keyword);
            let message = response::render_found(&matches);
            let found = matches.into_iter().cloned().collect();
            Response::new(message).with_tasks(found)
        }
        Command::Add(task) => {
            tasks.add(task.clone())?;
            let message = response::render_added(&task, tasks.len());
            save(tasks, storage, Response::new(message).with_tasks(vec![task]))
        }
        Command::Mark(number) => set_done(tasks, storage, number, true)?,
        Command::Unmark(number) => set_done(tasks, storage, number, false)?,
        Command::Delete(number) => {
            let index = tasks.checked_index(number)?;
            let removed = tasks.remove(index);
            let message = response::render_deleted(&removed, tasks.len());
            save(tasks, storage, Response::new(message).with_tasks(vec![removed]))
        }
    };
    Ok(response)
}

fn set_done(
    tasks: &mut TaskList,
    storage: &Storage,
    number: usize,
    done: bool,
) -> Result<Response, ExecutionError> {
    let index = tasks.checked_index(number)?;
    tasks.set_done(index, done);
    let task = tasks.as_slice()[index].clone();
    let message = response::render_marked(&task, number);
    Ok(save(tasks, storage, Response::new(message).with_tasks(vec![task])))
}

fn save(tasks: &TaskList, storage: &Storage, response: Response) -> Response {
    match storage.save(tasks.as_slice()) {
        Ok(()) => response,
        Err(e) => {
            warn!(error = %e, "could not persist tasks, keeping them in memory");
            response.with_warning(e.to_string())
        }
    }
}

/// Parses and runs one line of input. Failures become error responses; the
/// session always continues unless the line was `bye`.
pub fn run_line(line: &str, tasks: &mut TaskList, storage: &Storage) -> Response {
    let result = parse_command(line)
        .map_err(CommandError::from)
        .and_then(|command| execute(command, tasks, storage).map_err(CommandError::from));
    match result {
        Ok(response) => response,
        Err(e) => Response::error(&e),
    }
}
