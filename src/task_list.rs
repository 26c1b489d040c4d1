use crate::error::ExecutionError;
use crate::task_model::Task;

/// Whether adding a task identical to an existing one is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Allow,
    Reject,
}

/// Ordered tasks. Index 0 is task "1" to the user; order is insertion,
/// display and save order alike.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    duplicates: DuplicatePolicy,
}

impl TaskList {
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        TaskList {
            tasks: Vec::new(),
            duplicates,
        }
    }

    pub fn with_tasks(tasks: Vec<Task>, duplicates: DuplicatePolicy) -> Self {
        TaskList { tasks, duplicates }
    }

    pub fn add(&mut self, task: Task) -> Result<(), ExecutionError> {
        if self.duplicates == DuplicatePolicy::Reject && self.tasks.contains(&task) {
            return Err(ExecutionError::Duplicate(task.to_string()));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Removes the task at a 0-based index, shifting later tasks down.
    ///
    /// # Panics
    /// If `index` is out of bounds; callers range-check first.
    pub fn remove(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    pub fn set_done(&mut self, index: usize, done: bool) {
        self.tasks[index].done = done;
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Case-sensitive substring match on descriptions, in list order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description.contains(keyword))
            .collect()
    }

    /// Converts a 1-based task number into a checked 0-based index.
    pub fn checked_index(&self, number: usize) -> Result<usize, ExecutionError> {
        if number == 0 || number > self.tasks.len() {
            return Err(ExecutionError::IndexOutOfRange {
                index: number,
                size: self.tasks.len(),
            });
        }
        Ok(number - 1)
    }
}
