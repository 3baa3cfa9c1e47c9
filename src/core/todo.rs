use crate::domain::model::{TodoItem, DONE_PREFIX};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const MAX_TASK_LEN: usize = 36;

pub fn is_task_done(line: &str) -> bool {
    line.starts_with(DONE_PREFIX)
}

pub fn task_text(line: &str) -> String {
    TodoItem::parse(line).text
}

pub fn format_task(text: &str, done: bool) -> String {
    TodoItem {
        text: text.to_string(),
        done,
    }
    .to_line()
}

fn checked_index(todos: &[String], index: i64) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < todos.len())
        .ok_or_else(|| ToolError::rejected("Invalid task number"))
}

/// Leaves `todos` untouched unless the result is `Ok`.
pub fn mark_task_done(todos: &mut [String], index: i64) -> Result<String> {
    let i = checked_index(todos, index)?;
    let item = TodoItem::parse(&todos[i]);
    if item.done {
        return Err(ToolError::rejected("Task is already marked as done"));
    }
    todos[i] = format_task(&item.text, true);
    Ok(format!("Marked as done: {}", item.text))
}

/// Leaves `todos` untouched unless the result is `Ok`.
pub fn mark_task_undone(todos: &mut [String], index: i64) -> Result<String> {
    let i = checked_index(todos, index)?;
    let item = TodoItem::parse(&todos[i]);
    if !item.done {
        return Err(ToolError::rejected("Task is not marked as done"));
    }
    todos[i] = format_task(&item.text, false);
    Ok(format!("Marked as not done: {}", item.text))
}

/// Trims, truncates to [`MAX_TASK_LEN`] characters and rejects empty or duplicate text.
pub fn normalize_new_task(todos: &[String], task: &str) -> Result<String> {
    let trimmed = task.trim();
    if trimmed.is_empty() {
        return Err(ToolError::rejected("Task cannot be empty"));
    }
    let text: String = trimmed.chars().take(MAX_TASK_LEN).collect();

    let existing: HashSet<String> = todos
        .iter()
        .map(|t| task_text(t).trim().to_lowercase())
        .collect();
    if existing.contains(&text.to_lowercase()) {
        return Err(ToolError::rejected("Task is a duplicate"));
    }
    Ok(text)
}

/// File-backed list; every mutation rewrites the whole file.
///
/// Mutations hold `write_lock` across load, edit and save so concurrent
/// callers sharing one store never drop each other's changes.
pub struct TodoStore<S: Storage> {
    storage: S,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl<S: Storage> TodoStore<S> {
    pub fn new(storage: S, path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The guarded value is `()`, so a poisoned lock carries no broken state.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<String>> {
        let content = self.storage.read_to_string(&self.path)?.unwrap_or_default();
        Ok(content
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    pub fn save(&self, todos: &[String]) -> Result<()> {
        let mut data = String::new();
        for todo in todos {
            data.push_str(todo);
            data.push('\n');
        }
        self.storage.write_atomic(&self.path, data.as_bytes())
    }

    pub fn add_task(&self, task: &str) -> Result<String> {
        let _guard = self.lock();
        let mut todos = self.load()?;
        let text = normalize_new_task(&todos, task)?;
        todos.push(format_task(&text, false));
        self.save(&todos)?;
        tracing::debug!("Added task '{}' ({} total)", text, todos.len());
        Ok(text)
    }

    pub fn delete_task(&self, index: i64) -> Result<String> {
        let _guard = self.lock();
        let mut todos = self.load()?;
        let i = checked_index(&todos, index)?;
        let removed = todos.remove(i);
        self.save(&todos)?;
        Ok(removed)
    }

    pub fn mark_done(&self, index: i64) -> Result<String> {
        self.update(|todos| mark_task_done(todos, index))
    }

    pub fn mark_undone(&self, index: i64) -> Result<String> {
        self.update(|todos| mark_task_undone(todos, index))
    }

    fn update<F>(&self, f: F) -> Result<String>
    where
        F: FnOnce(&mut [String]) -> Result<String>,
    {
        let _guard = self.lock();
        let mut todos = self.load()?;
        let message = f(&mut todos)?;
        self.save(&todos)?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStorage {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
            let files = self.files.lock().unwrap();
            Ok(files
                .get(path)
                .map(|d| String::from_utf8_lossy(d).into_owned()))
        }

        fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }

        fn backup(&self, _path: &Path) -> Result<Option<PathBuf>> {
            Ok(None)
        }
    }

    fn todos(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_task_done() {
        assert!(is_task_done("[x] Buy groceries"));
        assert!(!is_task_done("[ ] Buy groceries"));
        assert!(!is_task_done("Buy groceries"));
    }

    #[test]
    fn test_task_text() {
        assert_eq!(task_text("[x] Buy groceries"), "Buy groceries");
        assert_eq!(task_text("[ ] Buy groceries"), "Buy groceries");
        assert_eq!(task_text("Buy groceries"), "Buy groceries");
    }

    #[test]
    fn test_format_task() {
        assert_eq!(format_task("Buy groceries", true), "[x] Buy groceries");
        assert_eq!(format_task("Buy groceries", false), "[ ] Buy groceries");
    }

    #[test]
    fn test_mark_undone_task_as_done() {
        let mut list = todos(&["[ ] Buy groceries", "[ ] Clean room"]);
        let message = mark_task_done(&mut list, 0).unwrap();
        assert!(message.contains("Marked as done"));
        assert_eq!(list[0], "[x] Buy groceries");
        assert_eq!(list[1], "[ ] Clean room");
    }

    #[test]
    fn test_mark_already_done_task_does_not_mutate() {
        let mut list = todos(&["[x] Buy groceries"]);
        let err = mark_task_done(&mut list, 0).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("already marked as done"));
        assert_eq!(list, todos(&["[x] Buy groceries"]));
    }

    #[test]
    fn test_mark_invalid_and_negative_index() {
        let mut list = todos(&["[ ] Buy groceries"]);
        assert!(mark_task_done(&mut list, 10)
            .unwrap_err()
            .to_string()
            .contains("Invalid"));
        assert!(mark_task_done(&mut list, -1)
            .unwrap_err()
            .to_string()
            .contains("Invalid"));
        assert!(mark_task_undone(&mut list, 10).is_err());
        assert_eq!(list, todos(&["[ ] Buy groceries"]));
    }

    #[test]
    fn test_mark_done_task_as_undone() {
        let mut list = todos(&["[x] Buy groceries", "[ ] Clean room"]);
        let message = mark_task_undone(&mut list, 0).unwrap();
        assert!(message.contains("Marked as not done"));
        assert_eq!(list[0], "[ ] Buy groceries");
    }

    #[test]
    fn test_mark_already_undone_task() {
        let mut list = todos(&["[ ] Buy groceries"]);
        let err = mark_task_undone(&mut list, 0).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("not marked as done"));
    }

    #[test]
    fn test_done_undone_round_trip() {
        let mut list = todos(&["[ ] Buy milk"]);
        mark_task_done(&mut list, 0).unwrap();
        assert_eq!(list[0], "[x] Buy milk");
        mark_task_undone(&mut list, 0).unwrap();
        assert_eq!(list[0], "[ ] Buy milk");
    }

    #[test]
    fn test_normalize_new_task() {
        let list = todos(&["[x] Buy Milk"]);
        assert!(normalize_new_task(&list, "   ").is_err());
        assert!(normalize_new_task(&list, "buy milk").is_err());
        let long = "a".repeat(50);
        assert_eq!(normalize_new_task(&list, &long).unwrap().len(), MAX_TASK_LEN);
        assert_eq!(normalize_new_task(&list, "  Walk dog ").unwrap(), "Walk dog");
    }

    #[test]
    fn test_store_add_mark_delete() {
        let store = TodoStore::new(MockStorage::default(), "todos.txt");
        assert!(store.load().unwrap().is_empty());

        store.add_task("Buy milk").unwrap();
        store.add_task("Walk dog").unwrap();
        assert!(store.add_task("BUY MILK").is_err());

        store.mark_done(1).unwrap();
        assert_eq!(store.load().unwrap(), todos(&["[ ] Buy milk", "[x] Walk dog"]));

        let removed = store.delete_task(0).unwrap();
        assert_eq!(removed, "[ ] Buy milk");
        assert_eq!(store.load().unwrap(), todos(&["[x] Walk dog"]));

        assert!(store.delete_task(5).is_err());
    }

    #[test]
    fn test_store_failed_mark_does_not_write() {
        let store = TodoStore::new(MockStorage::default(), "todos.txt");
        store.add_task("Buy milk").unwrap();
        store.mark_done(0).unwrap();
        assert!(store.mark_done(0).is_err());
        assert_eq!(store.load().unwrap(), todos(&["[x] Buy milk"]));
    }
}
