use tempfile::TempDir;
use toolshed::core::todo::{mark_task_done, mark_task_undone, TodoStore};
use toolshed::LocalStorage;

fn store(dir: &TempDir) -> TodoStore<LocalStorage> {
    TodoStore::new(LocalStorage::new(dir.path()), "todos.txt")
}

#[test]
fn test_missing_file_is_empty_list() {
    let dir = TempDir::new().unwrap();
    assert!(store(&dir).load().unwrap().is_empty());
}

#[test]
fn test_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.add_task("  Buy milk  ").unwrap();
    store.add_task("Write a very long task description that goes on").unwrap();
    store.mark_done(0).unwrap();

    let content = std::fs::read_to_string(dir.path().join("todos.txt")).unwrap();
    assert_eq!(
        content,
        "[x] Buy milk\n[ ] Write a very long task description t\n"
    );

    let removed = store.delete_task(1).unwrap();
    assert_eq!(removed, "[ ] Write a very long task description t");
    assert_eq!(store.load().unwrap(), vec!["[x] Buy milk"]);
}

#[test]
fn test_unprefixed_lines_from_older_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("todos.txt"), "legacy task\n\n[x] done task\n").unwrap();

    let store = store(&dir);
    assert_eq!(store.load().unwrap(), vec!["legacy task", "[x] done task"]);
    assert_eq!(store.mark_done(0).unwrap(), "Marked as done: legacy task");
    assert!(store.add_task("LEGACY TASK").is_err());
}

#[test]
fn test_done_undone_round_trip_restores_line() {
    let mut todos = vec!["[ ] Read".to_string()];
    let original = todos.clone();

    mark_task_done(&mut todos, 0).unwrap();
    mark_task_undone(&mut todos, 0).unwrap();
    assert_eq!(todos, original);
}

#[test]
fn test_failed_mutations_leave_list_untouched() {
    let mut todos = vec!["[x] Read".to_string(), "[ ] Write".to_string()];
    let before = todos.clone();

    assert_eq!(
        mark_task_done(&mut todos, 0).unwrap_err().to_string(),
        "Task is already marked as done"
    );
    assert_eq!(
        mark_task_undone(&mut todos, 1).unwrap_err().to_string(),
        "Task is not marked as done"
    );
    assert_eq!(
        mark_task_done(&mut todos, -1).unwrap_err().to_string(),
        "Invalid task number"
    );
    assert_eq!(
        mark_task_done(&mut todos, 2).unwrap_err().to_string(),
        "Invalid task number"
    );
    assert_eq!(todos, before);
}

#[test]
fn test_concurrent_adds_are_all_kept() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    for round in 0..5 {
        std::thread::scope(|scope| {
            for i in 0..8 {
                let store = &store;
                scope.spawn(move || store.add_task(&format!("round {} task {}", round, i)).unwrap());
            }
        });
        assert_eq!(store.load().unwrap().len(), (round + 1) * 8);
    }

    let saved = std::fs::read_to_string(dir.path().join("todos.txt")).unwrap();
    assert_eq!(saved.lines().count(), 40);
    assert!(saved.contains("[ ] round 4 task 7\n"));
}
