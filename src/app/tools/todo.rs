use crate::adapters::LocalStorage;
use crate::app::prompt::{Prompter, StdPrompter};
use crate::app::tools::report;
use crate::config::cli::{TodoAction, TodoArgs};
use crate::config::ToolshedConfig;
use crate::core::todo::TodoStore;
use crate::domain::model::TodoItem;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use std::io::{BufRead, Write};

const MENU: &str = "
=== To-Do List ===
1. View tasks
2. Add task
3. Delete task
4. Mark task as done
5. Mark task as not done
6. Exit";

pub fn run(args: &TodoArgs, config: &ToolshedConfig) -> Result<()> {
    let store = TodoStore::new(LocalStorage::default(), config.todo_path());
    let mut prompter = StdPrompter::stdio();
    match &args.action {
        Some(action) => execute(&store, action, &mut prompter),
        None => interactive(&store, &mut prompter),
    }
}

/// Numbers are 1-based on the console.
fn to_index(number: i64) -> i64 {
    number.saturating_sub(1)
}

fn parse_number(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ToolError::rejected("Please enter a valid task number"))
}

pub fn execute<S: Storage, R: BufRead, W: Write>(
    store: &TodoStore<S>,
    action: &TodoAction,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let message = match action {
        TodoAction::List => return show_tasks(store, prompter),
        TodoAction::Add { text } => store
            .add_task(&text.join(" "))
            .map(|t| format!("Added: {}", t))?,
        TodoAction::Done { number } => store.mark_done(to_index(*number))?,
        TodoAction::Undone { number } => store.mark_undone(to_index(*number))?,
        TodoAction::Delete { number } => store
            .delete_task(to_index(*number))
            .map(|line| format!("Deleted: {}", TodoItem::parse(&line).text))?,
    };
    prompter.say(format!("✅ {}", message))
}

fn show_tasks<S: Storage, R: BufRead, W: Write>(
    store: &TodoStore<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let todos = store.load()?;
    if todos.is_empty() {
        return prompter.say("No tasks yet.");
    }
    prompter.say("\nYour tasks:")?;
    for (i, line) in todos.iter().enumerate() {
        prompter.say(format!("{}. {}", i + 1, line))?;
    }
    Ok(())
}

pub fn interactive<S: Storage, R: BufRead, W: Write>(
    store: &TodoStore<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        prompter.say(MENU)?;
        let Some(choice) = prompter.ask("Choose an option: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => show_tasks(store, prompter)?,
            "2" => {
                let task = prompter.ask_required("Enter task: ")?;
                report(prompter, store.add_task(&task).map(|t| format!("Added: {}", t)))?;
            }
            "3" | "4" | "5" => {
                show_tasks(store, prompter)?;
                let input = prompter.ask_required("Task number: ")?;
                let outcome = parse_number(&input).and_then(|n| match choice.as_str() {
                    "3" => store
                        .delete_task(to_index(n))
                        .map(|line| format!("Deleted: {}", TodoItem::parse(&line).text)),
                    "4" => store.mark_done(to_index(n)),
                    _ => store.mark_undone(to_index(n)),
                });
                report(prompter, outcome)?;
            }
            "6" => {
                prompter.say("Goodbye!")?;
                return Ok(());
            }
            _ => prompter.say("❌ Invalid choice. Please select 1-6.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prompt::scripted;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> TodoStore<LocalStorage> {
        TodoStore::new(LocalStorage::new(dir.path()), "todos.txt")
    }

    #[test]
    fn test_direct_subcommands_use_one_based_numbers() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut p = scripted("");

        execute(&store, &TodoAction::Add { text: vec!["Buy".into(), "milk".into()] }, &mut p).unwrap();
        execute(&store, &TodoAction::Add { text: vec!["Walk dog".into()] }, &mut p).unwrap();
        execute(&store, &TodoAction::Done { number: 2 }, &mut p).unwrap();
        execute(&store, &TodoAction::List, &mut p).unwrap();

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("✅ Marked as done: Walk dog"));
        assert!(out.contains("1. [ ] Buy milk"));
        assert!(out.contains("2. [x] Walk dog"));
    }

    #[test]
    fn test_direct_subcommand_errors_propagate() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut p = scripted("");
        let err = execute(&store, &TodoAction::Delete { number: 0 }, &mut p).unwrap_err();
        assert_eq!(err.to_string(), "Invalid task number");
    }

    #[test]
    fn test_interactive_session() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut p = scripted("2\nRead book\n2\nread book\n4\n1\n4\n1\n9\n6\n");

        interactive(&store, &mut p).unwrap();

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("✅ Added: Read book"));
        assert!(out.contains("❌ Task is a duplicate"));
        assert!(out.contains("✅ Marked as done: Read book"));
        assert!(out.contains("❌ Task is already marked as done"));
        assert!(out.contains("Invalid choice"));
        assert_eq!(store.load().unwrap(), vec!["[x] Read book"]);
    }

    #[test]
    fn test_interactive_bad_number_keeps_going() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut p = scripted("3\nabc\n");
        interactive(&store, &mut p).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("No tasks yet."));
        assert!(out.contains("❌ Please enter a valid task number"));
    }
}
