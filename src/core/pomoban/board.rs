use crate::utils::error::{Result, ToolError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt;
use std::path::Path;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY,
    task TEXT,
    status TEXT,
    pomos INTEGER DEFAULT 0,
    created_at DATE
)";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub const FLOW: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Doing => "DOING",
            Status::Done => "DONE",
        }
    }

    pub fn next(&self) -> Option<Status> {
        match self {
            Status::Todo => Some(Status::Doing),
            Status::Doing => Some(Status::Done),
            Status::Done => None,
        }
    }

    pub fn prev(&self) -> Option<Status> {
        match self {
            Status::Todo => None,
            Status::Doing => Some(Status::Todo),
            Status::Done => Some(Status::Doing),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TODO" => Ok(Status::Todo),
            "DOING" => Ok(Status::Doing),
            "DONE" => Ok(Status::Done),
            other => Err(ToolError::validation(format!("Unknown task status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTask {
    pub id: i64,
    pub task: String,
    pub status: Status,
    pub pomos: u32,
}

impl fmt::Display for BoardTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({}🍅)", self.id, self.task, self.pomos)
    }
}

/// Kanban columns persisted in SQLite.
pub struct Board {
    conn: Connection,
}

impl Board {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!("Opened task board at {}", path.as_ref().display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Blank text is ignored and yields `None`.
    pub fn add_task(&self, text: &str, today: NaiveDate) -> Result<Option<i64>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.conn.execute(
            "INSERT INTO tasks (task, status, created_at) VALUES (?1, 'TODO', ?2)",
            params![text, today.format(DATE_FORMAT).to_string()],
        )?;
        Ok(Some(self.conn.last_insert_rowid()))
    }

    pub fn tasks_by_status(&self, status: Status) -> Result<Vec<BoardTask>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, task, status, pomos FROM tasks WHERE status = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![status.as_str()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<u32>>(3)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, task, raw_status, pomos) = row?;
            tasks.push(BoardTask {
                id,
                task: task.unwrap_or_default(),
                status: raw_status.parse()?,
                pomos: pomos.unwrap_or(0),
            });
        }
        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Option<BoardTask>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, task, status, pomos FROM tasks WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<u32>>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, task, raw_status, pomos)) => Ok(Some(BoardTask {
                id,
                task: task.unwrap_or_default(),
                status: raw_status.parse()?,
                pomos: pomos.unwrap_or(0),
            })),
            None => Ok(None),
        }
    }

    /// Returns the new status, or `None` when the task is unknown or already at that end of the flow.
    pub fn move_task(&self, id: i64, direction: Direction) -> Result<Option<Status>> {
        let Some(task) = self.get(id)? else {
            return Ok(None);
        };
        let target = match direction {
            Direction::Forward => task.status.next(),
            Direction::Back => task.status.prev(),
        };
        if let Some(status) = target {
            self.conn.execute(
                "UPDATE tasks SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            tracing::debug!("Moved task {} from {} to {}", id, task.status, status);
        }
        Ok(target)
    }

    pub fn add_pomodoro(&self, id: i64) -> Result<()> {
        self.conn
            .execute("UPDATE tasks SET pomos = pomos + 1 WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// `(task, pomodoros)` for every task created on `date`.
    pub fn stats_for(&self, date: NaiveDate) -> Result<Vec<(String, u32)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT task, pomos FROM tasks WHERE created_at = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![date.format(DATE_FORMAT).to_string()], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    row.get::<_, Option<u32>>(1)?.unwrap_or(0),
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_add_ignores_blank() {
        let board = Board::open_in_memory().unwrap();
        assert_eq!(board.add_task("   ", today()).unwrap(), None);
        let id = board.add_task("Write report", today()).unwrap().unwrap();

        let todo = board.tasks_by_status(Status::Todo).unwrap();
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].id, id);
        assert_eq!(todo[0].pomos, 0);
    }

    #[test]
    fn test_status_flow_is_bounded() {
        let board = Board::open_in_memory().unwrap();
        let id = board.add_task("Review PR", today()).unwrap().unwrap();

        assert_eq!(board.move_task(id, Direction::Back).unwrap(), None);
        assert_eq!(board.move_task(id, Direction::Forward).unwrap(), Some(Status::Doing));
        assert_eq!(board.move_task(id, Direction::Forward).unwrap(), Some(Status::Done));
        assert_eq!(board.move_task(id, Direction::Forward).unwrap(), None);
        assert_eq!(board.get(id).unwrap().unwrap().status, Status::Done);
        assert_eq!(board.move_task(id, Direction::Back).unwrap(), Some(Status::Doing));

        assert_eq!(board.move_task(999, Direction::Forward).unwrap(), None);
    }

    #[test]
    fn test_pomodoros_and_stats() {
        let board = Board::open_in_memory().unwrap();
        let a = board.add_task("Deep work", today()).unwrap().unwrap();
        board.add_task("Yesterday", today().pred_opt().unwrap()).unwrap();

        board.add_pomodoro(a).unwrap();
        board.add_pomodoro(a).unwrap();

        assert_eq!(
            board.stats_for(today()).unwrap(),
            vec![("Deep work".to_string(), 2)]
        );
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pomoban.db");
        let id = {
            let board = Board::open(&path).unwrap();
            board.add_task("Persist me", today()).unwrap().unwrap()
        };
        let board = Board::open(&path).unwrap();
        assert_eq!(board.get(id).unwrap().unwrap().task, "Persist me");
    }
}
