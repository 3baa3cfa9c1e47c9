use crate::config::cli::PomobanArgs;
use crate::config::ToolshedConfig;
use crate::core::pomoban::{
    format_mmss, render_clock, Board, Direction, Status, TimerEvent, TimerHandle,
};
use crate::utils::error::{ErrorCategory, Result, ToolError};
use chrono::NaiveDate;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

const BELL: char = '\x07';
const HELP: &str = "Commands: add <text> | next <id> | prev <id> | start <id> | stop | show | quit";

pub async fn run(args: &PomobanArgs, config: &ToolshedConfig) -> Result<()> {
    let board = Board::open(config.pomoban_path())?;
    let today = chrono::Local::now().date_naive();
    let mut out = std::io::stdout();
    if args.stats {
        return print_stats(&board, today, &mut out);
    }

    let (timer, events, join) = TimerHandle::spawn(config.pomoban.pomodoro_secs);
    let ticker = timer.spawn_ticker(Duration::from_secs(1));
    let lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    let mut session = Session::new(&board, timer, out, today);
    session.show()?;
    let result = session.event_loop(lines, events).await;

    ticker.abort();
    drop(session);
    if let Err(e) = join.await {
        tracing::warn!("Timer task ended abnormally: {}", e);
    }
    result
}

pub fn print_stats<W: Write>(board: &Board, date: NaiveDate, out: &mut W) -> Result<()> {
    let stats = board.stats_for(date)?;
    writeln!(out, "--- PomoBan Stats for {} ---", date.format("%Y-%m-%d"))?;
    if stats.is_empty() {
        writeln!(out, "No work recorded today.")?;
    }
    for (task, pomos) in stats {
        writeln!(out, "🍅 {}: {} cycles", task, pomos)?;
    }
    Ok(())
}

/// Line-driven board session. Commands and timer completions are handled on one task.
pub struct Session<'a, W: Write> {
    board: &'a Board,
    timer: TimerHandle,
    out: W,
    today: NaiveDate,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(board: &'a Board, timer: TimerHandle, out: W, today: NaiveDate) -> Self {
        Self {
            board,
            timer,
            out,
            today,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn event_loop<R>(
        &mut self,
        mut lines: Lines<R>,
        mut events: mpsc::Receiver<TimerEvent>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        return Ok(());
                    };
                    match self.handle_line(&line).await {
                        Ok(true) => {}
                        Ok(false) => return Ok(()),
                        Err(e) if e.category() == ErrorCategory::Input => {
                            writeln!(self.out, "❌ {}", e)?;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Some(event) = events.recv() => self.handle_event(event)?,
            }
        }
    }

    /// `Ok(false)` ends the session.
    pub async fn handle_line(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match command.to_lowercase().as_str() {
            "" => {}
            "add" => match self.board.add_task(rest, self.today)? {
                Some(id) => writeln!(self.out, "Added #{}", id)?,
                None => return Err(ToolError::validation("Task text cannot be empty")),
            },
            "next" | "prev" => {
                let id = parse_id(rest)?;
                let direction = if command.eq_ignore_ascii_case("next") {
                    Direction::Forward
                } else {
                    Direction::Back
                };
                match self.board.move_task(id, direction)? {
                    Some(status) => writeln!(self.out, "Moved #{} to {}", id, status)?,
                    None => writeln!(self.out, "#{} cannot move further", id)?,
                }
            }
            "start" => {
                let id = parse_id(rest)?;
                match self.board.get(id)? {
                    Some(task) if task.status == Status::Doing => {
                        self.timer.start(id).await?;
                        writeln!(self.out, "▶ Focus on {}", task)?;
                    }
                    Some(_) => {
                        return Err(ToolError::rejected(
                            "Only tasks in DOING can be started",
                        ))
                    }
                    None => return Err(ToolError::rejected(format!("No task #{}", id))),
                }
            }
            "stop" => {
                self.timer.stop().await?;
                writeln!(self.out, "⏹ Timer stopped")?;
            }
            "show" => self.show()?,
            "quit" | "exit" | "q" => return Ok(false),
            _ => writeln!(self.out, "{}", HELP)?,
        }
        self.out.flush()?;
        Ok(true)
    }

    pub fn handle_event(&mut self, event: TimerEvent) -> Result<()> {
        match event {
            TimerEvent::Completed { task_id } => {
                self.board.add_pomodoro(task_id)?;
                writeln!(self.out, "{}🍅 Pomodoro complete for #{}", BELL, task_id)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn show(&mut self) -> Result<()> {
        let state = self.timer.state();
        writeln!(self.out, "\n{}", render_clock(state.remaining))?;
        match state.task_id.filter(|_| state.running) {
            Some(id) => writeln!(self.out, "▶ {} left on #{}", format_mmss(state.remaining), id)?,
            None => writeln!(self.out, "⏸ Idle")?,
        }
        for status in Status::FLOW {
            writeln!(self.out, "\n== {} ==", status)?;
            for task in self.board.tasks_by_status(status)? {
                writeln!(self.out, "  {}", task)?;
            }
        }
        writeln!(self.out, "\n{}", HELP)?;
        Ok(())
    }
}

fn parse_id(input: &str) -> Result<i64> {
    input
        .parse()
        .map_err(|_| ToolError::validation(format!("Expected a task id, got '{}'", input)))
}
