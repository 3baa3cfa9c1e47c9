//! Pomodoro kanban: SQLite-backed columns and a message-driven countdown.

pub mod board;
pub mod clock;
pub mod timer;

pub use board::{Board, BoardTask, Direction, Status};
pub use clock::{format_mmss, render_clock};
pub use timer::{TimerCommand, TimerEvent, TimerHandle, TimerState, DEFAULT_POMODORO_SECS};
