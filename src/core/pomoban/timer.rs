use crate::utils::error::{Result, ToolError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub const DEFAULT_POMODORO_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start { task_id: i64 },
    Stop,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Completed { task_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub remaining: u32,
    pub running: bool,
    pub task_id: Option<i64>,
}

/// Countdown owned by a single task; all changes arrive as commands.
struct Countdown {
    duration: u32,
    state: TimerState,
}

impl Countdown {
    fn new(duration: u32) -> Self {
        Self {
            duration,
            state: TimerState {
                remaining: duration,
                running: false,
                task_id: None,
            },
        }
    }

    fn apply(&mut self, command: TimerCommand) -> Option<TimerEvent> {
        match command {
            TimerCommand::Start { task_id } => {
                self.state.task_id = Some(task_id);
                self.state.running = true;
                None
            }
            TimerCommand::Stop => {
                self.state.running = false;
                self.state.remaining = self.duration;
                None
            }
            TimerCommand::Tick => {
                if !self.state.running || self.state.remaining == 0 {
                    return None;
                }
                self.state.remaining -= 1;
                if self.state.remaining > 0 {
                    return None;
                }
                self.state.running = false;
                self.state.remaining = self.duration;
                self.state.task_id.map(|task_id| TimerEvent::Completed { task_id })
            }
        }
    }
}

async fn timer_task(
    mut countdown: Countdown,
    mut commands: mpsc::Receiver<TimerCommand>,
    state_tx: watch::Sender<TimerState>,
    events: mpsc::Sender<TimerEvent>,
) {
    while let Some(command) = commands.recv().await {
        let event = countdown.apply(command);
        state_tx.send_replace(countdown.state);
        if let Some(event) = event {
            tracing::info!("Pomodoro finished: {:?}", event);
            if events.send(event).await.is_err() {
                tracing::debug!("Timer event receiver dropped");
            }
        }
    }
    tracing::debug!("Timer task stopped");
}

/// Cloneable front for the timer task. The task ends once every handle is dropped.
#[derive(Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<TimerCommand>,
    state: watch::Receiver<TimerState>,
}

impl TimerHandle {
    /// Spawns the timer task; completions arrive on the returned receiver.
    pub fn spawn(duration_secs: u32) -> (Self, mpsc::Receiver<TimerEvent>, JoinHandle<()>) {
        let countdown = Countdown::new(duration_secs);
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (state_tx, state_rx) = watch::channel(countdown.state);
        let (event_tx, event_rx) = mpsc::channel(8);

        let join = tokio::spawn(timer_task(countdown, cmd_rx, state_tx, event_tx));
        (
            Self {
                commands: cmd_tx,
                state: state_rx,
            },
            event_rx,
            join,
        )
    }

    /// Sends `Tick` every `period` until the timer task is gone.
    pub fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        let weak = self.commands.downgrade();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(sender) = weak.upgrade() else {
                    break;
                };
                if sender.send(TimerCommand::Tick).await.is_err() {
                    break;
                }
            }
        })
    }

    pub async fn send(&self, command: TimerCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ToolError::TimerClosed)
    }

    pub async fn start(&self, task_id: i64) -> Result<()> {
        self.send(TimerCommand::Start { task_id }).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(TimerCommand::Stop).await
    }

    pub fn state(&self) -> TimerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_ignores_ticks_when_idle() {
        let mut c = Countdown::new(3);
        assert_eq!(c.apply(TimerCommand::Tick), None);
        assert_eq!(c.state.remaining, 3);
    }

    #[test]
    fn test_stop_resets_to_full_duration() {
        let mut c = Countdown::new(5);
        c.apply(TimerCommand::Start { task_id: 1 });
        c.apply(TimerCommand::Tick);
        c.apply(TimerCommand::Tick);
        assert_eq!(c.state.remaining, 3);
        c.apply(TimerCommand::Stop);
        assert_eq!(c.state.remaining, 5);
        assert!(!c.state.running);
    }

    #[test]
    fn test_completion_emits_event() {
        let mut c = Countdown::new(2);
        c.apply(TimerCommand::Start { task_id: 7 });
        assert_eq!(c.apply(TimerCommand::Tick), None);
        assert_eq!(
            c.apply(TimerCommand::Tick),
            Some(TimerEvent::Completed { task_id: 7 })
        );
        assert!(!c.state.running);
        assert_eq!(c.state.remaining, 2);
    }

    #[tokio::test]
    async fn test_timer_task_publishes_state_and_events() {
        let (timer, mut events, _join) = TimerHandle::spawn(2);
        let mut state = timer.subscribe();

        timer.start(42).await.unwrap();
        state.changed().await.unwrap();
        assert!(state.borrow().running);
        assert_eq!(state.borrow().task_id, Some(42));

        timer.send(TimerCommand::Tick).await.unwrap();
        timer.send(TimerCommand::Tick).await.unwrap();
        assert_eq!(events.recv().await, Some(TimerEvent::Completed { task_id: 42 }));
        assert!(!timer.state().running);
    }

    #[tokio::test]
    async fn test_task_ends_when_handles_dropped() {
        let (timer, _events, join) = TimerHandle::spawn(10);
        let ticker = timer.spawn_ticker(Duration::from_millis(5));
        drop(timer);
        join.await.unwrap();
        ticker.await.unwrap();
    }

    #[tokio::test]
    async fn test_ticker_drives_countdown() {
        let (timer, mut events, _join) = TimerHandle::spawn(3);
        let _ticker = timer.spawn_ticker(Duration::from_millis(10));
        timer.start(5).await.unwrap();
        assert_eq!(events.recv().await, Some(TimerEvent::Completed { task_id: 5 }));
    }
}
