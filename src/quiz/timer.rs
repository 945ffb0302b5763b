use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::quiz::session::{AdvanceToken, Generation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(Generation),
    Advance(AdvanceToken),
}

/// Aborts the wrapped task when dropped, so a replaced timer never keeps firing.
#[derive(Debug)]
pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Sends `Tick(generation)` every `period`, starting one period from now.
pub fn start_ticker<E>(generation: Generation, period: Duration, tx: UnboundedSender<E>) -> TaskGuard
where
    E: From<TimerEvent> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if tx.send(TimerEvent::Tick(generation).into()).is_err() {
                break;
            }
        }
    });
    TaskGuard { handle }
}

/// Sends `Advance(token)` once, after `delay`.
pub fn schedule_advance<E>(token: AdvanceToken, delay: Duration, tx: UnboundedSender<E>) -> TaskGuard
where
    E: From<TimerEvent> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        time::sleep(delay).await;
        let _ = tx.send(TimerEvent::Advance(token).into());
    });
    TaskGuard { handle }
}
