//! Confirmation window and the task that drives it in real time

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval_at, Instant};
use tokio_util::sync::CancellationToken;

/// Seconds a selected room is held on the confirmation step
pub const CONFIRMATION_WINDOW_SECS: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running(u32),
    /// Reported once, on the tick that reaches zero
    Expired,
    AlreadyExpired,
}

/// Countdown from [`CONFIRMATION_WINDOW_SECS`], one per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationWindow {
    remaining: u32,
}

impl ConfirmationWindow {
    pub fn new() -> Self {
        Self {
            remaining: CONFIRMATION_WINDOW_SECS,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining {
            0 => TickOutcome::AlreadyExpired,
            1 => {
                self.remaining = 0;
                TickOutcome::Expired
            }
            n => {
                self.remaining = n - 1;
                TickOutcome::Running(self.remaining)
            }
        }
    }

    /// `mm:ss`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

impl Default for ConfirmationWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Real-time ticker, cancelled when dropped
///
/// Elapsed ticks are counted from the clock, so a caller that was busy for a
/// while catches up in one go. The background interval task only wakes
/// waiters in [`Countdown::tick`].
#[derive(Debug)]
pub struct Countdown {
    started: Instant,
    period: Duration,
    delivered: u64,
    wake: mpsc::Receiver<()>,
    cancel: CancellationToken,
}

impl Countdown {
    /// Start ticking every `period`; the first tick comes one period from now
    pub fn start(period: Duration) -> Self {
        let (tx, wake) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let started = Instant::now();

        tokio::spawn(async move {
            let mut interval = interval_at(started + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("Countdown cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        match tx.try_send(()) {
                            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => {}
                            Err(mpsc::error::TrySendError::Closed(())) => break,
                        }
                    }
                }
            }
        });

        Self {
            started,
            period,
            delivered: 0,
            wake,
            cancel,
        }
    }

    /// Ticks elapsed since the last call to `due` or `tick`, without waiting
    pub fn due(&mut self) -> u64 {
        if self.cancel.is_cancelled() || self.period.is_zero() {
            return 0;
        }
        let elapsed = Instant::now().saturating_duration_since(self.started);
        let total = (elapsed.as_nanos() / self.period.as_nanos()) as u64;
        let due = total.saturating_sub(self.delivered);
        self.delivered = self.delivered.max(total);
        due
    }

    /// Wait for at least one tick and return how many elapsed, or `None`
    /// once the ticker stopped
    pub async fn tick(&mut self) -> Option<u64> {
        loop {
            if self.cancel.is_cancelled() {
                return None;
            }
            let due = self.due();
            if due > 0 {
                return Some(due);
            }
            self.wake.recv().await?;
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
