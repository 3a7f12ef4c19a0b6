//! Animation scheduler: a Running/Stopped state machine owning at most one repeating timer.
//!
//! Time is passed in explicitly as [`Instant`]s, so hosts decide how to wait
//! (sleep, GUI repaint request) and tests can step a virtual clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Handle of one repeating timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    id: u64,
    period: Duration,
    next_fire: Instant,
}

impl IntervalTimer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_fire(&self) -> Instant {
        self.next_fire
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    state: RunState,
    interval: Duration,
    timer: Option<IntervalTimer>,
    next_id: u64,
    cancelled: u64,
}

impl Scheduler {
    /// New scheduler in the Running state with its timer armed at `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        let mut s = Self {
            state: RunState::Stopped,
            interval,
            timer: None,
            next_id: 1,
            cancelled: 0,
        };
        s.start(now);
        s
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn active_timer(&self) -> Option<&IntervalTimer> {
        self.timer.as_ref()
    }

    /// Number of timers cancelled so far.
    pub fn cancelled_timers(&self) -> u64 {
        self.cancelled
    }

    /// Flip between Running and Stopped, returning the new state.
    pub fn toggle(&mut self, now: Instant) -> RunState {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(now),
        }
        self.state
    }

    /// Store a new period; a running scheduler re-arms at it immediately.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_running() {
            self.start(now);
        }
    }

    /// Whether a tick is due at `now`. Fires at most once per call; a late poll
    /// reschedules from `now` instead of replaying missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if now < timer.next_fire {
            return false;
        }
        timer.next_fire += timer.period;
        if timer.next_fire <= now {
            timer.next_fire = now + timer.period;
        }
        true
    }

    /// Time left until the next tick, `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.timer
            .as_ref()
            .map(|t| t.next_fire.saturating_duration_since(now))
    }

    fn start(&mut self, now: Instant) {
        self.cancel();
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("timer {id} started, period {:?}", self.interval);
        self.timer = Some(IntervalTimer {
            id,
            period: self.interval,
            next_fire: now + self.interval,
        });
        self.state = RunState::Running;
    }

    fn stop(&mut self) {
        self.cancel();
        self.state = RunState::Stopped;
    }

    fn cancel(&mut self) {
        if let Some(old) = self.timer.take() {
            log::debug!("timer {} cancelled", old.id);
            self.cancelled += 1;
        }
    }
}
