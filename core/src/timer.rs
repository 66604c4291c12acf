use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Monotonic time reading, relative to an arbitrary origin fixed by the source.
pub trait TickSource {
    fn now(&self) -> Duration;
}

/// Wall clock, works natively and in the browser.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: web_time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Host-driven clock; clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs.max(0.)));
    }
}

impl TickSource for ManualClock {
    fn now(&self) -> Duration {
        self.offset.get()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
    Expired,
}

impl TimerState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// How [`CountdownTimer::add_time`] treats the total budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtendPolicy {
    /// Remaining time never exceeds the total.
    ClampToTotal,
    Unbounded,
}

impl Default for ExtendPolicy {
    fn default() -> Self {
        Self::ClampToTotal
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    Running { remaining: f64 },
    /// Emitted once, on the frame the countdown reaches zero.
    Expired,
    /// Timer is idle, stopped or already expired.
    Inactive { remaining: f64 },
}

#[derive(Clone, Debug)]
pub struct CountdownTimer<C = SystemClock> {
    clock: C,
    total: f64,
    policy: ExtendPolicy,
    state: TimerState,
    started_at: Duration,
    /// Seconds granted through `add_time` since the last start.
    extension: f64,
    /// Remaining time frozen when the timer leaves `Running`.
    frozen: f64,
}

impl<C: TickSource> CountdownTimer<C> {
    pub fn new(clock: C, total_seconds: u32) -> Self {
        Self::with_policy(clock, total_seconds, ExtendPolicy::default())
    }

    pub fn with_policy(clock: C, total_seconds: u32, policy: ExtendPolicy) -> Self {
        let total = f64::from(total_seconds);
        Self {
            clock,
            total,
            policy,
            state: TimerState::Idle,
            started_at: Duration::ZERO,
            extension: 0.,
            frozen: total,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn policy(&self) -> ExtendPolicy {
        self.policy
    }

    /// Begins a fresh countdown from the total, no-op while running.
    pub fn start(&mut self) {
        if self.state.is_running() {
            return;
        }
        self.started_at = self.clock.now();
        self.extension = 0.;
        self.frozen = self.total;
        self.state = TimerState::Running;
        log::debug!("Countdown started, {}s", self.total);
    }

    /// Leaves the timer stopped without signalling expiry; repeated calls do nothing.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.frozen = self.live_remaining();
            self.state = TimerState::Stopped;
            log::debug!("Countdown stopped with {:.2}s left", self.frozen);
        }
    }

    pub fn tick(&mut self) -> Tick {
        if !self.state.is_running() {
            return Tick::Inactive {
                remaining: self.frozen,
            };
        }
        let remaining = self.live_remaining();
        if remaining <= 0. {
            self.frozen = 0.;
            self.state = TimerState::Expired;
            log::debug!("Countdown expired");
            Tick::Expired
        } else {
            Tick::Running { remaining }
        }
    }

    /// Grants extra seconds to a running countdown, returns the new remaining time.
    pub fn add_time(&mut self, secs: f64) -> f64 {
        if !self.state.is_running() || secs <= 0. {
            return self.remaining();
        }
        self.extension += secs;
        if self.policy == ExtendPolicy::ClampToTotal {
            self.extension = self.extension.min(self.elapsed_since_start());
        }
        self.live_remaining()
    }

    pub fn remaining(&self) -> f64 {
        if self.state.is_running() {
            self.live_remaining()
        } else {
            self.frozen
        }
    }

    /// Remaining seconds rounded up, for display.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining().ceil() as u32
    }

    /// Time used out of the budget.
    pub fn elapsed(&self) -> f64 {
        (self.total - self.remaining()).max(0.)
    }

    pub fn percent(&self) -> f64 {
        if self.total <= 0. {
            return 0.;
        }
        (self.remaining() / self.total * 100.).clamp(0., 100.)
    }

    fn elapsed_since_start(&self) -> f64 {
        self.clock.now().saturating_sub(self.started_at).as_secs_f64()
    }

    fn live_remaining(&self) -> f64 {
        (self.total + self.extension - self.elapsed_since_start()).max(0.)
    }
}
