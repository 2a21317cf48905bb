//! Frame loop that drives one animation against one surface.
//!
//! Each tick runs exactly one `update` followed by one `render`, reading the
//! surface size fresh. Motion is per frame, not per elapsed time: there is no
//! catch-up when frames arrive late.
//!
//! Hosts either call [`AnimationScheduler::tick`] from their own refresh
//! callback (the browser's `requestAnimationFrame`), or hand the scheduler a
//! [`FrameSource`] and let [`AnimationScheduler::run`] loop.

use std::thread;
use std::time::{Duration, Instant};

use crate::animation::Animation;
use crate::surface::Surface;

/// Lifecycle of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, no tick has run yet.
    Idle,
    /// Ticking. In the browser this lasts until the page goes away.
    Running,
    /// Stopped explicitly or by the tick limit. Terminal.
    Stopped,
}

/// Blocks until the host's next refresh opportunity.
pub trait FrameSource {
    /// Waits for the next frame. Returns `false` once the host stops
    /// producing frames.
    fn next_frame(&mut self) -> bool;
}

/// Yields frames back to back without waiting.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl FrameSource for Immediate {
    fn next_frame(&mut self) -> bool {
        true
    }
}

/// Yields frames at a fixed rate, sleeping out the rest of each interval.
///
/// Late frames are not made up: the next deadline is measured from when the
/// late frame was delivered.
#[derive(Debug, Clone)]
pub struct FixedRate {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FixedRate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
        }
    }

    /// Interval for `fps` frames per second. Zero fps means no waiting.
    pub fn per_second(fps: u32) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameSource for FixedRate {
    fn next_frame(&mut self) -> bool {
        let now = Instant::now();
        if let Some(deadline) = self.next_deadline {
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
        self.next_deadline = Some(Instant::now() + self.interval);
        true
    }
}

/// Runs one animation's update→render cycle once per frame.
pub struct AnimationScheduler<A> {
    animation: A,
    state: SchedulerState,
    ticks: u64,
    tick_limit: Option<u64>,
}

impl<A: Animation> AnimationScheduler<A> {
    /// Creates an idle scheduler with no tick limit.
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            state: SchedulerState::Idle,
            ticks: 0,
            tick_limit: None,
        }
    }

    /// Stops automatically after `limit` ticks.
    pub fn with_tick_limit(mut self, limit: u64) -> Self {
        self.tick_limit = Some(limit);
        if limit == 0 {
            self.state = SchedulerState::Stopped;
        }
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Moves to `Stopped`. Later ticks do nothing.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            log::debug!("scheduler stopped after {} ticks", self.ticks);
        }
        self.state = SchedulerState::Stopped;
    }

    /// Runs one update→render cycle against the surface's current size.
    ///
    /// The first call moves `Idle` to `Running`. Returns the state after the
    /// tick so a refresh callback can decide whether to re-arm itself.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> SchedulerState {
        match self.state {
            SchedulerState::Stopped => return self.state,
            SchedulerState::Idle => {
                log::debug!("scheduler started ({} entities)", self.animation.len());
                self.state = SchedulerState::Running;
            }
            SchedulerState::Running => {}
        }

        let size = surface.size();
        self.animation.update(size);
        self.animation.render(surface);
        self.ticks += 1;

        if self.tick_limit.is_some_and(|limit| self.ticks >= limit) {
            self.stop();
        }
        self.state
    }

    /// Ticks once per frame from `frames` until stopped or the source ends.
    ///
    /// Returns the number of ticks run by this call.
    pub fn run<F: FrameSource + ?Sized>(
        &mut self,
        surface: &mut dyn Surface,
        frames: &mut F,
    ) -> u64 {
        let start = self.ticks;
        while self.state != SchedulerState::Stopped && frames.next_frame() {
            self.tick(surface);
        }
        self.ticks - start
    }
}
