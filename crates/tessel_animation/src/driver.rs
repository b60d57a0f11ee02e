//! Frame driver
//!
//! Ticks the shape registry once per display refresh. Lifetimes advance by
//! a fixed step per frame; hold motion reads the wall clock.

use std::time::Instant;

use tessel_core::Size;

use crate::registry::{ShapeRegistry, TickReport, VisualHandle};

/// Default per-frame lifetime step in seconds
pub const DEFAULT_FRAME_STEP: f32 = 0.016;

/// Period after which [`SystemClock`] readings wrap back to zero. Keeps
/// the `f32` reading well under a millisecond of resolution.
pub const CLOCK_PERIOD_SECS: f64 = 3600.0;

/// Source of wall-clock seconds
pub trait Clock {
    fn now_secs(&self) -> f32;
}

/// Monotonic clock measured from its creation, wrapping every
/// [`CLOCK_PERIOD_SECS`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f32 {
        wrap_secs(self.start.elapsed().as_secs_f64())
    }
}

/// Reduce an uptime into the clock period before narrowing it
fn wrap_secs(secs: f64) -> f32 {
    (secs % CLOCK_PERIOD_SECS) as f32
}

/// Clock that only moves when told to; for tests and headless runs
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    now: f32,
}

impl ManualClock {
    pub fn new(now: f32) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, secs: f32) {
        self.now += secs.max(0.0);
    }

    pub fn set(&mut self, now: f32) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f32 {
        self.now
    }
}

/// Drives a [`ShapeRegistry`] from display refreshes
#[derive(Debug)]
pub struct FrameDriver<C: Clock = SystemClock> {
    clock: C,
    step: f32,
    frames: u64,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C, step: f32) -> Self {
        Self {
            clock,
            step: step.max(0.0),
            frames: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current wall-clock reading
    pub fn now_secs(&self) -> f32 {
        self.clock.now_secs()
    }

    /// Run one frame: sample the clock once, then tick every record
    pub fn frame<H: VisualHandle>(
        &mut self,
        registry: &mut ShapeRegistry<H>,
        viewport: Size,
    ) -> TickReport {
        let clock = self.clock.now_secs();
        self.frames += 1;
        tracing::trace!(frame = self.frames, clock, live = registry.len(), "frame");
        registry.tick(self.step, clock, viewport)
    }
}

impl Default for FrameDriver<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new(), DEFAULT_FRAME_STEP)
    }
}
