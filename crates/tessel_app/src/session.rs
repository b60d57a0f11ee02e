//! Performance session
//!
//! Owns the engine and its collaborators and routes platform events:
//!
//! - input goes through the gesture tracker to the coordinator
//! - frames tick the registry and expire cell highlights
//! - resizes move the grid and the figure anchor
//!
//! A host drives a session by feeding it [`Event`]s; a headless run uses a
//! [`ManualClock`](tessel_animation::ManualClock) and advances it between
//! frames.

use tessel_animation::{Clock, FrameDriver, JitterSource, SystemClock, TickReport};
use tessel_core::{Point, Size};
use tessel_platform::{
    ControlFlow, Event, Gesture, GestureSource, GestureTracker, GridLayout, KeyMap, WindowEvent,
};

use crate::audio::AudioSink;
use crate::config::StageConfig;
use crate::coordinator::{TriggerCoordinator, TriggerReport};
use crate::engine::Engine;
use crate::error::Result;
use crate::renderer::Renderer;

/// Running totals for a session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub triggers: u64,
    /// Triggers rejected for an unknown cell
    pub ignored: u64,
    pub restarted: u64,
    pub evicted: u64,
    pub reaped: u64,
}

/// A live performance
pub struct Session<R, A, J, C = SystemClock>
where
    R: Renderer,
    C: Clock,
{
    engine: Engine<R::Handle>,
    coordinator: TriggerCoordinator<R, A, J>,
    driver: FrameDriver<C>,
    tracker: GestureTracker,
    grid: GridLayout,
    stats: SessionStats,
}

impl<R, A, J, C> Session<R, A, J, C>
where
    R: Renderer,
    A: AudioSink,
    J: JitterSource,
    C: Clock,
{
    /// Validate `config` and build a session over a `viewport`-sized window
    pub fn new(
        config: &StageConfig,
        viewport: Size,
        renderer: R,
        audio: A,
        jitter: J,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        let grid = GridLayout::new(config.grid.cols, config.grid.rows, viewport)?;

        tracing::info!(
            cols = grid.cols(),
            rows = grid.rows(),
            width = viewport.width,
            height = viewport.height,
            max_live = config.engine.max_live,
            "session started"
        );

        Ok(Self {
            engine: Engine::new(config, viewport),
            coordinator: TriggerCoordinator::new(config, renderer, audio, jitter),
            driver: FrameDriver::new(clock, config.engine.frame_step_secs),
            tracker: GestureTracker::new(KeyMap::standard()),
            grid,
            stats: SessionStats::default(),
        })
    }

    pub fn engine(&self) -> &Engine<R::Handle> {
        &self.engine
    }

    pub fn coordinator(&self) -> &TriggerCoordinator<R, A, J> {
        &self.coordinator
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.driver.frames()
    }

    pub fn now_secs(&self) -> f32 {
        self.driver.now_secs()
    }

    pub fn clock_mut(&mut self) -> &mut C {
        self.driver.clock_mut()
    }

    /// Route one platform event
    pub fn handle(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Input(input) => {
                let now = self.driver.now_secs();
                if let Some(gesture) = self.tracker.handle(input, &self.grid, now) {
                    self.trigger(&gesture);
                }
            }
            Event::Frame => {
                self.frame();
            }
            Event::Window(WindowEvent::Resized { width, height }) => {
                self.resize(Size::new(*width, *height));
            }
            Event::Window(WindowEvent::Focused(false)) => {
                self.tracker.reset();
            }
            Event::Window(WindowEvent::Focused(true)) => {}
            Event::Window(WindowEvent::CloseRequested) => {
                tracing::info!(live = self.engine.registry().len(), "close requested");
                return ControlFlow::Exit;
            }
        }
        ControlFlow::Continue
    }

    /// Trigger a cell directly, as if its key were pressed
    pub fn trigger_cell(&mut self, cell: usize) -> Option<TriggerReport> {
        let gesture = Gesture {
            cell,
            origin: self.grid.center(),
            at: self.driver.now_secs(),
            source: GestureSource::Key,
        };
        self.trigger(&gesture)
    }

    /// Run one frame
    pub fn frame(&mut self) -> TickReport {
        let viewport = self.engine.viewport();
        let report = self.driver.frame(self.engine.registry_mut(), viewport);
        let now = self.driver.now_secs();
        self.engine.expire_presses(now);
        self.stats.reaped += report.reaped.len() as u64;
        report
    }

    /// Cell under a window position
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        self.grid.cell_at(point)
    }

    /// Destroy every live shape
    pub fn clear(&mut self) {
        self.engine.registry_mut().clear();
    }

    fn trigger(&mut self, gesture: &Gesture) -> Option<TriggerReport> {
        let Some(report) = self.coordinator.trigger(&mut self.engine, gesture) else {
            self.stats.ignored += 1;
            return None;
        };
        self.stats.triggers += 1;
        self.stats.restarted += u64::from(report.outcome.restarted.is_some());
        self.stats.evicted += report.outcome.evicted.len() as u64;
        Some(report)
    }

    fn resize(&mut self, size: Size) {
        match self.grid.resize(size) {
            Ok(()) => {
                tracing::debug!(width = size.width, height = size.height, "resized");
                self.engine.set_viewport(size);
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring resize");
            }
        }
    }
}
