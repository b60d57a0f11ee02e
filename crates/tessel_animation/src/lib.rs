//! Tessel Animation Engine
//!
//! Shape lifecycle and timeline animation for the trigger grid.
//!
//! # Features
//!
//! - **Easing**: back, elastic, and bounce curves, total over `f32`
//! - **Motion Envelopes**: enter / hold / exit phases with closed sets of
//!   named kinds
//! - **Shape Registry**: bounded, ordered live set with per-cell restart
//!   and FIFO eviction
//! - **Frame Driver**: fixed-step ticking against an injectable clock
//! - **Jitter**: injectable randomness for per-shape variation
//!
//! # Example
//!
//! ```rust
//! use tessel_animation::{evaluate, EnterKind, ShapeParams};
//! use tessel_core::{Point, Size};
//!
//! let params = ShapeParams::new(Point::new(960.0, 540.0)).enter(EnterKind::Zoom);
//! let start = evaluate(&params, 0.0, 0.0, 0, Size::new(1920.0, 1080.0));
//! assert_eq!(start.scale, 0.0);
//! ```

pub mod driver;
pub mod easing;
pub mod envelope;
pub mod jitter;
pub mod registry;

pub use driver::{
    Clock, FrameDriver, ManualClock, SystemClock, CLOCK_PERIOD_SECS, DEFAULT_FRAME_STEP,
};
pub use easing::Easing;
pub use envelope::{
    evaluate, EnterKind, ExitKind, HoldMotion, Phase, PhaseCurve, PhaseTransform, ShapeParams,
    ShapeTransform, UnknownKind, DEFAULT_ENTER_END, DEFAULT_EXIT_START, DEFAULT_ROTATION_SPEED,
};
pub use jitter::{FixedJitter, JitterSource, SeededJitter, SequenceJitter};
pub use registry::{
    InsertOutcome, ShapeRecord, ShapeRegistry, TickReport, VisualHandle, DEFAULT_LIFETIME,
    MAX_LIVE,
};
