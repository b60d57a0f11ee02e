//! Tessel Performance Surface
//!
//! A 12x3 grid of trigger cells. Each activation plays a short tone, steps
//! the background through its color loop, and spawns an animated geometric
//! figure at the center of the display.
//!
//! - [`Session`] - routes platform events into the engine
//! - [`TriggerCoordinator`] - one cell activation, end to end
//! - [`Engine`] - live shapes, background, highlights, viewport
//! - [`Scene`] - the retained display list a presenter draws
//! - [`StageConfig`] - TOML configuration
//!
//! # Example (Headless)
//!
//! ```rust
//! use tessel_app::prelude::*;
//! use tessel_animation::{FixedJitter, ManualClock};
//! use tessel_core::Size;
//!
//! let scene = Scene::default();
//! let mut session = Session::new(
//!     &StageConfig::default(),
//!     Size::new(1920.0, 1080.0),
//!     SceneRenderer::new(scene.handle()),
//!     NullSink,
//!     FixedJitter(0.5),
//!     ManualClock::new(0.0),
//! )
//! .unwrap();
//!
//! session.trigger_cell(4);
//! session.handle(&Event::Frame);
//! assert_eq!(scene.len(), 1);
//! ```

pub mod audio;
pub mod config;
pub mod coordinator;
pub mod engine;
mod error;
pub mod figures;
pub mod palette;
pub mod renderer;
pub mod scene;
pub mod session;

#[cfg(test)]
mod tests;

pub use audio::{AudioSink, NullSink, ToneSpec, TracingSink, Waveform};
pub use config::StageConfig;
pub use coordinator::{TriggerCoordinator, TriggerReport};
pub use engine::Engine;
pub use error::{ConfigError, Result, TesselError};
pub use renderer::{Rendered, Renderer, SceneRenderer};
pub use scene::{NodeId, Scene, SceneHandle, SceneNode, ShapeNode};
pub use session::{Session, SessionStats};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::audio::{AudioSink, NullSink, ToneSpec, TracingSink};
    pub use crate::config::StageConfig;
    pub use crate::coordinator::TriggerReport;
    pub use crate::error::{Result, TesselError};
    pub use crate::renderer::{Renderer, SceneRenderer};
    pub use crate::scene::{Scene, SceneHandle};
    pub use crate::session::{Session, SessionStats};

    // Platform events a host feeds the session
    pub use tessel_platform::{ControlFlow, Event, InputEvent, WindowEvent};
}
