//! Tessel Platform Layer
//!
//! Platform-agnostic input types and the logic that turns them into cell
//! triggers.
//!
//! - [`InputEvent`] - mouse, keyboard, and touch input
//! - [`Event`] - input, window, and frame events a host feeds the session
//! - [`KeyMap`] - the 36-key note layout
//! - [`GridLayout`] - hit testing over the trigger grid
//! - [`GestureTracker`] - press, drag, and key-repeat handling
//!
//! # Example
//!
//! ```rust
//! use tessel_core::Size;
//! use tessel_platform::*;
//!
//! let grid = GridLayout::new(12, 3, Size::new(1200.0, 300.0)).unwrap();
//! let mut tracker = GestureTracker::new(KeyMap::standard());
//!
//! let press = InputEvent::Keyboard(KeyboardEvent::pressed(Key::Char('q')));
//! let gesture = tracker.handle(&press, &grid, 0.0).unwrap();
//! assert_eq!(gesture.cell, 24);
//! ```

mod error;
mod event;
mod gesture;
mod grid;
mod input;
mod keymap;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, WindowEvent};
pub use gesture::{Gesture, GestureSource, GestureTracker};
pub use grid::{GridLayout, DEFAULT_COLS, DEFAULT_ROWS};
pub use input::{
    InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent, TouchEvent,
};
pub use keymap::{KeyMap, STANDARD_ROWS};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, WindowEvent};
    pub use crate::gesture::{Gesture, GestureSource, GestureTracker};
    pub use crate::grid::GridLayout;
    pub use crate::input::{
        InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent, TouchEvent,
    };
    pub use crate::keymap::KeyMap;
}
