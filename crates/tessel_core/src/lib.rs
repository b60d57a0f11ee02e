//! Tessel Core
//!
//! Foundational value types shared by every Tessel crate:
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`], [`Vec2`]
//! - **Transforms**: [`Affine2D`] for scene node placement
//! - **Color**: [`Color`] with hex parsing and luminance
//!
//! # Example
//!
//! ```rust
//! use tessel_core::{Color, Size};
//!
//! let viewport = Size::new(1920.0, 1080.0);
//! assert_eq!(viewport.center().x, 960.0);
//!
//! let gold = Color::from_hex(0xD4AF37);
//! assert_eq!(gold.to_string(), "#D4AF37");
//! ```

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Affine2D, Point, Rect, Size, Vec2};
