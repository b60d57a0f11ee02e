//! Engine state
//!
//! Everything a performance mutates lives here, owned in one place and
//! passed by `&mut` to the coordinator and the frame driver.

use tessel_animation::{ShapeRegistry, VisualHandle};
use tessel_core::{Color, Point, Size};

use crate::config::StageConfig;
use crate::palette::BackgroundCycle;

/// One cell highlight, in clock seconds
#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    at: f32,
    secs: f32,
}

impl Press {
    /// A clock that reads earlier than `at` has wrapped; the press is over
    fn active(&self, now: f32) -> bool {
        now >= self.at && now - self.at < self.secs
    }
}

/// Live shapes, background, pressed cells, and viewport
#[derive(Debug)]
pub struct Engine<H: VisualHandle> {
    registry: ShapeRegistry<H>,
    background: BackgroundCycle,
    pressed: Vec<Option<Press>>,
    viewport: Size,
}

impl<H: VisualHandle> Engine<H> {
    pub fn new(config: &StageConfig, viewport: Size) -> Self {
        Self {
            registry: ShapeRegistry::with_limits(
                config.engine.max_live,
                config.engine.lifetime_secs,
            ),
            background: BackgroundCycle::new(),
            pressed: vec![None; config.grid.cell_count().unwrap_or_default()],
            viewport,
        }
    }

    pub fn registry(&self) -> &ShapeRegistry<H> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ShapeRegistry<H> {
        &mut self.registry
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background
    // ─────────────────────────────────────────────────────────────────────────

    pub fn background(&self) -> &BackgroundCycle {
        &self.background
    }

    /// Step the background loop; returns the new color
    pub fn advance_background(&mut self) -> Color {
        self.background.advance()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pressed indicators
    // ─────────────────────────────────────────────────────────────────────────

    /// Highlight `cell` for `secs` from `now`. A re-press extends the
    /// highlight.
    pub fn press(&mut self, cell: usize, now: f32, secs: f32) {
        if let Some(slot) = self.pressed.get_mut(cell) {
            *slot = Some(Press {
                at: now,
                secs: secs.max(0.0),
            });
        }
    }

    pub fn is_pressed(&self, cell: usize, now: f32) -> bool {
        matches!(self.pressed.get(cell), Some(Some(press)) if press.active(now))
    }

    /// Cells highlighted at `now`, ascending
    pub fn pressed_cells(&self, now: f32) -> Vec<usize> {
        (0..self.pressed.len())
            .filter(|&cell| self.is_pressed(cell, now))
            .collect()
    }

    /// Drop highlights no longer active at `now`; returns how many
    pub fn expire_presses(&mut self, now: f32) -> usize {
        let mut expired = 0;
        for slot in &mut self.pressed {
            if matches!(slot, Some(press) if !press.active(now)) {
                *slot = None;
                expired += 1;
            }
        }
        expired
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Viewport
    // ─────────────────────────────────────────────────────────────────────────

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Where new figures are anchored
    pub fn anchor(&self) -> Point {
        self.viewport.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_animation::ShapeTransform;

    struct Inert;

    impl VisualHandle for Inert {
        fn apply(&mut self, _transform: &ShapeTransform) {}
        fn destroy(self) {}
    }

    fn engine() -> Engine<Inert> {
        Engine::new(&StageConfig::default(), Size::new(1200.0, 300.0))
    }

    #[test]
    fn test_new_takes_limits_from_config() {
        let mut config = StageConfig::default();
        config.engine.max_live = 5;
        config.engine.lifetime_secs = 2.0;
        let engine: Engine<Inert> = Engine::new(&config, Size::new(100.0, 100.0));
        assert_eq!(engine.registry().max_live(), 5);
        assert_eq!(engine.registry().lifetime(), 2.0);
        assert_eq!(engine.background().index(), 0);
    }

    #[test]
    fn test_press_expires() {
        let mut engine = engine();
        engine.press(3, 1.0, 0.4);
        assert!(engine.is_pressed(3, 1.2));
        assert_eq!(engine.pressed_cells(1.2), vec![3]);

        assert_eq!(engine.expire_presses(1.3), 0);
        assert_eq!(engine.expire_presses(1.45), 1);
        assert!(!engine.is_pressed(3, 1.2));
        assert!(engine.pressed_cells(1.5).is_empty());
    }

    #[test]
    fn test_press_ends_when_clock_wraps() {
        let mut engine = engine();
        engine.press(5, 3599.9, 0.4);
        assert!(engine.is_pressed(5, 3600.0));

        // Clock came back around to a small reading
        assert!(!engine.is_pressed(5, 0.1));
        assert_eq!(engine.expire_presses(0.1), 1);
        assert!(engine.pressed_cells(0.1).is_empty());
    }

    #[test]
    fn test_press_out_of_range_is_ignored() {
        let mut engine = engine();
        engine.press(99, 0.0, 1.0);
        assert!(!engine.is_pressed(99, 0.5));
        assert!(engine.pressed_cells(0.5).is_empty());
    }

    #[test]
    fn test_anchor_follows_viewport() {
        let mut engine = engine();
        assert_eq!(engine.anchor(), Point::new(600.0, 150.0));
        engine.set_viewport(Size::new(800.0, 600.0));
        assert_eq!(engine.anchor(), Point::new(400.0, 300.0));
    }
}
