//! Gesture tracking
//!
//! Turns raw input into cell triggers:
//!
//! - A pointer or touch press triggers the cell under it. Dragging while
//!   pressed triggers again only on entering a different cell.
//! - A key press triggers its bound cell once. Auto-repeat and presses of
//!   an already-held key are ignored until the key is released.

use rustc_hash::FxHashSet;
use tessel_core::Point;

use crate::grid::GridLayout;
use crate::input::{InputEvent, KeyState, KeyboardEvent, MouseButton, MouseEvent, TouchEvent};
use crate::keymap::KeyMap;

/// Where a gesture came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureSource {
    Pointer,
    Touch,
    Key,
}

/// A request to trigger one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub cell: usize,
    /// Input position; the window center for key presses
    pub origin: Point,
    /// Clock seconds when the gesture happened
    pub at: f32,
    pub source: GestureSource,
}

/// Stateful input to gesture translation
#[derive(Debug, Default)]
pub struct GestureTracker {
    keymap: KeyMap,
    /// Pointer or touch is down
    dragging: bool,
    /// Last cell a drag triggered, so moves within it stay quiet
    last_cell: Option<usize>,
    held_keys: FxHashSet<char>,
}

impl GestureTracker {
    pub fn new(keymap: KeyMap) -> Self {
        Self {
            keymap,
            dragging: false,
            last_cell: None,
            held_keys: FxHashSet::default(),
        }
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one input event; returns a gesture when a cell should fire
    pub fn handle(&mut self, event: &InputEvent, grid: &GridLayout, now: f32) -> Option<Gesture> {
        match event {
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, grid, now),
            InputEvent::Touch(touch) => self.handle_touch(touch, grid, now),
            InputEvent::Keyboard(key) => self.handle_key(key, grid, now),
        }
    }

    /// Forget drag and held-key state, e.g. on focus loss
    pub fn reset(&mut self) {
        self.end_drag();
        self.held_keys.clear();
    }

    fn handle_mouse(&mut self, event: &MouseEvent, grid: &GridLayout, now: f32) -> Option<Gesture> {
        match *event {
            MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                y,
            } => self.press(Point::new(x, y), grid, now, GestureSource::Pointer),
            MouseEvent::Moved { x, y } if self.dragging => {
                self.drag(Point::new(x, y), grid, now, GestureSource::Pointer)
            }
            MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                ..
            }
            | MouseEvent::Left => {
                self.end_drag();
                None
            }
            _ => None,
        }
    }

    fn handle_touch(&mut self, event: &TouchEvent, grid: &GridLayout, now: f32) -> Option<Gesture> {
        match *event {
            TouchEvent::Started { x, y, .. } => {
                self.press(Point::new(x, y), grid, now, GestureSource::Touch)
            }
            TouchEvent::Moved { x, y, .. } if self.dragging => {
                self.drag(Point::new(x, y), grid, now, GestureSource::Touch)
            }
            TouchEvent::Ended { .. } | TouchEvent::Cancelled { .. } => {
                self.end_drag();
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, event: &KeyboardEvent, grid: &GridLayout, now: f32) -> Option<Gesture> {
        let c = event.key.to_char()?;
        match event.state {
            KeyState::Released => {
                self.held_keys.remove(&c);
                None
            }
            KeyState::Pressed => {
                if event.repeat || event.modifiers.is_shortcut() {
                    return None;
                }
                let cell = self.keymap.cell_for_char(c)?;
                if !self.held_keys.insert(c) {
                    return None;
                }
                Some(Gesture {
                    cell,
                    origin: grid.center(),
                    at: now,
                    source: GestureSource::Key,
                })
            }
        }
    }

    fn press(&mut self, point: Point, grid: &GridLayout, now: f32, source: GestureSource) -> Option<Gesture> {
        self.dragging = true;
        self.last_cell = None;
        self.drag(point, grid, now, source)
    }

    fn drag(&mut self, point: Point, grid: &GridLayout, now: f32, source: GestureSource) -> Option<Gesture> {
        let cell = grid.cell_at(point)?;
        if self.last_cell == Some(cell) {
            return None;
        }
        self.last_cell = Some(cell);
        Some(Gesture {
            cell,
            origin: point,
            at: now,
            source,
        })
    }

    fn end_drag(&mut self) {
        self.dragging = false;
        self.last_cell = None;
    }
}
