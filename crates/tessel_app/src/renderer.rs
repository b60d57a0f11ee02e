//! Renderer seam
//!
//! The coordinator asks a [`Renderer`] for one visual per trigger and hands
//! the returned handle to the shape registry. [`SceneRenderer`] builds
//! catalog figures into the retained scene.

use tessel_animation::VisualHandle;
use tessel_core::{Color, Point, Size};

use crate::figures::{self, MotionHints, CELL_COUNT};
use crate::scene::{SceneHandle, SceneNode, ShapeNode};

/// A freshly built visual and the motion it asks for
#[derive(Debug)]
pub struct Rendered<H> {
    pub handle: H,
    pub hints: MotionHints,
}

/// Builds the visual for a cell
pub trait Renderer {
    type Handle: VisualHandle;

    /// Cells this renderer can build; triggers past it are rejected
    fn cell_count(&self) -> usize;

    /// Build the visual for `cell` at `anchor`. Only called for cells below
    /// [`Renderer::cell_count`].
    fn render(
        &mut self,
        cell: usize,
        anchor: Point,
        color: Color,
        viewport: Size,
    ) -> Rendered<Self::Handle>;

    /// The background moved on; renderers without a backdrop ignore this
    fn set_background(&mut self, _color: Color) {}
}

/// Places catalog figures into a [`Scene`](crate::scene::Scene)
pub struct SceneRenderer {
    scene: SceneHandle,
}

impl SceneRenderer {
    pub fn new(scene: SceneHandle) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &SceneHandle {
        &self.scene
    }
}

impl Renderer for SceneRenderer {
    type Handle = ShapeNode;

    fn cell_count(&self) -> usize {
        CELL_COUNT
    }

    fn render(&mut self, cell: usize, anchor: Point, color: Color, viewport: Size) -> Rendered<ShapeNode> {
        let figure = figures::build_wrapping(cell, viewport, color);
        let hints = figure.hints;
        tracing::debug!(cell, figure = figure.name, marks = figure.marks.len(), "render");
        let handle = self.scene.insert(SceneNode::new(figure, Some(cell), anchor));
        Rendered { handle, hints }
    }

    fn set_background(&mut self, color: Color) {
        self.scene.set_background(color);
    }
}
