//! Retained scene
//!
//! The scene is the display list an external presenter draws each frame:
//! the background color plus one node per live figure. Figures reach it
//! through [`ShapeNode`] handles, which hold only a weak reference, so a
//! dropped scene never keeps handles alive and vice versa.
//!
//! Removing a node happens in exactly one place: [`ShapeNode`]'s `Drop`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tessel_animation::{ShapeTransform, VisualHandle};
use tessel_core::{Affine2D, Color, Point};

use crate::figures::{Figure, Mark};

new_key_type! {
    /// Handle to a node in the scene
    pub struct NodeId;
}

/// One placed figure
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: &'static str,
    pub cell: Option<usize>,
    pub marks: SmallVec<[Mark; 8]>,
    pub anchor: Point,
    /// Latest transform pushed by the animation engine
    pub transform: ShapeTransform,
}

impl SceneNode {
    /// A node at rest on its anchor. Nodes start invisible until the first
    /// frame positions them.
    pub fn new(figure: Figure, cell: Option<usize>, anchor: Point) -> Self {
        Self {
            name: figure.name,
            cell,
            marks: figure.marks,
            anchor,
            transform: ShapeTransform {
                scale: 0.0,
                translation: anchor,
                rotation: 0.0,
                opacity: 1.0,
            },
        }
    }

    /// Local to window coordinates
    pub fn affine(&self) -> Affine2D {
        Affine2D::from_scale_rotation_translation(
            self.transform.scale,
            self.transform.rotation,
            self.transform.translation,
        )
    }
}

struct SceneInner {
    nodes: SlotMap<NodeId, SceneNode>,
    /// Insertion order, for back-to-front drawing
    order: Vec<NodeId>,
    background: Color,
}

/// Owner of the display list
pub struct Scene {
    inner: Rc<RefCell<SceneInner>>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SceneInner {
                nodes: SlotMap::with_key(),
                order: Vec::new(),
                background,
            })),
        }
    }

    /// Weak handle for renderers and nodes
    pub fn handle(&self) -> SceneHandle {
        SceneHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn background(&self) -> Color {
        self.inner.borrow().background
    }

    pub fn set_background(&self, color: Color) {
        self.inner.borrow_mut().background = color;
    }

    pub fn node(&self, id: NodeId) -> Option<SceneNode> {
        self.inner.borrow().nodes.get(id).cloned()
    }

    /// Visit nodes back to front
    pub fn for_each_node(&self, mut f: impl FnMut(NodeId, &SceneNode)) {
        let inner = self.inner.borrow();
        for &id in &inner.order {
            if let Some(node) = inner.nodes.get(id) {
                f(id, node);
            }
        }
    }

    /// Cells of the nodes, back to front
    pub fn cells(&self) -> Vec<Option<usize>> {
        let mut cells = Vec::with_capacity(self.len());
        self.for_each_node(|_, node| cells.push(node.cell));
        cells
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

/// A weak handle to the scene
///
/// Operations on a dropped scene are no-ops.
#[derive(Clone)]
pub struct SceneHandle {
    inner: Weak<RefCell<SceneInner>>,
}

impl SceneHandle {
    /// Whether the scene still exists
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Add a node and return its handle
    pub fn insert(&self, node: SceneNode) -> ShapeNode {
        let id = self.inner.upgrade().map(|inner| {
            let mut guard = inner.borrow_mut();
            let id = guard.nodes.insert(node);
            guard.order.push(id);
            id
        });
        if id.is_none() {
            tracing::warn!("scene dropped; figure will not be displayed");
        }
        ShapeNode {
            id: id.unwrap_or_default(),
            scene: self.clone(),
        }
    }

    pub fn set_background(&self, color: Color) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().background = color;
        }
    }

    fn set_transform(&self, id: NodeId, transform: ShapeTransform) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(node) = inner.borrow_mut().nodes.get_mut(id) {
                node.transform = transform;
            }
        }
    }

    fn remove(&self, id: NodeId) {
        if let Some(inner) = self.inner.upgrade() {
            let mut guard = inner.borrow_mut();
            if guard.nodes.remove(id).is_some() {
                guard.order.retain(|&live| live != id);
            }
        }
    }
}

/// A live figure in the scene
///
/// The node leaves the scene when this handle is destroyed or dropped.
pub struct ShapeNode {
    id: NodeId,
    scene: SceneHandle,
}

impl ShapeNode {
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl VisualHandle for ShapeNode {
    fn apply(&mut self, transform: &ShapeTransform) {
        self.scene.set_transform(self.id, *transform);
    }

    fn destroy(self) {
        tracing::trace!(node = ?self.id, "destroying node");
    }
}

impl Drop for ShapeNode {
    fn drop(&mut self) {
        self.scene.remove(self.id);
    }
}

impl std::fmt::Debug for ShapeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeNode")
            .field("id", &self.id)
            .field("scene_alive", &self.scene.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figures;
    use tessel_core::Size;

    fn node(cell: usize) -> SceneNode {
        let figure = figures::build(cell, Size::new(800.0, 600.0), Color::WHITE).unwrap();
        SceneNode::new(figure, Some(cell), Point::new(400.0, 300.0))
    }

    #[test]
    fn test_insert_apply_destroy() {
        let scene = Scene::default();
        let handle = scene.handle();

        let mut shape = handle.insert(node(0));
        assert_eq!(scene.len(), 1);

        let transform = ShapeTransform {
            scale: 0.5,
            translation: Point::new(410.0, 300.0),
            rotation: 0.1,
            opacity: 0.8,
        };
        shape.apply(&transform);
        assert_eq!(scene.node(shape.id()).unwrap().transform, transform);

        shape.destroy();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let scene = Scene::default();
        let handle = scene.handle();
        let a = handle.insert(node(3));
        let b = handle.insert(node(1));
        let c = handle.insert(node(2));
        assert_eq!(scene.cells(), vec![Some(3), Some(1), Some(2)]);

        drop(b);
        assert_eq!(scene.cells(), vec![Some(3), Some(2)]);
        drop((a, c));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_handles_outlive_scene() {
        let scene = Scene::default();
        let handle = scene.handle();
        let mut shape = handle.insert(node(0));
        drop(scene);

        assert!(!handle.is_alive());
        shape.apply(&ShapeTransform {
            scale: 1.0,
            translation: Point::ZERO,
            rotation: 0.0,
            opacity: 1.0,
        });
        shape.destroy();

        // Inserting into a dropped scene yields an inert handle
        let orphan = handle.insert(node(1));
        assert_eq!(orphan.id(), NodeId::default());
    }

    #[test]
    fn test_affine_places_marks() {
        let mut n = node(0);
        n.transform.scale = 2.0;
        n.transform.translation = Point::new(100.0, 50.0);
        let p = n.affine().transform_point(Point::new(10.0, 0.0));
        assert!((p.x - 120.0).abs() < 1e-4);
        assert!((p.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_background() {
        let scene = Scene::new(Color::BLACK);
        scene.handle().set_background(Color::WHITE);
        assert_eq!(scene.background(), Color::WHITE);
    }
}
