use specs::Entity;

use super::id::NodeId;
use super::state::NodeState;
use super::surface::Surface;
use crate::touch::PointInfo;

/// Half of a pixel extent, rounded down like integer pixel math.
pub fn half_extent(extent: u32) -> f32 {
    (extent / 2) as f32
}

/// A transformable, touch-interactive element of the scene.
///
/// Variants own a [`NodeState`] and answer the rendering, touch and
/// capability questions. Everything else is provided.
pub trait TouchNode: Send + Sync + 'static {
    fn state(&self) -> &NodeState;

    fn state_mut(&mut self) -> &mut NodeState;

    /// Current pixels of the node, without its transform applied.
    fn renderable(&self) -> Surface;

    /// Width of the renderable, in pixels.
    fn width(&self) -> u32;

    /// Height of the renderable, in pixels.
    fn height(&self) -> u32;

    /// Returns `true` when the sample is fully handled here and the gesture
    /// controller must not apply its default drag/scale/rotate.
    fn on_touch(&mut self, point: &PointInfo) -> bool;

    fn is_scalable(&self) -> bool;

    fn is_rotatable(&self) -> bool;

    fn is_draggable(&self) -> bool;

    /// Whether the node may only be placed inside its parent.
    fn is_parent_locked(&self) -> bool;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn id(&self) -> NodeId {
        self.state().id()
    }

    /// `<type name>:<id>`, unique for the lifetime of the id generator.
    fn qualified_id(&self) -> String {
        format!("{}:{}", self.type_name(), self.id())
    }

    /// Not gated by [`is_rotatable`](TouchNode::is_rotatable); the gesture
    /// controller checks the flag itself.
    fn set_angle(&mut self, angle: f32) {
        self.state_mut().set_angle(angle);
    }

    /// Ignored unless the node is scalable.
    fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        if self.is_scalable() {
            self.state_mut().set_scale(scale_x, scale_y);
        }
    }

    fn set_relative_position(&mut self, x: f32, y: f32) {
        self.state_mut().set_relative_position(x, y);
    }

    /// Sets the point child nodes are positioned from and the node rotates
    /// and scales around. Once set, the surface center is no longer used.
    fn set_pivot(&mut self, x: f32, y: f32) {
        self.state_mut().set_pivot(x, y);
    }

    fn pivot_x_relative_to_center(&self) -> f32 {
        self.state().pivot_x() - half_extent(self.width())
    }

    fn pivot_y_relative_to_center(&self) -> f32 {
        self.state().pivot_y() - half_extent(self.height())
    }

    /// Point of the surface placed at the relative position: the custom pivot
    /// when one is set, else the center.
    fn effective_pivot(&self) -> (f32, f32) {
        let s = self.state();
        if s.is_custom_pivot_used() {
            (s.pivot_x(), s.pivot_y())
        } else {
            (half_extent(self.width()), half_extent(self.height()))
        }
    }

    fn has_parent(&self) -> bool {
        self.state().parent().is_some()
    }

    fn parent(&self) -> Option<Entity> {
        self.state().parent()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::node::{surface, IdGenerator};
    use crate::touch::TouchAction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use rand::Rng;
    use specs::prelude::*;

    /// Bare node with switchable capabilities.
    pub struct TestNode {
        pub state: NodeState,
        pub size: (u32, u32),
        pub scalable: bool,
        pub rotatable: bool,
        pub consume: bool,
        pub consume_moves: bool,
        pub touches: Arc<AtomicUsize>,
    }

    impl TestNode {
        pub fn new(ids: &IdGenerator, width: u32, height: u32) -> Self {
            TestNode::with_state(NodeState::new(ids), width, height)
        }

        pub fn child(ids: &IdGenerator, parent: Entity, width: u32, height: u32) -> Self {
            TestNode::with_state(NodeState::with_parent(ids, parent), width, height)
        }

        fn with_state(state: NodeState, width: u32, height: u32) -> Self {
            TestNode {
                state,
                size: (width, height),
                scalable: true,
                rotatable: true,
                consume: false,
                consume_moves: false,
                touches: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl TouchNode for TestNode {
        fn state(&self) -> &NodeState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut NodeState {
            &mut self.state
        }
        fn renderable(&self) -> Surface {
            surface::solid(self.size.0, self.size.1, surface::rgba(0, 0, 0, 255))
        }
        fn width(&self) -> u32 {
            self.size.0
        }
        fn height(&self) -> u32 {
            self.size.1
        }
        fn on_touch(&mut self, point: &PointInfo) -> bool {
            self.touches.fetch_add(1, Ordering::Relaxed);
            self.consume || (self.consume_moves && point.action() == TouchAction::Move)
        }
        fn is_scalable(&self) -> bool {
            self.scalable
        }
        fn is_rotatable(&self) -> bool {
            self.rotatable
        }
        fn is_draggable(&self) -> bool {
            true
        }
        fn is_parent_locked(&self) -> bool {
            false
        }
    }

    #[test]
    fn compass_scenario() {
        let ids = IdGenerator::new();
        let mut a = TestNode::new(&ids, 100, 50);
        a.scalable = false;

        a.set_scale(2.0, 2.0);
        assert_eq!((1.0, 1.0), (a.state().scale_x(), a.state().scale_y()));

        a.set_angle(45.0);
        assert_eq!(45.0, a.state().angle());

        a.set_pivot(60.0, 10.0);
        assert!(a.state().is_custom_pivot_used());
        assert_eq!(10.0, a.pivot_x_relative_to_center());
        assert_eq!(-15.0, a.pivot_y_relative_to_center());
    }

    #[test]
    fn scale_applies_when_scalable() {
        let ids = IdGenerator::new();
        let mut a = TestNode::new(&ids, 10, 10);
        a.set_scale(2.0, 3.0);
        assert_eq!((2.0, 3.0), (a.state().scale_x(), a.state().scale_y()));
        a.scalable = false;
        a.set_scale(5.0, 5.0);
        assert_eq!((2.0, 3.0), (a.state().scale_x(), a.state().scale_y()));
    }

    #[test]
    fn angle_is_never_gated() {
        let ids = IdGenerator::new();
        for &rotatable in &[true, false] {
            let mut a = TestNode::new(&ids, 10, 10);
            a.rotatable = rotatable;
            a.set_angle(-30.0);
            assert_eq!(-30.0, a.state().angle());
        }
    }

    #[test]
    fn pivot_survives_repositioning() {
        let ids = IdGenerator::new();
        let mut a = TestNode::new(&ids, 10, 10);
        a.set_pivot(-3.0, 7.0);
        a.set_relative_position(100.0, 200.0);
        assert!(a.state().is_custom_pivot_used());
        assert_eq!((-3.0, 7.0), (a.state().pivot_x(), a.state().pivot_y()));
        assert_eq!((100.0, 200.0), (a.state().relative_x(), a.state().relative_y()));
    }

    #[test]
    fn pivot_relative_to_center_for_any_size() {
        let ids = IdGenerator::new();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let w = rng.gen_range(0u32, 4096);
            let h = rng.gen_range(0u32, 4096);
            let px = rng.gen_range(-500i32, 500) as f32;
            let py = rng.gen_range(-500i32, 500) as f32;
            let mut a = TestNode::new(&ids, w, h);
            a.set_pivot(px, py);
            assert_eq!(px - (w / 2) as f32, a.pivot_x_relative_to_center());
            assert_eq!(py - (h / 2) as f32, a.pivot_y_relative_to_center());
        }
    }

    #[test]
    fn effective_pivot_defaults_to_center() {
        let ids = IdGenerator::new();
        let mut a = TestNode::new(&ids, 101, 40);
        assert_eq!((50.0, 20.0), a.effective_pivot());
        a.set_pivot(1.0, 2.0);
        assert_eq!((1.0, 2.0), a.effective_pivot());
    }

    #[test]
    fn parent_handles() {
        let mut w = World::new();
        let p = w.create_entity().build();
        let ids = IdGenerator::new();
        let root = TestNode::new(&ids, 1, 1);
        let child = TestNode::child(&ids, p, 1, 1);
        assert!(!root.has_parent());
        assert_eq!(None, TouchNode::parent(&root));
        assert!(child.has_parent());
        assert_eq!(Some(p), TouchNode::parent(&child));
    }

    #[test]
    fn ids_are_distinct_across_constructors() {
        let mut w = World::new();
        let p = w.create_entity().build();
        let ids = IdGenerator::new();
        let mut rng = rand::thread_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let node = if rng.gen() {
                TestNode::new(&ids, 1, 1)
            } else {
                TestNode::child(&ids, p, 1, 1)
            };
            assert!(seen.insert(node.qualified_id()));
        }
    }

    #[test]
    fn qualified_id_names_the_type() {
        let ids = IdGenerator::new();
        let a = TestNode::new(&ids, 1, 1);
        let b: Box<dyn TouchNode> = Box::new(TestNode::new(&ids, 1, 1));
        assert!(a.qualified_id().ends_with("TestNode:0"));
        assert!(b.qualified_id().ends_with("TestNode:1"));
        assert!(b.type_name().contains("touch_node"));
    }
}
