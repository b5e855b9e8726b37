use cgmath::{Point2, Vector2};
use specs::Entity;

use super::id::{IdGenerator, NodeId};

/// Transform state shared by every node variant.
///
/// Variants embed one of these and expose it through
/// [`TouchNode::state`](super::TouchNode::state). Mutation goes through the
/// trait so that capability gating is applied in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeState {
    id: NodeId,
    angle: f32,
    scale: Vector2<f32>,
    relative: Point2<f32>,
    pivot: Point2<f32>,
    custom_pivot: bool,
    parent: Option<Entity>,
}

impl NodeState {
    /// State of a node without parent.
    pub fn new(ids: &IdGenerator) -> Self {
        NodeState {
            id: ids.next(),
            angle: 0.0,
            scale: Vector2::new(1.0, 1.0),
            relative: Point2::new(0.0, 0.0),
            pivot: Point2::new(0.0, 0.0),
            custom_pivot: false,
            parent: None,
        }
    }

    /// State of a node positioned relative to `parent`. The handle does not
    /// keep the parent alive.
    pub fn with_parent(ids: &IdGenerator, parent: Entity) -> Self {
        NodeState {
            parent: Some(parent),
            ..NodeState::new(ids)
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current rotation, in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scale_x(&self) -> f32 {
        self.scale.x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale.y
    }

    pub fn scale(&self) -> Vector2<f32> {
        self.scale
    }

    /// Position relative to the parent's pivot, or absolute without parent.
    pub fn relative_x(&self) -> f32 {
        self.relative.x
    }

    pub fn relative_y(&self) -> f32 {
        self.relative.y
    }

    pub fn relative_position(&self) -> Point2<f32> {
        self.relative
    }

    pub fn pivot_x(&self) -> f32 {
        self.pivot.x
    }

    pub fn pivot_y(&self) -> f32 {
        self.pivot.y
    }

    /// Whether a custom pivot overrides the surface center.
    pub fn is_custom_pivot_used(&self) -> bool {
        self.custom_pivot
    }

    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    pub(crate) fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub(crate) fn set_scale(&mut self, x: f32, y: f32) {
        self.scale = Vector2::new(x, y);
    }

    pub(crate) fn set_relative_position(&mut self, x: f32, y: f32) {
        self.relative = Point2::new(x, y);
    }

    pub(crate) fn set_pivot(&mut self, x: f32, y: f32) {
        self.pivot = Point2::new(x, y);
        self.custom_pivot = true;
    }
}
