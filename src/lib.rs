//! Transformable, touch-manipulable scene nodes for map and compass overlays.
//!
//! Nodes implement [`TouchNode`] on top of a shared [`NodeState`]. A [`Scene`]
//! stores them in a `specs` world, links children to parents and computes
//! screen transforms; a [`TouchController`] routes touch samples to them.

pub mod error;
pub mod node;
pub mod scene;
pub mod touch;
pub mod transform;

pub use error::{Error, Result};
pub use node::{
    IdGenerator, MarkerNode, Node, NodeId, NodeState, NorthNode, SiteMapNode, Surface, TouchNode,
};
pub use scene::{DrawItem, Scene};
pub use touch::{ControllerConfig, PointInfo, TouchAction, TouchController, TouchOutcome};
pub use transform::{GlobalTransform, Parent, ParentHierarchy, TransformSystem};
