mod component;
mod id;
mod state;
pub mod surface;
mod touch_node;
mod variants;

pub use component::Node;
pub use id::{IdGenerator, NodeId};
pub use state::NodeState;
pub use surface::Surface;
pub use touch_node::{half_extent, TouchNode};
pub use variants::{MarkerNode, NorthNode, SiteMapNode, MARKER_DIAMETER};

#[cfg(test)]
pub(crate) use touch_node::tests::TestNode;
