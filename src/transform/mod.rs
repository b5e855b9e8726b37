mod global_transform;
mod local;
mod parent;
mod transform_system;

pub use global_transform::GlobalTransform;
pub use local::{anchor_matrix, local_matrix};
pub use parent::{Parent, ParentHierarchy};
pub use transform_system::TransformSystem;
