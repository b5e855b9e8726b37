use cgmath::{Deg, Matrix4, Vector3};

use crate::node::TouchNode;

/// Surface-to-parent matrix of a node: the pivot is moved to the origin,
/// scaled, rotated, then placed at the relative position.
pub fn local_matrix(node: &dyn TouchNode) -> Matrix4<f32> {
    let s = node.state();
    let (px, py) = node.effective_pivot();
    Matrix4::from_translation(Vector3::new(s.relative_x(), s.relative_y(), 0.0))
        * Matrix4::from_angle_z(Deg(s.angle()))
        * Matrix4::from_nonuniform_scale(s.scale_x(), s.scale_y(), 1.0)
        * Matrix4::from_translation(Vector3::new(-px, -py, 0.0))
}

/// Frame children are positioned in: the parent's surface with its origin
/// moved to the parent's pivot.
pub fn anchor_matrix(node: &dyn TouchNode) -> Matrix4<f32> {
    let (px, py) = node.effective_pivot();
    Matrix4::from_translation(Vector3::new(px, py, 0.0))
}
