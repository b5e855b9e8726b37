use specs::prelude::*;

use cgmath::{Matrix4, Point2, SquareMatrix, Vector4};

/// Maps a node's surface pixels to screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform(pub Matrix4<f32>);

impl Component for GlobalTransform {
    type Storage = VecStorage<Self>;
}

impl GlobalTransform {
    /// Checks whether each `f32` of the `GlobalTransform` is finite (not NaN or inf).
    pub fn is_finite(&self) -> bool {
        AsRef::<[f32; 16]>::as_ref(&self.0).iter().all(|f| f32::is_finite(*f))
    }

    /// Screen position of a surface pixel.
    pub fn to_screen(&self, x: f32, y: f32) -> Point2<f32> {
        let v = self.0 * Vector4::new(x, y, 0.0, 1.0);
        Point2::new(v.x, v.y)
    }

    /// Surface pixel under a screen position, if the transform is invertible
    /// (a zero scale collapses the surface).
    pub fn to_surface(&self, x: f32, y: f32) -> Option<Point2<f32>> {
        self.0.invert().map(|inv| {
            let v = inv * Vector4::new(x, y, 0.0, 1.0);
            Point2::new(v.x, v.y)
        })
    }
}

impl Default for GlobalTransform {
    fn default() -> Self {
        GlobalTransform(Matrix4::identity())
    }
}
