use std::sync::Arc;

use image::{Rgba, RgbaImage};

/// Paintable pixels of a node.
///
/// Shared with the compositor, which may keep reading it across frames.
/// Nodes replace the `Arc` instead of mutating the pixels in place.
pub type Surface = Arc<RgbaImage>;

pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba { data: [r, g, b, a] }
}

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
const NEEDLE_TAIL: [u8; 4] = [160, 160, 160, 255];

pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> Surface {
    Arc::new(RgbaImage::from_pixel(width, height, color))
}

/// A filled circle inscribed in a `diameter` square, transparent outside.
pub fn disc(diameter: u32, color: Rgba<u8>) -> Surface {
    let r = diameter as f32 / 2.0;
    Arc::new(RgbaImage::from_fn(diameter, diameter, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            color
        } else {
            Rgba { data: TRANSPARENT }
        }
    }))
}

/// North arrow: a diamond whose upper half is `color` and lower half grey.
pub fn needle(width: u32, height: u32, color: Rgba<u8>) -> Surface {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    Arc::new(RgbaImage::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - half_w).abs() / half_w;
        let dy = (y as f32 + 0.5 - half_h).abs() / half_h;
        if dx + dy > 1.0 {
            Rgba { data: TRANSPARENT }
        } else if (y as f32) < half_h {
            color
        } else {
            Rgba { data: NEEDLE_TAIL }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fills_everything() {
        let s = solid(4, 3, rgba(1, 2, 3, 4));
        assert_eq!((4, 3), s.dimensions());
        assert!(s.pixels().all(|p| p.data == [1, 2, 3, 4]));
    }

    #[test]
    fn disc_is_transparent_in_corners() {
        let s = disc(10, rgba(255, 0, 0, 255));
        assert_eq!(TRANSPARENT, s.get_pixel(0, 0).data);
        assert_eq!([255, 0, 0, 255], s.get_pixel(5, 5).data);
    }

    #[test]
    fn needle_points_north() {
        let s = needle(20, 40, rgba(200, 0, 0, 255));
        assert_eq!([200, 0, 0, 255], s.get_pixel(10, 5).data);
        assert_eq!(NEEDLE_TAIL, s.get_pixel(10, 35).data);
        assert_eq!(TRANSPARENT, s.get_pixel(0, 0).data);
    }

    #[test]
    fn clones_share_pixels() {
        let a = solid(2, 2, rgba(0, 0, 0, 255));
        let b = a.clone();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
