pub mod qr;

use crate::model::Rect;
use image::RgbImage;

/// Trait for fiducial detection backends.
pub trait FiducialLocator: Send + Sync {
    /// Bounding rectangle of the single fiducial in `image`, in image pixel
    /// coordinates, or `None` when no readable marker is found.
    fn locate(&self, image: &RgbImage) -> Option<Rect>;

    /// Name of this detection backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Axis-aligned hull of corner points, clamped to the frame.
///
/// Points are pixel-boundary coordinates: a corner at `x = 184` closes the
/// rectangle before pixel column 184.
pub fn bounding_rect(points: &[(i32, i32)], frame_width: u32, frame_height: u32) -> Option<Rect> {
    let min_x = points.iter().map(|p| p.0).min()? as i64;
    let max_x = points.iter().map(|p| p.0).max()? as i64;
    let min_y = points.iter().map(|p| p.1).min()? as i64;
    let max_y = points.iter().map(|p| p.1).max()? as i64;

    let rect = Rect::from_edges_clamped(min_x, min_y, max_x, max_y, frame_width, frame_height);
    (!rect.is_empty()).then_some(rect)
}
