use crate::fiducial::{bounding_rect, FiducialLocator};
use crate::model::Rect;
use image::RgbImage;
use rqrr::{BitGrid, Point, PreparedImage};
use tracing::debug;

/// Fiducial backend that treats a QR code as the marker, using rqrr.
///
/// A grid only counts when its payload decodes to a non-empty string; the
/// payload itself is not otherwise used.
pub struct QrLocator;

impl QrLocator {
    pub fn new() -> Self {
        QrLocator
    }
}

impl Default for QrLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FiducialLocator for QrLocator {
    fn locate(&self, image: &RgbImage) -> Option<Rect> {
        let grey = image::imageops::grayscale(image);
        let (width, height) = grey.dimensions();

        let mut prepared =
            PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                grey.get_pixel(x as u32, y as u32)[0]
            });
        let grids = prepared.detect_grids();
        debug!(candidates = grids.len(), "qr grid detection");

        grids.iter().find_map(|grid| match grid.decode() {
            Ok((_, payload)) if !payload.is_empty() => {
                let corners = code_corners(&grid.bounds, grid.grid.size());
                bounding_rect(&corners, width, height)
            }
            Ok(_) => {
                debug!("qr grid decoded to an empty payload");
                None
            }
            Err(e) => {
                debug!(error = %e, "qr grid failed to decode");
                None
            }
        })
    }

    fn backend_name(&self) -> &str {
        "qr"
    }
}

/// Outer corners of a code spanning `modules` modules.
///
/// rqrr maps its bounds at `modules + 1`, one module past the right and
/// bottom edges. Each corner is pulled back toward the top-left corner so the
/// hull covers the printed code only.
fn code_corners(bounds: &[Point; 4], modules: usize) -> [(i32, i32); 4] {
    let origin = bounds[0];
    let scale = modules as f64 / (modules as f64 + 1.0);
    bounds.map(|p| {
        let x = origin.x as f64 + (p.x - origin.x) as f64 * scale;
        let y = origin.y as f64 + (p.y - origin.y) as f64 * scale;
        (x.round() as i32, y.round() as i32)
    })
}
