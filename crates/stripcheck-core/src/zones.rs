//! Sample zone geometry around a located fiducial.

use crate::config::ZoneConfig;
use crate::model::{Rect, Side};
use serde::{Deserialize, Serialize};

/// The four sample rectangles bordering the fiducial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    /// Zone thickness in pixels that produced these rectangles.
    pub border: i64,
    pub top: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl Zones {
    /// All four zones empty: the fiducial is too close to the frame edge.
    pub fn empty(border: i64) -> Self {
        Self {
            border,
            top: Rect::EMPTY,
            bottom: Rect::EMPTY,
            left: Rect::EMPTY,
            right: Rect::EMPTY,
        }
    }

    pub fn get(&self, side: Side) -> Rect {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_usable(&self) -> bool {
        !(self.top.is_empty()
            && self.bottom.is_empty()
            && self.left.is_empty()
            && self.right.is_empty())
    }
}

/// Zone thickness for a fiducial in a frame.
///
/// The desired thickness is a fraction of the fiducial width, capped by the
/// distance to the nearest frame edge, less the safety margin. Never below the
/// safety margin itself.
pub fn border_thickness(
    fiducial: Rect,
    frame_width: u32,
    frame_height: u32,
    config: &ZoneConfig,
) -> i64 {
    let x = fiducial.x as i64;
    let y = fiducial.y as i64;
    let w = fiducial.width as i64;
    let h = fiducial.height as i64;

    let desired = (config.border_ratio * w as f64) as i64;
    let nearest = desired
        .min(y)
        .min(frame_height as i64 - (y + h))
        .min(x)
        .min(frame_width as i64 - (x + w));

    config.safety_margin.max(nearest - config.safety_margin)
}

/// Derive the four sample zones bordering `fiducial`, clamped to the frame.
///
/// When the thickness does not exceed `config.min_border` every zone is
/// empty and the caller should treat the frame as unreadable.
pub fn derive_zones(
    fiducial: Rect,
    frame_width: u32,
    frame_height: u32,
    config: &ZoneConfig,
) -> Zones {
    let border = border_thickness(fiducial, frame_width, frame_height, config);
    if border <= config.min_border {
        return Zones::empty(border);
    }

    let x = fiducial.x as i64;
    let y = fiducial.y as i64;
    let x_end = x + fiducial.width as i64;
    let y_end = y + fiducial.height as i64;
    let clamp =
        |x0, y0, x1, y1| Rect::from_edges_clamped(x0, y0, x1, y1, frame_width, frame_height);

    Zones {
        border,
        top: clamp(x, y - border, x_end, y),
        bottom: clamp(x, y_end, x_end, y_end + border),
        left: clamp(x - border, y, x, y_end),
        right: clamp(x_end, y, x_end + border, y_end),
    }
}
