use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in image pixel coordinates.
///
/// A rectangle with zero width or height is an empty zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from half-open edges `[x0, x1) x [y0, y1)`, clamped
    /// to `[0, frame_width) x [0, frame_height)`. Degenerate results collapse
    /// to [`Rect::EMPTY`].
    pub fn from_edges_clamped(
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        let x0 = x0.clamp(0, frame_width as i64);
        let x1 = x1.clamp(0, frame_width as i64);
        let y0 = y0.clamp(0, frame_height as i64);
        let y1 = y1.clamp(0, frame_height as i64);

        if x1 <= x0 || y1 <= y0 {
            return Rect::EMPTY;
        }

        Rect::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.is_empty()
            || (self.right() <= frame_width as u64 && self.bottom() <= frame_height as u64)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Side of the fiducial a sample zone sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One of the four chemical indicators printed on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Analyte {
    Chlorine,
    Nitrate,
    Iron,
    Phosphate,
}

impl Analyte {
    /// All analytes, in rule-column order.
    pub const ALL: [Analyte; 4] = [
        Analyte::Chlorine,
        Analyte::Nitrate,
        Analyte::Iron,
        Analyte::Phosphate,
    ];

    /// The zone this analyte's indicator is printed in.
    pub fn side(self) -> Side {
        match self {
            Analyte::Iron => Side::Top,
            Analyte::Chlorine => Side::Bottom,
            Analyte::Phosphate => Side::Left,
            Analyte::Nitrate => Side::Right,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Analyte::Chlorine => "Chlorine",
            Analyte::Nitrate => "Nitrate",
            Analyte::Iron => "Iron",
            Analyte::Phosphate => "Phosphate",
        }
    }
}

impl fmt::Display for Analyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
