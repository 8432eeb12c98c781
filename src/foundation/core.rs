use crate::foundation::error::{RepmarkError, RepmarkResult};

pub use kurbo::{Affine, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest edge the CPU rasterizer can allocate.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    /// Build a canvas, rejecting zero or oversized edges.
    pub fn new(width: u32, height: u32) -> RepmarkResult<Self> {
        for (field, v) in [("canvas.width", width), ("canvas.height", height)] {
            if v == 0 {
                return Err(RepmarkError::config(field, "must be a positive integer"));
            }
            if v > Self::MAX_EDGE {
                return Err(RepmarkError::config(
                    field,
                    format!("must be <= {} (got {v})", Self::MAX_EDGE),
                ));
            }
        }
        Ok(Self { width, height })
    }

    /// Whether `(x, y)` lies on the canvas. Edges are inclusive so that right/bottom anchors
    /// can sit exactly on the border.
    pub fn contains(self, x: i64, y: i64) -> bool {
        (0..=i64::from(self.width)).contains(&x) && (0..=i64::from(self.height)).contains(&y)
    }

    /// The whole canvas as a pixel rectangle.
    pub fn rect(self) -> PixelRect {
        PixelRect {
            x_min: 0,
            y_min: 0,
            x_max: self.width as i32,
            y_max: self.height as i32,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red, the bounding-box outline color.
    pub const RED: Self = Self::new(255, 0, 0, 255);

    /// Construct from straight channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to premultiplied form.
    pub fn premultiplied(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Premultiply straight channels with round-to-nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a byte quad in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Zero-based position of a text element in the configuration's `elements` list.
///
/// Bounding boxes refer back to their element through this index rather than by owning it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "elements[{}]", self.0)
    }
}

/// Integer pixel rectangle. `x_max`/`y_max` are exclusive edges, so an empty rectangle has
/// `x_min == x_max` or `y_min == y_max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x_min: i32,
    /// Top edge (inclusive).
    pub y_min: i32,
    /// Right edge (exclusive).
    pub x_max: i32,
    /// Bottom edge (exclusive).
    pub y_max: i32,
}

impl PixelRect {
    /// Build a rectangle from its edges, normalizing swapped coordinates.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x_min: x0.min(x1),
            y_min: y0.min(y1),
            x_max: x0.max(x1),
            y_max: y0.max(y1),
        }
    }

    /// A zero-area rectangle sitting at `(x, y)`.
    pub fn empty_at(x: i32, y: i32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// Area in pixels.
    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// The rectangle moved by whole pixels.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Whether the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }

    /// Intersection with `other`, or `None` when they share no pixel.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_max: self.x_max.min(other.x_max),
            y_max: self.y_max.min(other.y_max),
        })
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x_min >= self.x_min
            && other.y_min >= self.y_min
            && other.x_max <= self.x_max
            && other.y_max <= self.y_max
    }

    /// Edges as `[x_min, y_min, x_max, y_max]`.
    pub fn to_array(&self) -> [i32; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
