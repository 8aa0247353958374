//! The frame value delivered to measurement callbacks.

use crate::{Point, Rect, Size};

/// Position and size of a measured element in absolute screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
}

impl Frame {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub const fn from_components(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.origin(), rect.size())
    }

    /// Frame of a viewport: origin at (0, 0), covering `size`.
    pub const fn window(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Moves `origin.x` back into `[0, window.width)` by removing whole
    /// window widths. Frames already left of the window's right edge are
    /// returned unchanged, as are frames whose geometry makes the correction
    /// meaningless (non-positive or non-finite window width, non-finite x).
    pub fn wrapped_into(&self, window: &Frame) -> Frame {
        let width = window.size.width;
        let x = self.origin.x;
        if x < width || x.is_nan() {
            return *self;
        }
        let measurable = width.is_finite() && width > 0.0 && x.is_finite();
        if !measurable {
            log::warn!("skipping window wrap: x={x} window width={width}");
            return *self;
        }
        // Exact for floats, unlike repeated subtraction: same result as
        // subtracting `width` until x < width.
        let wrapped = x.rem_euclid(width);
        Frame {
            origin: Point::new(wrapped, self.origin.y),
            size: self.size,
        }
    }
}

impl From<Rect> for Frame {
    fn from(rect: Rect) -> Self {
        Frame::from_rect(rect)
    }
}
