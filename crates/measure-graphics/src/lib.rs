//! Pure geometry for element measurement
//!
//! This crate contains the point, size and rectangle primitives reported by
//! host geometry queries, and the [`Frame`] value delivered to measurement
//! callbacks together with its window-wrap correction.

mod frame;
mod geometry;

pub use frame::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::frame::Frame;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
}
