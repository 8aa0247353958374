//! Measure a rendered element and report its on-screen frame.
//!
//! [`MeasureElement`] wraps exactly one child [`Element`], attaches a
//! [`MeasureHandle`] to it, and after layout commits (or immediately, when
//! forced) asks the host for the child's rectangle. The rectangle is shifted
//! by the top inset when requested, wrapped into the window horizontally, and
//! handed to the caller's `on_measure` callback.
//!
//! Missing geometry is never an error: the callback simply does not fire and
//! the next layout commit tries again.

mod element;
mod measure;
mod measurer;
mod props;

pub use element::{Element, ElementId};
pub use measure::{measure_frame, try_measure_frame, SkipReason};
pub use measurer::MeasureElement;
pub use props::{MeasureElementProps, OnMeasure};

pub use measure_core::{CommitInfo, CommitPipeline, InstanceId, MeasureHandle, MeasureHost};
pub use measure_graphics::{Frame, Point, Rect, Size};

pub mod prelude {
    pub use crate::{Element, ElementId, MeasureElement, MeasureElementProps};
    pub use measure_core::{CommitInfo, CommitPipeline, MeasureHandle, MeasureHost};
    pub use measure_graphics::prelude::*;
}
