//! Host collaborator traits.
//!
//! The measurer never talks to a layout engine directly. Everything it needs
//! from the host UI framework goes through these traits, so the same
//! component runs against a desktop window, a test double, or any other
//! retained layout tree.

use crate::{InstanceId, MeasureHandle};
use measure_graphics::{Frame, Rect};

/// Maps measurement handles to the native instances the host rendered.
pub trait InstanceRegistry {
    /// Returns `None` when nothing is mounted for `handle`.
    fn resolve_instance(&self, handle: MeasureHandle) -> Option<InstanceId>;
}

/// Reads the laid-out geometry of native instances.
pub trait GeometrySource {
    /// Rectangle of `instance` in absolute screen coordinates, or `None` if
    /// the host has no geometry for it.
    fn measure_in_window(&self, instance: InstanceId) -> Option<Rect>;
}

/// Size of the top-of-screen inset (status bar, title bar).
pub trait TopInsets {
    /// `None` when the platform cannot tell; callers treat that as zero.
    fn top_inset(&self) -> Option<f32> {
        None
    }
}

/// Describes the current viewport.
pub trait WindowMetrics {
    /// Frame of the full viewport, origin at (0, 0).
    fn window_frame(&self) -> Frame;
}

/// Everything a measurer needs from its host.
pub trait MeasureHost: InstanceRegistry + GeometrySource + TopInsets + WindowMetrics {}

impl<T> MeasureHost for T where T: InstanceRegistry + GeometrySource + TopInsets + WindowMetrics {}

/// Asks the host to run a commit.
///
/// The pipeline calls this whenever a layout effect becomes due, so hosts
/// that render on demand know another pass is needed.
pub trait CommitScheduler {
    fn schedule_commit(&self);
}
