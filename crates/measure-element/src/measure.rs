//! The measurement procedure shared by render-time and post-layout triggers.

use measure_core::{MeasureHandle, MeasureHost};
use measure_graphics::Frame;
use std::fmt;

/// Why a measurement produced no frame. Never surfaced to `on_measure`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The handle is not bound to a mounted instance.
    Unbound,
    /// The instance is mounted but the host has no rectangle for it.
    NoGeometry,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unbound => f.write_str("handle is not bound to a mounted instance"),
            SkipReason::NoGeometry => f.write_str("host has no geometry for the instance"),
        }
    }
}

/// Measures the instance behind `handle` in absolute screen coordinates,
/// offset by the top inset when `use_top_insets` is set and wrapped into the
/// window horizontally.
pub fn try_measure_frame(
    host: &dyn MeasureHost,
    handle: MeasureHandle,
    use_top_insets: bool,
) -> Result<Frame, SkipReason> {
    let instance = host.resolve_instance(handle).ok_or(SkipReason::Unbound)?;
    let rect = host.measure_in_window(instance).ok_or(SkipReason::NoGeometry)?;

    let y = if use_top_insets {
        rect.y + host.top_inset().unwrap_or(0.0)
    } else {
        rect.y
    };
    let frame = Frame::from_components(rect.x, y, rect.width, rect.height);
    Ok(frame.wrapped_into(&host.window_frame()))
}

/// [`try_measure_frame`] with the skip reason logged and dropped.
pub fn measure_frame(
    host: &dyn MeasureHost,
    handle: MeasureHandle,
    use_top_insets: bool,
) -> Option<Frame> {
    match try_measure_frame(host, handle, use_top_insets) {
        Ok(frame) => Some(frame),
        Err(reason) => {
            log::debug!("skipping measurement of {handle:?}: {reason}");
            None
        }
    }
}
