//! Testing utilities for element measurement

pub mod assertions;
pub mod host;
pub mod recorder;

pub use assertions::{assert_approx_eq, assert_frame_approx_eq};
pub use host::TestHost;
pub use recorder::RecordingCallback;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::host::TestHost;
    pub use crate::recorder::RecordingCallback;
}
