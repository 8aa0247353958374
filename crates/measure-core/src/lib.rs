//! Runtime plumbing for element measurement.
//!
//! The host UI framework is reached only through the collaborator traits in
//! [`platform`]. Rendered instances are addressed by [`MeasureHandle`], and
//! post-layout work is scheduled on a [`CommitPipeline`].

mod commit;
mod handle;
pub mod hash;
mod layout_effect;
mod owned;
pub mod platform;

pub use commit::{CommitInfo, CommitPipeline, LayoutEffectRegistration};
pub use handle::{InstanceId, MeasureHandle};
pub use layout_effect::LayoutEffectState;
pub use owned::Owned;
pub use platform::{
    CommitScheduler, GeometrySource, InstanceRegistry, MeasureHost, TopInsets, WindowMetrics,
};

use std::hash::{Hash, Hasher};

/// Hash of an effect's dependency tuple.
pub type Key = u64;

pub fn hash_key<K: Hash + ?Sized>(key: &K) -> Key {
    let mut hasher = hash::default::new();
    key.hash(&mut hasher);
    hasher.finish()
}
