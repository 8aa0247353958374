use measure_core::MeasureHandle;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT: AtomicU64 = AtomicU64::new(1);

/// Identity of a child element. A measurer keeps its handle for as long as
/// it is given a child with the same identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    pub fn next() -> Self {
        Self(NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// A single visual element: its identity, its own props, and the measurement
/// handle attached by a wrapping measurer, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Element<P> {
    id: ElementId,
    props: P,
    measure_handle: Option<MeasureHandle>,
}

impl<P> Element<P> {
    /// Element with a fresh identity.
    pub fn new(props: P) -> Self {
        Self::with_id(ElementId::next(), props)
    }

    pub fn with_id(id: ElementId, props: P) -> Self {
        Self {
            id,
            props,
            measure_handle: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub fn measure_handle(&self) -> Option<MeasureHandle> {
        self.measure_handle
    }

    pub fn attach_handle(mut self, handle: MeasureHandle) -> Self {
        self.measure_handle = Some(handle);
        self
    }
}
