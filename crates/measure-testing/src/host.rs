//! In-memory host standing in for a UI framework's layout tree.

use measure_core::{
    GeometrySource, InstanceId, InstanceRegistry, MeasureHandle, TopInsets, WindowMetrics,
};
use measure_graphics::{Frame, Rect, Size};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};

/// Host whose bindings, geometry, inset and window are set by the test.
pub struct TestHost {
    window: Cell<Size>,
    top_inset: Cell<Option<f32>>,
    bindings: RefCell<FxHashMap<MeasureHandle, InstanceId>>,
    geometry: RefCell<FxHashMap<InstanceId, Rect>>,
    next_instance: Cell<u64>,
    geometry_queries: Cell<usize>,
}

impl TestHost {
    pub fn new(window: Size) -> Self {
        Self {
            window: Cell::new(window),
            top_inset: Cell::new(None),
            bindings: RefCell::new(FxHashMap::default()),
            geometry: RefCell::new(FxHashMap::default()),
            next_instance: Cell::new(1),
            geometry_queries: Cell::new(0),
        }
    }

    /// Mounts a native instance for `handle` laid out at `rect`.
    pub fn mount(&self, handle: MeasureHandle, rect: Rect) -> InstanceId {
        let instance = InstanceId(self.next_instance.get());
        self.next_instance.set(instance.0 + 1);
        self.bindings.borrow_mut().insert(handle, instance);
        self.geometry.borrow_mut().insert(instance, rect);
        instance
    }

    /// Mounts an instance that has not been laid out yet.
    pub fn mount_without_geometry(&self, handle: MeasureHandle) -> InstanceId {
        let instance = self.mount(handle, Rect::default());
        self.geometry.borrow_mut().remove(&instance);
        instance
    }

    pub fn unmount(&self, handle: MeasureHandle) {
        if let Some(instance) = self.bindings.borrow_mut().remove(&handle) {
            self.geometry.borrow_mut().remove(&instance);
        }
    }

    /// Moves the instance bound to `handle`. No-op when nothing is mounted.
    pub fn relayout(&self, handle: MeasureHandle, rect: Rect) {
        if let Some(instance) = self.bindings.borrow().get(&handle) {
            self.geometry.borrow_mut().insert(*instance, rect);
        }
    }

    pub fn set_top_inset(&self, inset: Option<f32>) {
        self.top_inset.set(inset);
    }

    pub fn set_window(&self, window: Size) {
        self.window.set(window);
    }

    /// How many times geometry has been read.
    pub fn geometry_queries(&self) -> usize {
        self.geometry_queries.get()
    }
}

impl InstanceRegistry for TestHost {
    fn resolve_instance(&self, handle: MeasureHandle) -> Option<InstanceId> {
        self.bindings.borrow().get(&handle).copied()
    }
}

impl GeometrySource for TestHost {
    fn measure_in_window(&self, instance: InstanceId) -> Option<Rect> {
        self.geometry_queries.set(self.geometry_queries.get() + 1);
        self.geometry.borrow().get(&instance).copied()
    }
}

impl TopInsets for TestHost {
    fn top_inset(&self) -> Option<f32> {
        self.top_inset.get()
    }
}

impl WindowMetrics for TestHost {
    fn window_frame(&self) -> Frame {
        Frame::window(self.window.get())
    }
}
