//! Measurement host for a desktop window driven by winit.
//!
//! winit reports window sizes and positions in physical pixels. Layout and
//! measurement work in logical units, so everything entering the host is
//! divided by the window's scale factor.

use measure_core::{
    GeometrySource, InstanceId, InstanceRegistry, MeasureHandle, TopInsets, WindowMetrics,
};
use measure_graphics::{EdgeInsets, Frame, Point, Rect, Size};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use winit::dpi::{validate_scale_factor, PhysicalPosition, PhysicalSize};

#[derive(Debug, Clone, PartialEq)]
pub enum DesktopHostError {
    InvalidScaleFactor(f64),
    AlreadyBound {
        handle: MeasureHandle,
        instance: InstanceId,
    },
}

impl fmt::Display for DesktopHostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesktopHostError::InvalidScaleFactor(factor) => {
                write!(f, "invalid scale factor {factor}")
            }
            DesktopHostError::AlreadyBound { handle, instance } => {
                write!(f, "{handle:?} is already bound to {instance:?}")
            }
        }
    }
}

impl std::error::Error for DesktopHostError {}

pub struct DesktopWinitHost {
    scale_factor: Cell<f64>,
    window_size: Cell<PhysicalSize<u32>>,
    // Physical pixels, like everything winit hands us.
    safe_area: Cell<EdgeInsets>,
    bindings: RefCell<FxHashMap<MeasureHandle, InstanceId>>,
    geometry: RefCell<FxHashMap<InstanceId, Rect>>,
}

impl DesktopWinitHost {
    pub fn new(
        window_size: PhysicalSize<u32>,
        scale_factor: f64,
    ) -> Result<Self, DesktopHostError> {
        if !validate_scale_factor(scale_factor) {
            return Err(DesktopHostError::InvalidScaleFactor(scale_factor));
        }
        Ok(Self {
            scale_factor: Cell::new(scale_factor),
            window_size: Cell::new(window_size),
            safe_area: Cell::new(EdgeInsets::default()),
            bindings: RefCell::new(FxHashMap::default()),
            geometry: RefCell::new(FxHashMap::default()),
        })
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor.get()
    }

    /// Applies a `ScaleFactorChanged` event.
    pub fn set_scale_factor(&self, factor: f64) -> Result<(), DesktopHostError> {
        if !validate_scale_factor(factor) {
            return Err(DesktopHostError::InvalidScaleFactor(factor));
        }
        self.scale_factor.set(factor);
        Ok(())
    }

    /// Applies a `SurfaceResized` event.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        self.window_size.set(size);
    }

    /// Window areas covered by system UI (title bar, notch), in physical pixels.
    pub fn set_safe_area(&self, insets: EdgeInsets) {
        self.safe_area.set(insets);
    }

    pub fn logical_position(&self, position: PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f32>(self.scale_factor.get());
        Point::new(logical.x, logical.y)
    }

    /// Associates a measurement handle with the instance the layout pass
    /// created for it. Rebinding to the same instance is allowed.
    pub fn bind(
        &self,
        handle: MeasureHandle,
        instance: InstanceId,
    ) -> Result<(), DesktopHostError> {
        let mut bindings = self.bindings.borrow_mut();
        match bindings.get(&handle) {
            Some(existing) if *existing != instance => Err(DesktopHostError::AlreadyBound {
                handle,
                instance: *existing,
            }),
            _ => {
                bindings.insert(handle, instance);
                Ok(())
            }
        }
    }

    pub fn unbind(&self, handle: MeasureHandle) -> Option<InstanceId> {
        self.bindings.borrow_mut().remove(&handle)
    }

    /// Records where the layout pass placed `instance`, in logical units
    /// relative to the window.
    pub fn place(&self, instance: InstanceId, rect: Rect) {
        self.geometry.borrow_mut().insert(instance, rect);
    }

    /// Records a placement reported in physical pixels.
    pub fn place_physical(
        &self,
        instance: InstanceId,
        position: PhysicalPosition<f64>,
        size: PhysicalSize<u32>,
    ) {
        let origin = self.logical_position(position);
        let logical = size.to_logical::<f32>(self.scale_factor.get());
        self.place(
            instance,
            Rect::from_origin_size(origin, Size::new(logical.width, logical.height)),
        );
    }

    /// Drops an instance and every handle bound to it.
    pub fn remove_instance(&self, instance: InstanceId) {
        self.geometry.borrow_mut().remove(&instance);
        self.bindings
            .borrow_mut()
            .retain(|_, bound| *bound != instance);
    }
}

impl InstanceRegistry for DesktopWinitHost {
    fn resolve_instance(&self, handle: MeasureHandle) -> Option<InstanceId> {
        self.bindings.borrow().get(&handle).copied()
    }
}

impl GeometrySource for DesktopWinitHost {
    fn measure_in_window(&self, instance: InstanceId) -> Option<Rect> {
        let rect = self.geometry.borrow().get(&instance).copied();
        if rect.is_none() {
            log::trace!("no placement recorded for {instance:?}");
        }
        rect
    }
}

impl TopInsets for DesktopWinitHost {
    fn top_inset(&self) -> Option<f32> {
        let safe_area = self.safe_area.get();
        if safe_area.top == 0.0 {
            return None;
        }
        Some(safe_area.scaled(1.0 / self.scale_factor.get() as f32).top)
    }
}

impl WindowMetrics for DesktopWinitHost {
    fn window_frame(&self) -> Frame {
        let logical = self
            .window_size
            .get()
            .to_logical::<f32>(self.scale_factor.get());
        Frame::window(Size::new(logical.width, logical.height))
    }
}
