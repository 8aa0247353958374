use crate::Element;
use measure_graphics::Frame;
use std::fmt;
use std::rc::Rc;

/// Callback receiving each completed measurement.
pub type OnMeasure = Rc<dyn Fn(Frame)>;

/// Configuration of a [`MeasureElement`](crate::MeasureElement) render.
#[derive(Clone)]
pub struct MeasureElementProps<P> {
    /// Measure during the render pass as well, without waiting for layout.
    pub force: bool,
    /// Add the host's top inset (status bar height) to the measured y.
    pub should_use_top_insets: bool,
    pub on_measure: OnMeasure,
    pub children: Element<P>,
}

impl<P> MeasureElementProps<P> {
    pub fn new(children: Element<P>, on_measure: impl Fn(Frame) + 'static) -> Self {
        Self {
            force: false,
            should_use_top_insets: false,
            on_measure: Rc::new(on_measure),
            children,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn use_top_insets(mut self, enabled: bool) -> Self {
        self.should_use_top_insets = enabled;
        self
    }

    pub fn children(mut self, children: Element<P>) -> Self {
        self.children = children;
        self
    }
}

impl<P: fmt::Debug> fmt::Debug for MeasureElementProps<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureElementProps")
            .field("force", &self.force)
            .field("should_use_top_insets", &self.should_use_top_insets)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
