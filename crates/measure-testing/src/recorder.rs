use measure_graphics::Frame;
use std::cell::RefCell;
use std::rc::Rc;

/// Collects every frame delivered to the callbacks it hands out.
#[derive(Clone, Default)]
pub struct RecordingCallback {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback appending to this recorder.
    pub fn callback(&self) -> impl Fn(Frame) + 'static {
        let frames = Rc::clone(&self.frames);
        move |frame| frames.borrow_mut().push(frame)
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.borrow().last().copied()
    }

    /// Returns the recorded frames and starts over.
    pub fn take(&self) -> Vec<Frame> {
        std::mem::take(&mut *self.frames.borrow_mut())
    }
}
