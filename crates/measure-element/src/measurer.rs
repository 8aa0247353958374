use crate::{measure_frame, Element, ElementId, MeasureElementProps, OnMeasure};
use measure_core::{hash_key, CommitPipeline, LayoutEffectState, MeasureHandle, MeasureHost, Owned};
use std::rc::Rc;

/// What the layout effect reads when it fires. Refreshed on every render so
/// a registered effect always measures with the latest props.
#[derive(Default)]
struct MeasureState {
    handle: Option<MeasureHandle>,
    should_use_top_insets: bool,
    on_measure: Option<OnMeasure>,
}

impl MeasureState {
    /// Runs one measurement and delivers it. Returns whether the callback
    /// fired.
    fn measure(shared: &Owned<MeasureState>, host: &dyn MeasureHost) -> bool {
        // Copy out first: the callback may re-enter the measurer.
        let (handle, use_top_insets, on_measure) = shared.with(|state| {
            (
                state.handle,
                state.should_use_top_insets,
                state.on_measure.clone(),
            )
        });
        let (Some(handle), Some(on_measure)) = (handle, on_measure) else {
            log::debug!("skipping measurement: measurer has no bound handle");
            return false;
        };
        match measure_frame(host, handle, use_top_insets) {
            Some(frame) => {
                on_measure(frame);
                true
            }
            None => false,
        }
    }
}

/// Wraps a single child element and reports its on-screen frame.
///
/// The measurer owns the [`MeasureHandle`] attached to its child. The handle
/// is allocated on the first render and replaced only when the child's
/// [`ElementId`] changes. After each render a layout effect stays registered
/// on the [`CommitPipeline`]; it measures after the next commit when `force`
/// or the handle changed, and after every commit that changes layout.
pub struct MeasureElement {
    host: Rc<dyn MeasureHost>,
    shared: Owned<MeasureState>,
    effect: LayoutEffectState,
    bound_child: Option<ElementId>,
}

impl MeasureElement {
    pub fn new(host: Rc<dyn MeasureHost>) -> Self {
        Self {
            host,
            shared: Owned::new(MeasureState::default()),
            effect: LayoutEffectState::default(),
            bound_child: None,
        }
    }

    /// Render pass. Returns the child with this measurer's handle attached;
    /// every other part of the child is preserved.
    pub fn render<P: Clone>(
        &mut self,
        props: &MeasureElementProps<P>,
        pipeline: &CommitPipeline,
    ) -> Element<P> {
        let handle = self.bind(props.children.id());
        self.shared.update(|state| {
            state.handle = Some(handle);
            state.should_use_top_insets = props.should_use_top_insets;
            state.on_measure = Some(Rc::clone(&props.on_measure));
        });

        if props.force {
            MeasureState::measure(&self.shared, self.host.as_ref());
        }

        let key = hash_key(&(props.force, handle));
        self.effect.sync(pipeline, key, || {
            let shared = self.shared.clone();
            let host = Rc::clone(&self.host);
            move || {
                MeasureState::measure(&shared, host.as_ref());
            }
        });

        props.children.clone().attach_handle(handle)
    }

    /// Measures right away with the props of the last render. Returns
    /// whether `on_measure` was invoked.
    pub fn measure_now(&self) -> bool {
        MeasureState::measure(&self.shared, self.host.as_ref())
    }

    /// Handle attached to the current child, `None` before the first render.
    pub fn handle(&self) -> Option<MeasureHandle> {
        self.shared.with(|state| state.handle)
    }

    /// Unmounts the measurer: the layout effect is unregistered and no
    /// further measurement is delivered.
    pub fn dispose(&mut self) {
        self.effect.cancel();
        self.bound_child = None;
        self.shared.replace(MeasureState::default());
    }

    fn bind(&mut self, child: ElementId) -> MeasureHandle {
        let current = self.shared.with(|state| state.handle);
        match current {
            Some(handle) if self.bound_child == Some(child) => handle,
            _ => {
                let handle = MeasureHandle::next();
                log::debug!("binding {child:?} to {handle:?}");
                self.bound_child = Some(child);
                handle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measure_core::{GeometrySource, InstanceId, InstanceRegistry, TopInsets, WindowMetrics};
    use measure_graphics::{Frame, Rect, Size};
    use std::cell::RefCell;

    /// Host that reports one fixed rectangle for any handle.
    struct FixedHost(Rect);

    impl InstanceRegistry for FixedHost {
        fn resolve_instance(&self, handle: MeasureHandle) -> Option<InstanceId> {
            Some(InstanceId(handle.raw()))
        }
    }

    impl GeometrySource for FixedHost {
        fn measure_in_window(&self, _instance: InstanceId) -> Option<Rect> {
            Some(self.0)
        }
    }

    impl TopInsets for FixedHost {}

    impl WindowMetrics for FixedHost {
        fn window_frame(&self) -> Frame {
            Frame::window(Size::new(400.0, 800.0))
        }
    }

    #[test]
    fn child_identity_controls_handle() {
        let host = Rc::new(FixedHost(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let pipeline = CommitPipeline::new();
        let mut measurer = MeasureElement::new(host);
        assert_eq!(measurer.handle(), None);

        let props = MeasureElementProps::new(Element::new(()), |_| {});
        let first = measurer.render(&props, &pipeline).measure_handle();
        let again = measurer.render(&props, &pipeline).measure_handle();
        assert_eq!(first, again);

        let props = props.children(Element::new(()));
        let rebound = measurer.render(&props, &pipeline).measure_handle();
        assert_ne!(first, rebound);
        assert_eq!(measurer.handle(), rebound);
    }

    #[test]
    fn measure_now_delivers_wrapped_frame() {
        let host = Rc::new(FixedHost(Rect::new(850.0, 20.0, 100.0, 50.0)));
        let pipeline = CommitPipeline::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut measurer = MeasureElement::new(host);
        let props = MeasureElementProps::new(Element::new(()), move |frame| {
            sink.borrow_mut().push(frame)
        });

        measurer.render(&props, &pipeline);
        assert!(measurer.measure_now());
        assert_eq!(
            *seen.borrow(),
            vec![Frame::from_components(50.0, 20.0, 100.0, 50.0)]
        );
    }
}
