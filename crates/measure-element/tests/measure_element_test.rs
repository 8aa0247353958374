//! End-to-end tests for the measurer: render, host layout, commit, callback.

use measure_element::prelude::*;
use measure_testing::prelude::*;
use std::rc::Rc;

const WINDOW: Size = Size {
    width: 400.0,
    height: 800.0,
};

struct Harness {
    host: Rc<TestHost>,
    pipeline: CommitPipeline,
    recorder: RecordingCallback,
    measurer: MeasureElement,
}

impl Harness {
    fn new() -> Self {
        let host = Rc::new(TestHost::new(WINDOW));
        let measurer = MeasureElement::new(host.clone());
        Self {
            host,
            pipeline: CommitPipeline::new(),
            recorder: RecordingCallback::new(),
            measurer,
        }
    }

    fn props(&self, child: Element<&'static str>) -> MeasureElementProps<&'static str> {
        MeasureElementProps::new(child, self.recorder.callback())
    }

    /// Renders, then lays the child out at `rect` the way a host would
    /// before committing.
    fn render_and_mount(
        &mut self,
        props: &MeasureElementProps<&'static str>,
        rect: Rect,
    ) -> MeasureHandle {
        let rendered = self.measurer.render(props, &self.pipeline);
        let handle = rendered.measure_handle().expect("handle attached");
        self.host.mount(handle, rect);
        handle
    }

    fn commit(&self, info: CommitInfo) -> usize {
        self.pipeline.commit(info, || {})
    }
}

#[test]
fn reports_wrapped_frame_after_layout() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("popover"));
    harness.render_and_mount(&props, Rect::new(850.0, 20.0, 100.0, 50.0));
    assert_eq!(harness.recorder.count(), 0, "nothing before commit");

    harness.commit(CommitInfo::layout_changed());

    assert_eq!(
        harness.recorder.frames(),
        vec![Frame::from_components(50.0, 20.0, 100.0, 50.0)]
    );
}

#[test]
fn top_inset_is_added_only_when_requested() {
    let mut harness = Harness::new();
    harness.host.set_top_inset(Some(24.0));
    let child = Element::new("anchor");
    let props = harness.props(child.clone()).use_top_insets(true);
    let handle = harness.render_and_mount(&props, Rect::new(10.0, 5.0, 50.0, 50.0));
    harness.commit(CommitInfo::layout_changed());
    assert_eq!(harness.recorder.last().map(|frame| frame.origin.y), Some(29.0));

    let props = harness.props(child).use_top_insets(false);
    harness.measurer.render(&props, &harness.pipeline);
    harness.host.relayout(handle, Rect::new(10.0, 5.0, 50.0, 50.0));
    harness.commit(CommitInfo::layout_changed());
    assert_eq!(harness.recorder.last().map(|frame| frame.origin.y), Some(5.0));
}

#[test]
fn missing_inset_counts_as_zero() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("anchor")).use_top_insets(true);
    harness.render_and_mount(&props, Rect::new(10.0, 5.0, 50.0, 50.0));
    harness.commit(CommitInfo::layout_changed());

    assert_frame_approx_eq(
        harness.recorder.last().expect("measured"),
        Frame::from_components(10.0, 5.0, 50.0, 50.0),
        0.0,
        "inset unavailable",
    );
}

#[test]
fn unbound_handle_is_silently_skipped() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("detached"));
    harness.measurer.render(&props, &harness.pipeline);

    assert_eq!(harness.commit(CommitInfo::layout_changed()), 1);
    assert_eq!(harness.recorder.count(), 0);
    assert_eq!(harness.host.geometry_queries(), 0);
}

#[test]
fn missing_geometry_is_silently_skipped() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("hidden"));
    let handle = harness
        .measurer
        .render(&props, &harness.pipeline)
        .measure_handle()
        .expect("handle attached");
    harness.host.mount_without_geometry(handle);

    harness.commit(CommitInfo::layout_changed());
    assert_eq!(harness.recorder.count(), 0);
    assert_eq!(harness.host.geometry_queries(), 1);
}

#[test]
fn force_measures_during_render_and_after_commit() {
    let mut harness = Harness::new();
    let child = Element::new("tooltip");
    let props = harness.props(child.clone());
    harness.render_and_mount(&props, Rect::new(30.0, 40.0, 10.0, 10.0));
    harness.commit(CommitInfo::layout_changed());
    assert_eq!(harness.recorder.count(), 1);

    assert_eq!(harness.recorder.take().len(), 1);

    let forced = harness.props(child).force(true);
    harness.measurer.render(&forced, &harness.pipeline);
    assert_eq!(harness.recorder.count(), 1, "measured synchronously in render");

    harness.commit(CommitInfo::unchanged());
    assert_eq!(harness.recorder.count(), 2, "force change re-runs the effect");
}

#[test]
fn forced_render_before_layout_waits_for_the_commit() {
    let mut harness = Harness::new();
    harness.host.set_top_inset(Some(24.0));
    let props = harness
        .props(Element::new("toast"))
        .force(true)
        .use_top_insets(true);
    let handle = harness
        .measurer
        .render(&props, &harness.pipeline)
        .measure_handle()
        .expect("handle attached");
    assert_eq!(harness.recorder.count(), 0, "no geometry during render");

    harness.host.mount(handle, Rect::new(1e9, 5.0, 50.0, 50.0));
    harness.commit(CommitInfo::layout_changed());

    assert_eq!(
        harness.recorder.frames(),
        vec![Frame::from_components(0.0, 29.0, 50.0, 50.0)]
    );
}

#[test]
fn unchanged_commit_does_not_remeasure() {
    let mut harness = Harness::new();
    let child = Element::new("menu");
    let props = harness.props(child);
    let handle = harness.render_and_mount(&props, Rect::new(0.0, 0.0, 10.0, 10.0));
    harness.commit(CommitInfo::layout_changed());
    harness.commit(CommitInfo::unchanged());
    harness.measurer.render(&props, &harness.pipeline);
    harness.commit(CommitInfo::unchanged());
    assert_eq!(harness.recorder.count(), 1);

    harness.host.relayout(handle, Rect::new(420.0, 0.0, 10.0, 10.0));
    harness.commit(CommitInfo::layout_changed());
    assert_eq!(
        harness.recorder.last(),
        Some(Frame::from_components(20.0, 0.0, 10.0, 10.0))
    );
}

#[test]
fn renders_before_a_commit_collapse_into_one_measurement() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("sheet"));
    harness.render_and_mount(&props, Rect::new(5.0, 5.0, 5.0, 5.0));
    harness.measurer.render(&props, &harness.pipeline);
    harness.measurer.render(&props.clone().force(false), &harness.pipeline);

    assert_eq!(harness.pipeline.registered_effects(), 1);
    harness.commit(CommitInfo::unchanged());
    assert_eq!(harness.recorder.count(), 1);
}

#[test]
fn new_child_identity_rebinds_the_handle() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("first"));
    let first = harness.render_and_mount(&props, Rect::new(1.0, 1.0, 1.0, 1.0));
    harness.commit(CommitInfo::layout_changed());

    let props = harness.props(Element::new("second"));
    let second = harness
        .measurer
        .render(&props, &harness.pipeline)
        .measure_handle()
        .expect("handle attached");
    assert_ne!(first, second);

    // The old instance is still mounted but no longer ours.
    harness.commit(CommitInfo::unchanged());
    assert_eq!(harness.recorder.count(), 1);

    harness.host.mount(second, Rect::new(2.0, 2.0, 2.0, 2.0));
    harness.commit(CommitInfo::layout_changed());
    assert_eq!(
        harness.recorder.last(),
        Some(Frame::from_components(2.0, 2.0, 2.0, 2.0))
    );
}

#[test]
fn rendered_child_keeps_its_props() {
    let mut harness = Harness::new();
    let child = Element::with_id(ElementId::from_raw(42), "label");
    let props = harness.props(child);
    let rendered = harness.measurer.render(&props, &harness.pipeline);

    assert_eq!(rendered.id(), ElementId::from_raw(42));
    assert_eq!(rendered.props(), &"label");
    assert_eq!(rendered.measure_handle(), harness.measurer.handle());
}

#[test]
fn disposed_measurer_never_reports() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("modal"));
    harness.render_and_mount(&props, Rect::new(0.0, 0.0, 10.0, 10.0));
    harness.measurer.dispose();

    assert_eq!(harness.pipeline.registered_effects(), 0);
    harness.commit(CommitInfo::layout_changed());
    assert!(!harness.measurer.measure_now());
    assert_eq!(harness.recorder.count(), 0);
}

#[test]
fn window_resize_changes_the_wrap() {
    let mut harness = Harness::new();
    let props = harness.props(Element::new("popover"));
    harness.render_and_mount(&props, Rect::new(850.0, 0.0, 10.0, 10.0));
    harness.host.set_window(Size::new(300.0, 600.0));
    harness.commit(CommitInfo::layout_changed());

    let frame = harness.recorder.last().expect("measured");
    assert_within_window(frame, 300.0, "resized window");
    assert_eq!(frame.origin.x, 250.0);
}
