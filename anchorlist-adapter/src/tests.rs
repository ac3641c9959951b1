use crate::*;

use alloc::format;
use alloc::rc::Rc;
use anchorlist::{Built, Content, LayoutHost, ListOptions, Rect, Reference, SlotRef, UpdatePolicy};
use core::cell::Cell;

fn controller() -> Controller {
    Controller::new(
        TweenHost::new(320.0, 800.0).with_easing(Easing::Linear),
        ListOptions::default(),
    )
}

fn append_row(c: &mut Controller, identifier: &str, height: f64) -> SlotRef {
    let list = c.list_mut();
    let node = list.host_mut().create_node(identifier, height);
    list.append(node).unwrap().identifier(identifier).slot()
}

fn rows(c: &mut Controller, count: usize, height: f64) {
    for i in 0..count {
        append_row(c, &format!("row {i}"), height);
    }
    c.list_mut().layout_if_needed();
}

#[test]
fn tween_samples_endpoints_and_retargets() {
    let mut t = Tween::new(100.0, 200.0, 10, 100, Easing::Linear);
    assert_eq!(t.sample(0), 100.0);
    assert_eq!(t.sample(60), 150.0);
    assert_eq!(t.sample(500), 200.0);
    assert!(!t.is_done(109));
    assert!(t.is_done(110));

    t.retarget(60, 0.0, 50);
    assert_eq!(t.sample(60), 150.0);
    assert_eq!(t.sample(110), 0.0);

    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(0.5), 0.5);
        assert_eq!(easing.sample(1.0), 1.0);
    }
}

#[test]
fn lerp_rect_interpolates_each_component() {
    let from = Rect::new(0.0, 10.0, 100.0, 0.0);
    let to = Rect::new(10.0, 30.0, 200.0, 60.0);
    assert_eq!(lerp_rect(from, to, 0.5), Rect::new(5.0, 20.0, 150.0, 30.0));
    assert_eq!(lerp_rect(from, to, 1.0), to);
}

#[test]
fn insertion_grows_over_wall_clock_time() {
    let mut c = controller();
    append_row(&mut c, "A", 80.0);
    c.list_mut().layout_if_needed();
    c.tick(0);

    let b = c.list_mut().host_mut().create_node("B", 60.0);
    let slot = c.list_mut().insert_after(b, "A").unwrap().slot();
    assert!(c.is_animating());
    assert_eq!(c.host().presented_frame(slot.node()).height, 0.0);
    assert_eq!(c.host().frame(slot.node()).height, 60.0);

    assert_eq!(c.tick(150), None);
    assert_eq!(c.host().presented_frame(slot.node()), Rect::new(0.0, 80.0, 320.0, 30.0));
    assert!(c.list().is_transitioning());

    c.tick(300);
    assert!(!c.list().is_transitioning());
    assert!(!c.is_animating());
    assert_eq!(c.host().presented_frame(slot.node()).height, 60.0);
}

#[test]
fn deletion_collapses_then_settles_before_completing() {
    let mut c = controller();
    append_row(&mut c, "A", 40.0);
    let b = append_row(&mut c, "B", 60.0);
    let s = append_row(&mut c, "C", 80.0);
    c.list_mut().layout_if_needed();

    let done = Rc::new(Cell::new(false));
    let flag = Rc::clone(&done);
    c.list_mut()
        .delete_with("B", 0.0, move || flag.set(true))
        .unwrap();

    c.tick(100);
    let collapsing = c.host().presented_frame(b.node()).height;
    assert!(collapsing > 0.0 && collapsing < 60.0);
    let moving = c.host().presented_frame(s.node()).y;
    assert!(moving > 40.0 && moving < 100.0);

    c.tick(225);
    assert_eq!(c.list().len(), 2);
    assert!(c.list().is_transitioning());
    assert!(!done.get());

    c.tick(300);
    assert!(done.get());
    assert!(!c.is_animating());
    assert_eq!(c.host().presented_frame(s.node()).y, 40.0);
}

#[test]
fn deleting_before_the_first_layout_pass_still_collapses_from_full_height() {
    let mut c = controller();
    append_row(&mut c, "A", 40.0);
    let b = append_row(&mut c, "B", 60.0);
    let s = append_row(&mut c, "C", 80.0);

    c.list_mut().delete("B", 0.0).unwrap();
    c.tick(100);
    let collapsing = c.host().presented_frame(b.node()).height;
    assert!(collapsing > 0.0 && collapsing < 60.0);

    c.tick(300);
    assert!(!c.list().is_transitioning());
    assert_eq!(c.list().len(), 2);
    assert_eq!(c.host().presented_frame(s.node()).y, 40.0);
}

#[test]
fn tween_scrolls_to_an_element() {
    let mut c = controller();
    rows(&mut c, 100, 40.0);
    assert_eq!(c.max_scroll_offset(), 3200.0);

    let to = c
        .start_tween_to_element("row 50", 0, 100, Easing::SmoothStep)
        .unwrap();
    assert_eq!(to, 2000.0);

    let mut last = 0.0;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(offset) = c.tick(now_ms) {
            assert!(offset >= last);
            last = offset;
        }
    }
    assert!(!c.is_animating());
    assert_eq!(c.scroll_offset(), to);

    assert_eq!(
        c.start_tween_to_element("row 99", 200, 100, Easing::Linear),
        Some(3200.0)
    );
    assert_eq!(c.start_tween_to_element("missing", 200, 100, Easing::Linear), None);
}

#[test]
fn retargeting_a_scroll_tween_continues_from_the_current_offset() {
    let mut c = controller();
    rows(&mut c, 100, 40.0);

    c.start_tween_to_offset(1000.0, 0, 100, Easing::Linear);
    assert_eq!(c.tick(50), Some(500.0));
    c.start_tween_to_offset(2000.0, 50, 100, Easing::Linear);
    assert_eq!(c.tick(100), Some(1250.0));
    assert_eq!(c.tick(150), Some(2000.0));
    assert_eq!(c.tick(160), None);
}

#[test]
fn user_scroll_cancels_the_tween_and_clamps() {
    let mut c = controller();
    rows(&mut c, 100, 40.0);
    c.start_tween_to_offset(3000.0, 0, 100, Easing::Linear);
    c.on_scroll(10_000.0);

    assert!(!c.is_animating());
    assert_eq!(c.scroll_offset(), 3200.0);
    assert_eq!(c.tick(50), None);
    assert_eq!(c.scroll_to_element("row 2"), Some(80.0));
    assert_eq!(c.scroll_offset(), 80.0);
}

#[test]
fn viewport_resize_changes_the_scroll_range() {
    let mut c = controller();
    rows(&mut c, 100, 40.0);
    c.on_viewport_size(320.0, 400.0);
    assert_eq!(c.max_scroll_offset(), 3600.0);
}

#[test]
fn anchor_preserves_position_across_prepend() {
    let mut c = controller();
    rows(&mut c, 50, 40.0);
    c.on_scroll(410.0);

    let anchor = c.capture_first_visible_anchor().unwrap();
    assert_eq!(c.list().element_info(anchor.slot).unwrap().identifier, Some("row 10"));
    assert_eq!(anchor.offset_in_viewport, 10.0);

    let list = c.list_mut();
    list.begin_updates(UpdatePolicy::LayoutOnly);
    for i in 0..5 {
        let node = list.host_mut().create_node(&format!("new {i}"), 30.0);
        list.insert_after(node, Reference::Viewport).unwrap();
    }
    list.end_updates().unwrap();

    assert!(c.apply_anchor(&anchor));
    assert_eq!(c.scroll_offset(), 560.0);
}

#[test]
fn anchor_for_a_removed_slot_is_rejected() {
    let mut c = controller();
    rows(&mut c, 20, 40.0);
    let anchor = c.capture_first_visible_anchor().unwrap();
    c.list_mut().delete_all();
    assert!(!c.apply_anchor(&anchor));
    assert_eq!(c.capture_first_visible_anchor(), None);
}

#[test]
fn scrolling_rematerializes_disposable_rows() {
    let mut c = controller();
    let builds = Rc::new(Cell::new(0usize));
    for i in 0..100 {
        let builds = Rc::clone(&builds);
        let label = format!("row {i}");
        let content = Content::factory(move |host: &mut TweenHost| {
            builds.set(builds.get() + 1);
            Built::Node(host.create_node(&label, 80.0))
        });
        c.list_mut().append(content).unwrap();
    }
    c.on_viewport_size(320.0, 800.0);
    assert_eq!(c.list().visible_disposable_elements().len(), 20);

    c.on_scroll(4000.0);
    assert_eq!(c.list().disposable_element(0), None);
    assert_eq!(c.list().visible_disposable_elements().len(), 30);
    let row = c.list().disposable_element(40).unwrap();
    assert_eq!(c.host().sim().label(row), Some("row 40"));
    assert_eq!(builds.get(), 130);
}
