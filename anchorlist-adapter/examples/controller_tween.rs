use anchorlist::{ListOptions, Rect};
use anchorlist_adapter::{Controller, Easing, TweenHost};

fn main() -> Result<(), anchorlist::ListError> {
    // Example: a controller driving layout transitions and tween scrolling from a frame loop.
    //
    // An adapter would:
    // - mutate the list in response to app events
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned offset to the real scroll container (if any)
    // - draw every node at `presented_frame`
    let mut c = Controller::new(TweenHost::new(320.0, 480.0), ListOptions::default());
    for i in 0..200 {
        let list = c.list_mut();
        let node = list.host_mut().create_node(&format!("message {i}"), 56.0);
        list.append(node)?.identifier(format!("message {i}"));
    }
    c.list_mut().layout_if_needed();

    let node = c.list_mut().host_mut().create_node("new", 90.0);
    let slot = c.list_mut().insert_after(node, "message 0")?.slot();
    let target = c
        .start_tween_to_element("message 150", 0, 240, Easing::SmoothStep)
        .unwrap_or_default();
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    while c.is_animating() {
        now_ms += 16;
        let off = c.tick(now_ms);
        if now_ms % 80 == 0 {
            let Rect { height, .. } = c.host().presented_frame(slot.node());
            println!("t={now_ms} off={off:?} inserted_height={height:.1}");
        }
    }
    println!("done: off={} t={now_ms}", c.scroll_offset());
    Ok(())
}
