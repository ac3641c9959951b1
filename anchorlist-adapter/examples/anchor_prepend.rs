use anchorlist::{ListOptions, Reference, UpdatePolicy};
use anchorlist_adapter::{Controller, TweenHost};

fn main() -> Result<(), anchorlist::ListError> {
    // Example: load older messages above the viewport without the visible ones jumping.
    let mut c = Controller::new(TweenHost::new(320.0, 480.0), ListOptions::default());
    for i in 100..160 {
        let list = c.list_mut();
        let node = list.host_mut().create_node(&format!("message {i}"), 48.0);
        list.append(node)?.identifier(format!("message {i}"));
    }
    c.list_mut().layout_if_needed();
    c.on_scroll(1_000.0);

    let anchor = c.capture_first_visible_anchor();
    println!("before: off={} anchor={anchor:?}", c.scroll_offset());

    let list = c.list_mut();
    list.begin_updates(UpdatePolicy::LayoutOnly);
    for i in (80..100).rev() {
        let node = list.host_mut().create_node(&format!("message {i}"), 48.0);
        list.insert_after(node, Reference::Viewport)?
            .identifier(format!("message {i}"));
    }
    list.end_updates()?;

    if let Some(anchor) = anchor {
        c.apply_anchor(&anchor);
    }
    println!("after: off={}", c.scroll_offset());
    Ok(())
}
