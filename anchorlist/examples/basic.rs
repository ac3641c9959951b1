// Example: build a list, insert and delete with transitions, then inspect the frames.
use anchorlist::{LayoutHost, ListOptions, ListView, SimHost};

fn main() -> Result<(), anchorlist::ListError> {
    let options = ListOptions::default().with_global_spacing(8.0);
    let mut list = ListView::with_options(SimHost::new(320.0, 640.0), options);

    for (id, height) in [("header", 48.0), ("body", 200.0), ("footer", 32.0)] {
        let node = list.host_mut().create_node(id, height);
        list.append(node)?.identifier(id);
    }
    list.layout_if_needed();

    let banner = list.host_mut().create_node("banner", 64.0);
    list.insert_after(banner, "header")?.identifier("banner");
    println!("inserting: transitioning={}", list.is_transitioning());
    list.pump();

    list.delete_with("footer", 0.0, || println!("footer removed"))?;
    list.pump();

    for info in list.coordinator().into_iter().flat_map(|c| c.elements()) {
        let frame = list.host().frame(info.slot.node());
        println!("{:>8}: y={} h={}", info.identifier.unwrap_or("?"), frame.y, frame.height);
    }
    println!("content_height={}", list.host().content_height());
    println!("animations={:?}", list.host().animations());
    Ok(())
}
