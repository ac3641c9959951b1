// Example: a million-pixel list of disposable rows where only the window around the viewport
// holds content.
use anchorlist::{Built, Content, ListView, SimHost};

fn main() -> Result<(), anchorlist::ListError> {
    let mut list = ListView::new(SimHost::new(320.0, 800.0));
    for i in 0..12_500 {
        list.append(Content::factory(move |host: &mut SimHost| {
            Built::Node(host.create_node(format!("row {i}"), 80.0))
        }))?;
    }
    list.layout_if_needed();
    list.refresh_disposables();
    println!(
        "content_height={} materialized={}",
        list.host().content_height(),
        list.visible_disposable_elements().len()
    );

    for offset in [40_000.0, 500_000.0, 0.0] {
        list.set_content_offset(offset);
        let first = list
            .visible_disposable_elements()
            .first()
            .and_then(|&node| list.host().label(node).map(str::to_owned));
        println!(
            "offset={offset} materialized={} first={first:?}",
            list.visible_disposable_elements().len()
        );
    }
    Ok(())
}
