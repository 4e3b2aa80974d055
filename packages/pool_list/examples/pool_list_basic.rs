//! Basic usage of the `pool_list` crate:
//!
//! * Creating a pool list with a factory.
//! * Resizing it with `scope()`.
//! * Pairing it with per-frame data via `apply_with()`.
//! * Observing membership changes through events.

use pool_list::PoolList;

#[derive(Debug, Default)]
struct Label {
    text: String,
    visible: bool,
}

fn main() {
    let mut labels = PoolList::builder(|| {
        println!("Creating a new label");
        Label::default()
    })
    .on_item_added(|label: &Label| println!("Label activated (previous text: {:?})", label.text))
    .on_item_deactivated(|label: &Label| println!("Label deactivated: {:?}", label.text))
    .build();

    let frames: [&[&str]; 3] = [
        &["Alice", "Bob", "Charlie"],
        &["Dave"],
        &["Erin", "Frank"],
    ];

    for (number, names) in frames.into_iter().enumerate() {
        println!("--- frame {number} ---");

        let delta = labels
            .apply_with(names, |name, label| {
                label.text.clear();
                label.text.push_str(name);
                label.visible = true;
            })
            .expect("the factory cannot fail");

        println!(
            "Active: {}, inactive: {}, change: {delta:+}",
            labels.len(),
            labels.inactive_len()
        );

        for label in &labels {
            println!("  {} (visible: {})", label.text, label.visible);
        }
    }

    // Only three labels were ever created, no matter how many frames run.
    println!("Total labels owned by the pool list: {}", labels.total_len());
}
