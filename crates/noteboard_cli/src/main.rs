//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `noteboard_core` linkage.
//! - Print a deterministic derivation of a fixed sample so list ordering and
//!   column assignment can be eyeballed without the mobile app.

use noteboard_core::{
    filter_and_sort, partition, Connectivity, NavigationDecision, Note, Tag, ALL_TAGS,
};

fn sample_notes() -> Vec<Note> {
    let mut groceries = Note::with_id("n-1", "Groceries", 1_700_000_300_000);
    groceries.preview = "milk, eggs, bread".to_string();
    groceries.tags = vec![Tag::new("t-home", "home")];

    let mut roadmap = Note::with_id("n-2", "Roadmap", 1_700_000_100_000);
    roadmap.pinned = true;

    let mut retro = Note::with_id("n-3", "retro notes", 1_700_000_100_000);
    retro.pinned = true;
    retro.tags = vec![Tag::new("t-work", "work")];

    vec![groceries, roadmap, retro, Note::with_id("n-4", "Ideas", 1_700_000_200_000)]
}

fn main() {
    println!("noteboard_core ping={}", noteboard_core::ping());
    println!("noteboard_core version={}", noteboard_core::core_version());

    let ordered = filter_and_sort(&sample_notes(), "", ALL_TAGS);
    let titles = ordered
        .iter()
        .map(|note| note.title.as_str())
        .collect::<Vec<_>>();
    println!("sample order={}", titles.join(","));

    let columns = partition(&ordered);
    println!(
        "sample columns left={} right={}",
        columns.left.len(),
        columns.right.len()
    );

    let decision = noteboard_core::can_open("n-1", Connectivity::OFFLINE, &|_: &str| false);
    let label = match decision {
        NavigationDecision::Allowed => "allowed".to_string(),
        NavigationDecision::Denied(reason) => format!("denied ({reason})"),
    };
    println!("offline open uncached={label}");
}
