//! Two-column (masonry) partitioning.
//!
//! # Responsibility
//! - Split an already ordered note list into left/right display columns.
//! - Provide a height-balanced alternative to strict alternation.
//!
//! # Invariants
//! - `left.len() + right.len() == input.len()`.
//! - Relative order inside each column matches input order.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};

/// Rows reserved for title/icon header and date/participant footer.
const CARD_CHROME_ROWS: usize = 4;
/// Row reserved for the tag chip strip when a card shows tags.
const CARD_TAG_ROWS: usize = 1;

/// Column assignment strategy for grid view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Even index left, odd index right.
    #[default]
    Alternating,
    /// Greedy: each card goes to the currently shorter column.
    Balanced,
}

/// Ordered left/right columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    pub left: Vec<Note>,
    pub right: Vec<Note>,
}

impl Columns {
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Partitions `ordered` with the given policy.
pub fn partition_with(ordered: &[Note], policy: ColumnPolicy) -> Columns {
    match policy {
        ColumnPolicy::Alternating => partition(ordered),
        ColumnPolicy::Balanced => partition_balanced(ordered),
    }
}

/// Strict alternation by position: even indexes left, odd indexes right.
///
/// Column heights are not balanced; see [`partition_balanced`].
pub fn partition(ordered: &[Note]) -> Columns {
    let mut columns = Columns::default();
    for (index, note) in ordered.iter().enumerate() {
        if index % 2 == 0 {
            columns.left.push(note.clone());
        } else {
            columns.right.push(note.clone());
        }
    }
    columns
}

/// Greedy height-balanced partition.
///
/// Each note is appended to the column with the smaller estimated height;
/// ties go left so the first card always lands left.
pub fn partition_balanced(ordered: &[Note]) -> Columns {
    let mut columns = Columns::default();
    let (mut left_height, mut right_height) = (0usize, 0usize);
    for note in ordered {
        let height = estimated_card_rows(note);
        if left_height <= right_height {
            left_height += height;
            columns.left.push(note.clone());
        } else {
            right_height += height;
            columns.right.push(note.clone());
        }
    }
    columns
}

/// Preview line budget a card renders for a preview of `preview_chars` chars.
pub fn preview_line_budget(preview_chars: usize) -> usize {
    match preview_chars {
        0 => 0,
        1..=49 => 3,
        50..=99 => 6,
        100..=199 => 10,
        200..=399 => 14,
        400..=599 => 18,
        600..=999 => 28,
        _ => 30,
    }
}

/// Estimated card height in text rows.
pub fn estimated_card_rows(note: &Note) -> usize {
    let tag_rows = if note.tags.is_empty() { 0 } else { CARD_TAG_ROWS };
    CARD_CHROME_ROWS + preview_line_budget(note.preview.chars().count()) + tag_rows
}
