//! Note collection domain model.
//!
//! # Responsibility
//! - Define the note/tag/participant values consumed by the view engine.
//! - Keep one closed enumeration for note kinds.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reused.
//! - Tag identity is the tag `uuid`, never its display name.
//! - Values are immutable per refresh cycle; refreshes replace them wholesale.

pub mod note;
