//! Note collection view-state engine.
//!
//! # Responsibility
//! - Filter and order notes for display (`filter`).
//! - Split ordered notes into grid columns (`columns`).
//! - Track multi-select state (`selection`).
//! - Gate note navigation on connectivity and cache state (`guard`).
//! - Compose the above for the notes screen (`controller`).
//!
//! # Invariants
//! - Everything here is synchronous and performs no I/O.
//! - Data flows one way: notes -> filter -> columns -> rendering surface.

pub mod columns;
pub mod controller;
pub mod filter;
pub mod guard;
pub mod selection;
