//! Flutter-facing FFI crate for Noteboard.

pub mod api;
