//! Data-source contracts consumed by the view controller.
//!
//! # Responsibility
//! - Define the narrow note/tag fetch and note creation interfaces.
//! - Track fetch lifecycle status for empty-state and error messaging.
//!
//! # Invariants
//! - A fetch either yields the full collection or an error; there are no
//!   partial results.
//! - Refresh coalescing is the source's job; the engine never deduplicates.

use crate::model::note::{Note, NoteId, NoteType, Tag};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Data-source failure surfaced to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Remote service could not be reached.
    Unavailable(String),
    /// Remote service responded with a failure.
    Remote { code: String, message: String },
    /// Payload could not be decoded into note/tag values.
    InvalidPayload(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "note service unavailable: {message}"),
            Self::Remote { code, message } => write!(f, "note service error `{code}`: {message}"),
            Self::InvalidPayload(message) => write!(f, "invalid note service payload: {message}"),
        }
    }
}

impl Error for SourceError {}

impl SourceError {
    /// Stable code for logs and FFI envelopes.
    pub fn code(&self) -> &str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Remote { code, .. } => code.as_str(),
            Self::InvalidPayload(_) => "invalid_payload",
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Fetch lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// No fetch started yet.
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl QueryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Remote note collection.
pub trait NoteSource {
    /// Fetches the full, current note collection.
    fn fetch_notes(&self) -> SourceResult<Vec<Note>>;
}

/// Remote tag universe for the filter control.
pub trait TagSource {
    fn fetch_tags(&self) -> SourceResult<Vec<Tag>>;
}

/// Creates empty notes of a given kind.
pub trait NoteCreator {
    /// Creates one note and returns its stable id.
    fn create_note(&self, kind: NoteType) -> SourceResult<NoteId>;
}
