//! Offline navigation guard.
//!
//! # Responsibility
//! - Decide whether a note may be opened given a connectivity snapshot.
//!
//! # Invariants
//! - Online snapshots always allow navigation, regardless of cache state.
//! - Offline snapshots allow navigation iff the note content is cached.
//! - The guard performs no I/O and shows no notification.

use std::fmt::{Display, Formatter};

/// Connectivity snapshot taken at the moment of navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    pub has_internet: bool,
}

impl Connectivity {
    pub const ONLINE: Self = Self { has_internet: true };
    pub const OFFLINE: Self = Self {
        has_internet: false,
    };

    pub fn new(has_internet: bool) -> Self {
        Self { has_internet }
    }
}

/// Local note content cache lookup.
pub trait ContentCache {
    /// Returns whether content for `note_id` is available locally.
    fn has_cached(&self, note_id: &str) -> bool;
}

impl<F> ContentCache for F
where
    F: Fn(&str) -> bool,
{
    fn has_cached(&self, note_id: &str) -> bool {
        self(note_id)
    }
}

/// Why navigation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Device is offline and the note content is not cached.
    OfflineContentUnavailable,
}

impl DenialReason {
    /// User-facing message for alerts.
    pub fn message(self) -> &'static str {
        match self {
            Self::OfflineContentUnavailable => "offline, content unavailable",
        }
    }

    /// Stable code for logs and FFI callers.
    pub fn code(self) -> &'static str {
        match self {
            Self::OfflineContentUnavailable => "offline_uncached",
        }
    }
}

impl Display for DenialReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Guard outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allowed,
    Denied(DenialReason),
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `note_id` may be opened.
pub fn can_open<C>(note_id: &str, connectivity: Connectivity, cache: &C) -> NavigationDecision
where
    C: ContentCache + ?Sized,
{
    if connectivity.has_internet || cache.has_cached(note_id) {
        NavigationDecision::Allowed
    } else {
        NavigationDecision::Denied(DenialReason::OfflineContentUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{can_open, Connectivity, DenialReason, NavigationDecision};
    use std::cell::Cell;
    use std::collections::HashSet;

    #[test]
    fn online_is_allowed_without_consulting_cache() {
        let lookups = Cell::new(0);
        let empty_cache = |_: &str| {
            lookups.set(lookups.get() + 1);
            false
        };
        assert_eq!(
            can_open("x", Connectivity::ONLINE, &empty_cache),
            NavigationDecision::Allowed
        );
        assert_eq!(lookups.get(), 0);
    }

    #[test]
    fn offline_requires_cached_content() {
        let mut cached = HashSet::new();
        let decision = can_open("x", Connectivity::OFFLINE, &|id: &str| cached.contains(id));
        assert_eq!(
            decision,
            NavigationDecision::Denied(DenialReason::OfflineContentUnavailable)
        );

        cached.insert("x".to_string());
        let decision = can_open("x", Connectivity::OFFLINE, &|id: &str| cached.contains(id));
        assert!(decision.is_allowed());
    }

    #[test]
    fn denial_message_is_user_facing() {
        assert_eq!(
            DenialReason::OfflineContentUnavailable.to_string(),
            "offline, content unavailable"
        );
    }
}
