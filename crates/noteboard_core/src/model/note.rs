//! Note, tag and participant values.
//!
//! # Responsibility
//! - Mirror the record shape delivered by the note service.
//! - Provide render-facing helpers (`key`, `display_tags`) without layout logic.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another note.
//! - Two tags are equal iff their `uuid` matches, even when names differ.
//! - `edited_timestamp` grows monotonically with each edit.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable note identifier in string form.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Note kind as created by the note service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    /// Plain text body.
    #[default]
    Text,
    /// Markdown body.
    #[serde(rename = "md")]
    Markdown,
    /// Source code body.
    Code,
    /// Rich text body.
    Rich,
    /// Checklist items.
    Checklist,
}

impl NoteType {
    /// All note kinds in the order offered by the create menu.
    pub const ALL: [NoteType; 5] = [
        NoteType::Text,
        NoteType::Checklist,
        NoteType::Markdown,
        NoteType::Code,
        NoteType::Rich,
    ];

    /// Stable wire value used by the note service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "md",
            Self::Code => "code",
            Self::Rich => "rich",
            Self::Checklist => "checklist",
        }
    }

    /// Parses one wire value. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "text" => Some(Self::Text),
            "md" => Some(Self::Markdown),
            "code" => Some(Self::Code),
            "rich" => Some(Self::Rich),
            "checklist" => Some(Self::Checklist),
            _ => None,
        }
    }
}

/// Label attachable to notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Identity of the tag; filters match on this value.
    pub uuid: String,
    /// Display name. May change transiently without changing identity.
    pub name: String,
}

impl Tag {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

/// Collaborator on a shared note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: i64,
    pub email: String,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Participant {
    /// Name shown for this collaborator: nickname when set, email otherwise.
    pub fn display_name(&self) -> &str {
        let nick = self.nick_name.trim();
        if nick.is_empty() {
            self.email.as_str()
        } else {
            nick
        }
    }
}

/// Note record as delivered by the note service.
///
/// Field names follow the service JSON schema (`editedTimestamp`, `type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub uuid: NoteId,
    #[serde(rename = "type", default)]
    pub note_type: NoteType,
    pub title: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub favorite: bool,
    /// Epoch milliseconds of the last edit.
    pub edited_timestamp: i64,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Note {
    /// Creates a note with a generated stable ID.
    pub fn new(title: impl Into<String>, edited_timestamp: i64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, edited_timestamp)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Optional fields start empty/false and `note_type` is `Text`.
    pub fn with_id(uuid: impl Into<NoteId>, title: impl Into<String>, edited_timestamp: i64) -> Self {
        Self {
            uuid: uuid.into(),
            note_type: NoteType::Text,
            title: title.into(),
            preview: String::new(),
            tags: Vec::new(),
            pinned: false,
            favorite: false,
            edited_timestamp,
            participants: Vec::new(),
        }
    }

    /// Key extractor for list rendering surfaces.
    pub fn key(&self) -> &str {
        self.uuid.as_str()
    }

    /// Returns whether any attached tag has the given `uuid`.
    pub fn has_tag(&self, tag_uuid: &str) -> bool {
        self.tags.iter().any(|tag| tag.uuid == tag_uuid)
    }

    /// Tags to show on a card: sorted by case-insensitive name, capped at `limit`.
    pub fn display_tags(&self, limit: usize) -> Vec<&Tag> {
        let mut tags = self.tags.iter().collect::<Vec<_>>();
        tags.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.uuid.cmp(&b.uuid))
        });
        tags.truncate(limit);
        tags
    }

    /// Collaborators to show on a card, excluding `own_user_id`.
    ///
    /// Sorted by case-insensitive display name and capped at `limit`.
    pub fn display_participants(&self, own_user_id: i64, limit: usize) -> Vec<&Participant> {
        let mut participants = self
            .participants
            .iter()
            .filter(|participant| participant.user_id != own_user_id)
            .collect::<Vec<_>>();
        participants.sort_by(|a, b| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
        });
        participants.truncate(limit);
        participants
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteType, Participant, Tag};

    #[test]
    fn tags_compare_by_uuid_only() {
        assert_eq!(Tag::new("t1", "Work"), Tag::new("t1", "work (renamed)"));
        assert_ne!(Tag::new("t1", "Work"), Tag::new("t2", "Work"));
    }

    #[test]
    fn note_type_wire_values_round_trip() {
        for kind in NoteType::ALL {
            assert_eq!(NoteType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NoteType::parse("slides"), None);
    }

    #[test]
    fn display_tags_sorts_by_name_and_caps() {
        let mut note = Note::with_id("n1", "title", 1);
        note.tags = vec![
            Tag::new("t3", "zeta"),
            Tag::new("t1", "Alpha"),
            Tag::new("t4", "beta"),
            Tag::new("t2", "gamma"),
        ];
        let names = note
            .display_tags(3)
            .into_iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn display_participants_skips_own_user() {
        let mut note = Note::with_id("n1", "shared", 1);
        note.participants = vec![
            Participant {
                user_id: 1,
                email: "me@example.com".to_string(),
                nick_name: String::new(),
                avatar: None,
            },
            Participant {
                user_id: 2,
                email: "zoe@example.com".to_string(),
                nick_name: String::new(),
                avatar: None,
            },
            Participant {
                user_id: 3,
                email: "x@example.com".to_string(),
                nick_name: "Bob".to_string(),
                avatar: None,
            },
        ];
        let shown = note.display_participants(1, 3);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].display_name(), "Bob");
        assert_eq!(shown[1].display_name(), "zoe@example.com");
    }
}
