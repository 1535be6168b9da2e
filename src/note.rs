//! The note record exchanged with the service, and its display helpers.

use crate::option::DateFormat;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a creation date the service sent in an unknown format.
pub const INVALID_DATE: &str = "Invalid Date";

/// Identifier assigned by the service when a note is created. Never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One of the two disjoint collections a note can be listed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Notes with `archived == false`.
    #[default]
    Active,
    /// Notes with `archived == true`.
    Archived,
}

impl Collection {
    /// Returns the collection a note with the given flag belongs to.
    pub fn of(archived: bool) -> Self {
        if archived {
            Collection::Archived
        } else {
            Collection::Active
        }
    }

    /// Parses the name written by the `Display` impl.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "active" => Some(Collection::Active),
            "archived" => Some(Collection::Archived),
            _ => None,
        }
    }

    /// The other collection.
    pub fn other(self) -> Self {
        match self {
            Collection::Active => Collection::Archived,
            Collection::Archived => Collection::Active,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Active => f.write_str("active"),
            Collection::Archived => f.write_str("archived"),
        }
    }
}

/// A note as stored by the service.
///
/// `archived` is the only thing telling the active and archived collections apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// ISO-8601 timestamp assigned by the service.
    pub created_at: String,
    #[serde(default)]
    pub archived: bool,
}

impl Note {
    /// The collection this note is listed in.
    pub fn collection(&self) -> Collection {
        Collection::of(self.archived)
    }

    /// Returns the body cut down to `max_chars` characters followed by `...`.
    ///
    /// The body is returned unchanged when `max_chars` is `None` or `Some(0)`, or when the body
    /// already fits.
    pub fn excerpt(&self, max_chars: Option<usize>) -> String {
        match max_chars {
            Some(max) if max > 0 && self.body.chars().count() > max => {
                let mut excerpt: String = self.body.chars().take(max).collect();
                excerpt.push_str("...");
                excerpt
            }
            _ => self.body.clone(),
        }
    }

    /// Parses [`Note::created_at`] into local time.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|date| date.with_timezone(&Local))
    }

    /// Formats the creation date for display, or [`INVALID_DATE`] if it cannot be parsed.
    pub fn display_date(&self, format: DateFormat) -> String {
        let Some(date) = self.created_at_local() else {
            return INVALID_DATE.to_string();
        };
        match format {
            DateFormat::Locale => date.format("%-d %B %Y, %H:%M:%S").to_string(),
            DateFormat::Short => date.format("%-d/%-m/%Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note(body: &str, created_at: &str) -> Note {
        Note {
            id: NoteId::new("notes-1"),
            title: "Groceries".to_string(),
            body: body.to_string(),
            created_at: created_at.to_string(),
            archived: false,
        }
    }

    #[test]
    fn archived_defaults_to_false_when_absent() {
        let note: Note = serde_json::from_value(json!({
            "id": "notes-1",
            "title": "Groceries",
            "body": "Milk, eggs",
            "createdAt": "2024-03-01T08:30:00.000Z"
        }))
        .unwrap();
        assert!(!note.archived);
        assert_eq!(note.id.as_str(), "notes-1");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(note("Milk, eggs", "2024-03-01T08:30:00.000Z")).unwrap();
        assert_eq!(value["createdAt"], "2024-03-01T08:30:00.000Z");
        assert_eq!(value["id"], "notes-1");
    }

    #[test]
    fn collection_follows_archived_flag() {
        let mut note = note("Milk, eggs", "2024-03-01T08:30:00.000Z");
        assert_eq!(note.collection(), Collection::Active);
        note.archived = true;
        assert_eq!(note.collection(), Collection::Archived);
        assert_eq!(Collection::Archived.other(), Collection::Active);
        assert_eq!(Collection::from_name("archived"), Some(Collection::Archived));
        assert_eq!(
            Collection::from_name(&Collection::Active.to_string()),
            Some(Collection::Active)
        );
        assert_eq!(Collection::from_name("trash"), None);
    }

    #[test]
    fn excerpt_truncates_by_characters() {
        let note = note("héllo wörld", "2024-03-01T08:30:00.000Z");
        assert_eq!(note.excerpt(Some(5)), "héllo...");
        assert_eq!(note.excerpt(Some(11)), "héllo wörld");
        assert_eq!(note.excerpt(None), "héllo wörld");
    }

    #[test]
    fn zero_excerpt_length_shows_whole_body() {
        let note = note("Milk, eggs", "2024-03-01T08:30:00.000Z");
        assert_eq!(note.excerpt(Some(0)), "Milk, eggs");
    }

    #[test]
    fn display_date_formats() {
        let note = note("Milk, eggs", "2024-03-01T12:00:00.000Z");
        let local = note.created_at_local().unwrap();
        assert_eq!(
            note.display_date(DateFormat::Short),
            local.format("%-d/%-m/%Y").to_string()
        );
        assert!(note
            .display_date(DateFormat::Locale)
            .contains(&local.format("%Y").to_string()));
    }

    #[test]
    fn unparsable_date_is_reported_as_invalid() {
        let note = note("Milk, eggs", "yesterday");
        assert_eq!(note.display_date(DateFormat::Locale), INVALID_DATE);
    }
}
