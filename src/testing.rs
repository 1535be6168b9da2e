//! In-memory [`NotesApi`] used by the view tests.

use crate::{
    api::NewNote,
    client::{ApiFuture, NotesApi, NotesClientError},
    note::{Collection, Note, NoteId},
};
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::collections::HashMap;

pub(crate) const CREATED_AT: &str = "2024-03-01T08:30:00.000Z";

pub(crate) fn note(id: &str, title: &str, archived: bool) -> Note {
    Note {
        id: NoteId::new(id),
        title: title.to_string(),
        body: format!("Body of {title}"),
        created_at: CREATED_AT.to_string(),
        archived,
    }
}

/// Keeps notes in a `Vec` in insertion order, counts calls per operation and can be told to
/// fail the next call of an operation or to hold a list call until released.
#[derive(Default)]
pub(crate) struct FakeNotesApi {
    notes: Mutex<Vec<Note>>,
    created: Mutex<usize>,
    failures: Mutex<HashMap<&'static str, String>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    gates: Mutex<HashMap<Collection, oneshot::Receiver<()>>>,
}

impl FakeNotesApi {
    pub(crate) fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Default::default()
        }
    }

    /// Makes the next call of `operation` fail with `message`.
    pub(crate) fn fail_next(&self, operation: &'static str, message: &str) {
        self.failures.lock().insert(operation, message.to_string());
    }

    /// Holds the next list call for `collection` until `gate` resolves.
    pub(crate) fn gate(&self, collection: Collection, gate: oneshot::Receiver<()>) {
        self.gates.lock().insert(collection, gate);
    }

    pub(crate) fn calls(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    pub(crate) fn note(&self, id: &NoteId) -> Option<Note> {
        self.notes.lock().iter().find(|note| &note.id == id).cloned()
    }

    fn record(&self, operation: &'static str) -> Result<(), NotesClientError> {
        *self.calls.lock().entry(operation).or_default() += 1;
        match self.failures.lock().remove(operation) {
            Some(message) => Err(NotesClientError::failed(message)),
            None => Ok(()),
        }
    }

    fn list_collection(
        &self,
        operation: &'static str,
        collection: Collection,
    ) -> ApiFuture<'_, Vec<Note>> {
        let recorded = self.record(operation);
        let gate = self.gates.lock().remove(&collection);
        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            recorded?;
            Ok(self
                .notes
                .lock()
                .iter()
                .filter(|note| note.collection() == collection)
                .cloned()
                .collect())
        })
    }

    fn set_archived(&self, id: &NoteId, archived: bool) -> Result<(), NotesClientError> {
        let mut notes = self.notes.lock();
        let note = notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(|| NotesClientError::failed("Note is not found"))?;
        note.archived = archived;
        Ok(())
    }
}

impl NotesApi for FakeNotesApi {
    fn list_active(&self) -> ApiFuture<'_, Vec<Note>> {
        self.list_collection("list_active", Collection::Active)
    }

    fn list_archived(&self) -> ApiFuture<'_, Vec<Note>> {
        self.list_collection("list_archived", Collection::Archived)
    }

    fn create<'a>(&'a self, note: &'a NewNote) -> ApiFuture<'a, Note> {
        Box::pin(async move {
            self.record("create")?;
            let id = {
                let mut created = self.created.lock();
                *created += 1;
                format!("notes-{}", *created)
            };
            let note = Note {
                id: NoteId::new(id),
                title: note.title.clone(),
                body: note.body.clone(),
                created_at: CREATED_AT.to_string(),
                archived: false,
            };
            self.notes.lock().push(note.clone());
            Ok(note)
        })
    }

    fn delete<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.record("delete")?;
            let mut notes = self.notes.lock();
            let before = notes.len();
            notes.retain(|note| &note.id != id);
            if notes.len() == before {
                return Err(NotesClientError::failed("Note is not found"));
            }
            Ok(())
        })
    }

    fn archive<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.record("archive")?;
            self.set_archived(id, true)
        })
    }

    fn unarchive<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.record("unarchive")?;
            self.set_archived(id, false)
        })
    }
}
