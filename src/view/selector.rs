//! Switching between the active and the archived collection.

use crate::{note::Collection, view::list::NoteListView};

/// Tracks which collection is displayed and routes refreshes to the list.
///
/// The selection itself lives in the [`NoteListView`], so a refresh the list runs on its own
/// (e.g. after a note was created) is reflected here as well.
#[derive(Clone, Debug)]
pub struct ViewSelector {
    list: NoteListView,
}

impl ViewSelector {
    pub fn new(list: NoteListView) -> Self {
        Self { list }
    }

    /// The selected collection. [`Collection::Active`] initially.
    pub fn current(&self) -> Collection {
        self.list.collection()
    }

    /// Whether `collection` is shown as the selected one.
    pub fn is_selected(&self, collection: Collection) -> bool {
        self.current() == collection
    }

    /// Selects `collection` and fetches it.
    ///
    /// Selecting the collection already selected does nothing and returns `false`.
    pub async fn switch_to(&self, collection: Collection) -> bool {
        if self.is_selected(collection) {
            return false;
        }
        self.list.show(collection).await;
        true
    }
}
