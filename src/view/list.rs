//! The note list: fetch cycles, rendering state and per-item actions.

use crate::{
    busy::{BusyGuard, BusyIndicator},
    client::{NotesApi, NotesClientError},
    note::{Collection, Note, NoteId},
    notifier::Notifier,
    option::ViewConfig,
    util::callback::OnRender,
};
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
#[cfg(feature = "tracing")]
use tracing::debug;

/// Shown when the active collection is empty.
pub const EMPTY_ACTIVE_MESSAGE: &str = "No active notes found. Add a new note to get started!";
/// Shown when the archived collection is empty.
pub const EMPTY_ARCHIVED_MESSAGE: &str = "No archived notes found.";

/// Returns the empty-state message of a collection.
pub fn empty_message(collection: Collection) -> &'static str {
    match collection {
        Collection::Active => EMPTY_ACTIVE_MESSAGE,
        Collection::Archived => EMPTY_ARCHIVED_MESSAGE,
    }
}

/// An action offered on a single list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemAction {
    Delete,
    Archive,
    Unarchive,
}

impl ItemAction {
    /// The actions offered on notes of a collection.
    pub fn available_for(collection: Collection) -> &'static [ItemAction] {
        match collection {
            Collection::Active => &[ItemAction::Delete, ItemAction::Archive],
            Collection::Archived => &[ItemAction::Delete, ItemAction::Unarchive],
        }
    }

    /// Parses the verb returned by [`ItemAction::verb`].
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "delete" => Some(ItemAction::Delete),
            "archive" => Some(ItemAction::Archive),
            "unarchive" => Some(ItemAction::Unarchive),
            _ => None,
        }
    }

    /// The verb used in confirmation questions, e.g. `delete`.
    pub fn verb(self) -> &'static str {
        match self {
            ItemAction::Delete => "delete",
            ItemAction::Archive => "archive",
            ItemAction::Unarchive => "unarchive",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            ItemAction::Delete => "deleted",
            ItemAction::Archive => "archived",
            ItemAction::Unarchive => "unarchived",
        }
    }

    /// Label of the control while idle.
    pub fn label(self) -> &'static str {
        match self {
            ItemAction::Delete => "Delete",
            ItemAction::Archive => "Archive",
            ItemAction::Unarchive => "Unarchive",
        }
    }

    /// Label of the control while the action is running.
    pub fn busy_label(self) -> &'static str {
        match self {
            ItemAction::Delete => "Deleting...",
            ItemAction::Archive => "Archiving...",
            ItemAction::Unarchive => "Unarchiving...",
        }
    }

    fn confirmation(self, title: &str) -> String {
        format!("Are you sure you want to {} \"{}\"?", self.verb(), title)
    }

    fn success_message(self, title: &str) -> String {
        format!("Note \"{}\" {} successfully!", title, self.past_tense())
    }
}

impl fmt::Display for ItemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// A rendered note summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItemView {
    pub note: Note,
    /// The body, truncated per [`ViewConfig::max_content_length`].
    pub excerpt: String,
    /// The formatted creation date, if [`ViewConfig::show_date`] is set.
    pub date: Option<String>,
    /// The action currently running on this item. All of its controls are disabled meanwhile.
    pub pending: Option<ItemAction>,
}

impl NoteItemView {
    pub fn new(note: Note, config: &ViewConfig) -> Self {
        let excerpt = note.excerpt(config.max_content_length);
        let date = config
            .show_date
            .then(|| note.display_date(config.date_format));
        Self {
            note,
            excerpt,
            date,
            pending: None,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.note.id
    }

    /// The actions this item offers.
    pub fn actions(&self) -> &'static [ItemAction] {
        ItemAction::available_for(self.note.collection())
    }

    /// Whether the controls of this item accept input.
    pub fn is_enabled(&self) -> bool {
        self.pending.is_none()
    }

    /// The label a control currently shows.
    pub fn control_label(&self, action: ItemAction) -> &'static str {
        match self.pending {
            Some(pending) if pending == action => action.busy_label(),
            _ => action.label(),
        }
    }
}

/// What the list currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch cycle for the collection is running.
    Loading(Collection),
    /// The collection, in the order the service returned it.
    Rendered {
        collection: Collection,
        items: Vec<NoteItemView>,
    },
    /// The collection has no notes.
    Empty {
        collection: Collection,
        message: String,
    },
    /// The fetch failed. Not retried.
    Errored {
        collection: Collection,
        message: String,
    },
}

impl ListState {
    /// The rendered items, if any.
    pub fn items(&self) -> &[NoteItemView] {
        match self {
            ListState::Rendered { items, .. } => items,
            _ => &[],
        }
    }

    /// The collection this state belongs to.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            ListState::Idle => None,
            ListState::Loading(collection)
            | ListState::Rendered { collection, .. }
            | ListState::Empty { collection, .. }
            | ListState::Errored { collection, .. } => Some(*collection),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading(_))
    }

    fn item_mut(&mut self, id: &NoteId) -> Option<&mut NoteItemView> {
        match self {
            ListState::Rendered { items, .. } => items.iter_mut().find(|item| item.id() == id),
            _ => None,
        }
    }
}

/// The result of [`NoteListView::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The note is not on screen, does not offer the action, or already has an action running.
    Ignored,
    /// The user declined the confirmation.
    Cancelled,
    /// The service accepted the action and the list was refreshed.
    Completed,
    /// The service call failed. The item's controls were restored.
    Failed(NotesClientError),
}

struct ListInner {
    api: Arc<dyn NotesApi>,
    notifier: Arc<dyn Notifier>,
    busy: Arc<dyn BusyIndicator>,
    config: ViewConfig,
    collection: Mutex<Collection>,
    state: Mutex<ListState>,
    /// Incremented at the start of every fetch cycle. Only the latest cycle may publish.
    generation: AtomicU64,
    on_render: Mutex<Vec<OnRender>>,
}

/// Renders one collection of notes and owns the actions on its items.
///
/// Every fetch replaces the previous content entirely; there is no local cache. Clones share
/// the same state.
#[derive(Clone)]
pub struct NoteListView(Arc<ListInner>);

impl fmt::Debug for NoteListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteListView")
            .field("collection", &*self.0.collection.lock())
            .field("state", &*self.0.state.lock())
            .field("config", &self.0.config)
            .finish()
    }
}

impl NoteListView {
    pub fn new(
        api: Arc<dyn NotesApi>,
        notifier: Arc<dyn Notifier>,
        busy: Arc<dyn BusyIndicator>,
        config: ViewConfig,
    ) -> Self {
        Self(Arc::new(ListInner {
            api,
            notifier,
            busy,
            config,
            collection: Mutex::new(Collection::Active),
            state: Mutex::new(ListState::Idle),
            generation: AtomicU64::new(0),
            on_render: Mutex::new(Vec::new()),
        }))
    }

    /// Registers a callback executed after every state change.
    pub fn register_on_render<F: Into<OnRender>>(&self, on_render: F) {
        self.0.on_render.lock().push(on_render.into());
    }

    /// The currently selected collection.
    pub fn collection(&self) -> Collection {
        *self.0.collection.lock()
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> ListState {
        self.0.state.lock().clone()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.0.config
    }

    /// Runs a fetch cycle for the currently selected collection.
    pub async fn refresh(&self) {
        let collection = self.collection();
        self.fetch(collection).await;
    }

    /// Selects `collection` and runs a fetch cycle for it.
    pub async fn show(&self, collection: Collection) {
        *self.0.collection.lock() = collection;
        self.fetch(collection).await;
    }

    async fn fetch(&self, collection: Collection) {
        let generation = self.0.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(ListState::Loading(collection));

        let result = {
            let _busy = BusyGuard::new(self.0.busy.as_ref());
            self.0.api.list(collection).await
        };

        if self.0.generation.load(Ordering::SeqCst) != generation {
            #[cfg(feature = "tracing")]
            debug!(generation, %collection, "dropping result of superseded fetch");
            return;
        }

        let state = match result {
            Ok(notes) if notes.is_empty() => ListState::Empty {
                collection,
                message: empty_message(collection).to_string(),
            },
            Ok(notes) => ListState::Rendered {
                collection,
                items: notes
                    .into_iter()
                    .map(|note| NoteItemView::new(note, &self.0.config))
                    .collect(),
            },
            Err(err) => ListState::Errored {
                collection,
                message: err.to_string(),
            },
        };

        #[cfg(feature = "tracing")]
        debug!(generation, %collection, items = state.items().len(), "fetch cycle finished");

        self.publish(state);
    }

    /// Deletes a note after confirmation, then refreshes the selected collection.
    pub async fn delete(&self, id: &NoteId) -> ActionOutcome {
        self.dispatch(id, ItemAction::Delete).await
    }

    /// Archives a note after confirmation, then refreshes the selected collection.
    pub async fn archive(&self, id: &NoteId) -> ActionOutcome {
        self.dispatch(id, ItemAction::Archive).await
    }

    /// Unarchives a note after confirmation, then refreshes the selected collection.
    pub async fn unarchive(&self, id: &NoteId) -> ActionOutcome {
        self.dispatch(id, ItemAction::Unarchive).await
    }

    /// Runs `action` on the rendered note `id`.
    ///
    /// On success the collection selected *when the call returns* is refreshed. On failure the
    /// error is shown through the notifier and the item's controls are re-enabled.
    pub async fn dispatch(&self, id: &NoteId, action: ItemAction) -> ActionOutcome {
        let item = {
            let state = self.0.state.lock();
            state.items().iter().find(|item| item.id() == id).cloned()
        };
        let Some(item) = item else {
            return ActionOutcome::Ignored;
        };
        if !item.is_enabled() || !item.actions().contains(&action) {
            return ActionOutcome::Ignored;
        }

        let title = item.note.title;
        if !self.0.notifier.confirm(&action.confirmation(&title)).await {
            return ActionOutcome::Cancelled;
        }

        self.set_pending(id, Some(action));
        let result = {
            let _busy = BusyGuard::new(self.0.busy.as_ref());
            match action {
                ItemAction::Delete => self.0.api.delete(id).await,
                ItemAction::Archive => self.0.api.archive(id).await,
                ItemAction::Unarchive => self.0.api.unarchive(id).await,
            }
        };

        match result {
            Ok(()) => {
                self.refresh().await;
                self.0.notifier.notify(&action.success_message(&title));
                ActionOutcome::Completed
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                debug!(%id, %action, "item action failed: {err}");
                self.0.notifier.notify(err.message());
                self.set_pending(id, None);
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Marks the controls of a rendered item busy or idle. No-op if the item is gone.
    fn set_pending(&self, id: &NoteId, pending: Option<ItemAction>) {
        let state = {
            let mut state = self.0.state.lock();
            match state.item_mut(id) {
                Some(item) => item.pending = pending,
                None => return,
            }
            state.clone()
        };
        self.notify_render(&state);
    }

    fn publish(&self, state: ListState) {
        *self.0.state.lock() = state.clone();
        self.notify_render(&state);
    }

    fn notify_render(&self, state: &ListState) {
        let callbacks = self.0.on_render.lock().clone();
        for callback in callbacks {
            callback.call(state);
        }
    }
}
