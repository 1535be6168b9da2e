//! The new-note form: live validation and submission.

use crate::{
    api::NewNote,
    busy::{BusyGuard, BusyIndicator},
    client::{NotesApi, NotesClientError},
    note::{Collection, Note},
    notifier::Notifier,
    option::{FormLabels, ViewConfig},
    util::callback::OnFormChange,
    view::list::NoteListView,
};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};
#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Label of the submit control while a note is being created.
pub const SUBMITTING_LABEL: &str = "Adding...";

/// An input field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
}

impl FormField {
    /// The error text shown when the field is shorter than `min` characters.
    pub fn error_text(self, min: usize) -> String {
        match self {
            FormField::Title => format!("Title must be at least {min} characters"),
            FormField::Body => format!("Content must be at least {min} characters"),
        }
    }
}

/// The validation result of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidation {
    /// Nothing entered yet. Not judged, so no error is shown.
    Empty,
    /// Entered, but shorter than `min` characters after trimming.
    TooShort { min: usize },
    Valid,
}

impl FieldValidation {
    /// Validates `value` against a minimum length counted in characters after trimming.
    pub fn check(value: &str, min: usize) -> Self {
        match value.trim().chars().count() {
            0 => FieldValidation::Empty,
            len if len < min => FieldValidation::TooShort { min },
            _ => FieldValidation::Valid,
        }
    }

    pub fn is_valid(self) -> bool {
        self == FieldValidation::Valid
    }
}

/// The validation result of the whole form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormValidation {
    pub title: FieldValidation,
    pub body: FieldValidation,
}

impl FormValidation {
    pub fn check(title: &str, body: &str, config: &ViewConfig) -> Self {
        Self {
            title: FieldValidation::check(title, config.min_title_length),
            body: FieldValidation::check(body, config.min_body_length),
        }
    }

    /// Both fields meet their minimum length.
    pub fn can_submit(&self) -> bool {
        self.title.is_valid() && self.body.is_valid()
    }

    /// The error text to show for `field`, if any.
    pub fn error(&self, field: FormField) -> Option<String> {
        let validation = match field {
            FormField::Title => self.title,
            FormField::Body => self.body,
        };
        match validation {
            FieldValidation::TooShort { min } => Some(field.error_text(min)),
            FieldValidation::Empty | FieldValidation::Valid => None,
        }
    }
}

/// Everything needed to paint the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub body: String,
    pub validation: FormValidation,
    /// A create call is outstanding.
    pub submitting: bool,
    pub submit_enabled: bool,
    pub submit_label: String,
}

impl FormState {
    fn new(config: &ViewConfig, labels: &FormLabels) -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            validation: FormValidation::check("", "", config),
            submitting: false,
            submit_enabled: false,
            submit_label: labels.submit_text.clone(),
        }
    }

    fn revalidate(&mut self, config: &ViewConfig) {
        self.validation = FormValidation::check(&self.title, &self.body, config);
        self.submit_enabled = !self.submitting && self.validation.can_submit();
    }

    fn finish_submit(&mut self, config: &ViewConfig, labels: &FormLabels) {
        self.submitting = false;
        self.submit_label = labels.submit_text.clone();
        self.revalidate(config);
    }
}

/// The result of [`NoteFormView::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The current input does not pass validation. Nothing was sent.
    Invalid,
    /// A previous submission is still running.
    InProgress,
    /// The note was created and the active collection refreshed.
    Created(Note),
    /// The service call failed. The form contents were kept.
    Failed(NotesClientError),
}

struct FormInner {
    api: Arc<dyn NotesApi>,
    notifier: Arc<dyn Notifier>,
    busy: Arc<dyn BusyIndicator>,
    list: NoteListView,
    config: ViewConfig,
    labels: FormLabels,
    state: Mutex<FormState>,
    on_change: Mutex<Vec<OnFormChange>>,
}

/// Captures new notes.
///
/// Validation is recomputed on every input change and decides whether the submit control is
/// enabled. A successful submission always refreshes the active collection.
#[derive(Clone)]
pub struct NoteFormView(Arc<FormInner>);

impl fmt::Debug for NoteFormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteFormView")
            .field("state", &*self.0.state.lock())
            .field("labels", &self.0.labels)
            .finish()
    }
}

impl NoteFormView {
    pub fn new(
        api: Arc<dyn NotesApi>,
        notifier: Arc<dyn Notifier>,
        busy: Arc<dyn BusyIndicator>,
        list: NoteListView,
        config: ViewConfig,
        labels: FormLabels,
    ) -> Self {
        let state = FormState::new(&config, &labels);
        Self(Arc::new(FormInner {
            api,
            notifier,
            busy,
            list,
            config,
            labels,
            state: Mutex::new(state),
            on_change: Mutex::new(Vec::new()),
        }))
    }

    /// Registers a callback executed after every state change.
    pub fn register_on_change<F: Into<OnFormChange>>(&self, on_change: F) {
        self.0.on_change.lock().push(on_change.into());
    }

    pub fn state(&self) -> FormState {
        self.0.state.lock().clone()
    }

    pub fn validation(&self) -> FormValidation {
        self.0.state.lock().validation
    }

    /// Whether the submit control is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.0.state.lock().submit_enabled
    }

    pub fn labels(&self) -> &FormLabels {
        &self.0.labels
    }

    pub fn set_title<T: Into<String>>(&self, title: T) {
        let title = title.into();
        self.update(|state| state.title = title);
    }

    pub fn set_body<T: Into<String>>(&self, body: T) {
        let body = body.into();
        self.update(|state| state.body = body);
    }

    /// Clears both fields.
    pub fn reset(&self) {
        self.update(|state| {
            state.title.clear();
            state.body.clear();
        });
    }

    /// Validates the input again and, if valid, creates the note.
    ///
    /// On success the form is cleared and the active collection is refreshed, whichever
    /// collection is selected. On failure the input is kept and the error is shown through the
    /// notifier.
    pub async fn submit(&self) -> SubmitOutcome {
        let new_note = {
            let mut state = self.0.state.lock();
            if state.submitting {
                return SubmitOutcome::InProgress;
            }
            if !FormValidation::check(&state.title, &state.body, &self.0.config).can_submit() {
                return SubmitOutcome::Invalid;
            }
            state.submitting = true;
            state.submit_label = SUBMITTING_LABEL.to_string();
            state.revalidate(&self.0.config);
            NewNote::new(state.title.trim(), state.body.trim())
        };
        self.emit();

        let result = {
            let _busy = BusyGuard::new(self.0.busy.as_ref());
            self.0.api.create(&new_note).await
        };

        match result {
            Ok(note) => {
                #[cfg(feature = "tracing")]
                debug!(id = %note.id, "note created");
                self.0.list.show(Collection::Active).await;
                self.update(|state| {
                    state.title.clear();
                    state.body.clear();
                    state.finish_submit(&self.0.config, &self.0.labels);
                });
                self.0.notifier.notify(&format!(
                    "Note \"{}\" added successfully!",
                    new_note.title
                ));
                SubmitOutcome::Created(note)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                warn!("creating note failed: {err}");
                self.update(|state| state.finish_submit(&self.0.config, &self.0.labels));
                self.0.notifier.notify(err.message());
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn update<F: FnOnce(&mut FormState)>(&self, f: F) {
        {
            let mut state = self.0.state.lock();
            f(&mut state);
            state.revalidate(&self.0.config);
        }
        self.emit();
    }

    fn emit(&self) {
        let state = self.state();
        let callbacks = self.0.on_change.lock().clone();
        for callback in callbacks {
            callback.call(&state);
        }
    }
}
