//! Callbacks the views invoke to repaint after a state change.

use crate::view::{form::FormState, list::ListState};
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) type OnRenderInner = Box<dyn FnMut(&ListState) + Send>;

/// The callback executed every time a [`NoteListView`](crate::view::list::NoteListView) changes
/// state. It receives the new [`ListState`](crate::view::list::ListState).
///
/// # Usage
/// ```
/// use notes_app_client::callback::OnRender;
///
/// let on_render = OnRender::from(|state: &notes_app_client::view::list::ListState| {
///     // Repaint the list
/// });
/// ```
#[derive(Clone)]
pub struct OnRender(pub(crate) Arc<Mutex<OnRenderInner>>);

impl OnRender {
    pub(crate) fn call(&self, state: &ListState) {
        (self.0.lock())(state);
    }
}

impl<F> From<F> for OnRender
where
    F: FnMut(&ListState) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnRender(Arc::new(Mutex::new(Box::new(f))))
    }
}

pub(crate) type OnFormChangeInner = Box<dyn FnMut(&FormState) + Send>;

/// The callback executed every time a [`NoteFormView`](crate::view::form::NoteFormView) changes
/// its validation or submit state.
///
/// # Usage
/// ```
/// use notes_app_client::callback::OnFormChange;
///
/// let on_change = OnFormChange::from(|state: &notes_app_client::view::form::FormState| {
///     // Toggle error texts and the submit button
/// });
/// ```
#[derive(Clone)]
pub struct OnFormChange(pub(crate) Arc<Mutex<OnFormChangeInner>>);

impl OnFormChange {
    pub(crate) fn call(&self, state: &FormState) {
        (self.0.lock())(state);
    }
}

impl<F> From<F> for OnFormChange
where
    F: FnMut(&FormState) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnFormChange(Arc::new(Mutex::new(Box::new(f))))
    }
}
