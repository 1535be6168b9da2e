//! Wiring of the client and the views into one front end.

use crate::{
    busy::BusyIndicator,
    client::{ClientBuildError, NotesApi, NotesClient},
    notifier::Notifier,
    option::{FormLabels, NotesClientOptions, ViewConfig},
    view::{form::NoteFormView, list::NoteListView, selector::ViewSelector},
};
use std::sync::Arc;

/// The list, the selector and the form, sharing one client, notifier and busy indicator.
#[derive(Clone, Debug)]
pub struct NotesApp {
    list: NoteListView,
    selector: ViewSelector,
    form: NoteFormView,
}

impl NotesApp {
    pub fn new(
        api: Arc<dyn NotesApi>,
        notifier: Arc<dyn Notifier>,
        busy: Arc<dyn BusyIndicator>,
        config: ViewConfig,
        labels: FormLabels,
    ) -> Self {
        let list = NoteListView::new(api.clone(), notifier.clone(), busy.clone(), config.clone());
        let selector = ViewSelector::new(list.clone());
        let form = NoteFormView::new(api, notifier, busy, list.clone(), config, labels);
        Self {
            list,
            selector,
            form,
        }
    }

    /// Creates an app talking to the service over HTTP with default view settings.
    pub fn with_client_options(
        options: NotesClientOptions,
        notifier: Arc<dyn Notifier>,
        busy: Arc<dyn BusyIndicator>,
    ) -> Result<Self, ClientBuildError> {
        let client = NotesClient::new_with_options(options)?;
        Ok(Self::new(
            Arc::new(client),
            notifier,
            busy,
            ViewConfig::default(),
            FormLabels::default(),
        ))
    }

    /// Runs the first fetch cycle of the active collection.
    pub async fn start(&self) {
        self.list.refresh().await;
    }

    pub fn list(&self) -> &NoteListView {
        &self.list
    }

    pub fn selector(&self) -> &ViewSelector {
        &self.selector
    }

    pub fn form(&self) -> &NoteFormView {
        &self.form
    }
}
