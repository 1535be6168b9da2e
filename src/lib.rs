//! A client and view-model layer for a remote notes REST service.
//!
//! [`NotesClient`] talks to the service; [`NoteListView`](view::list::NoteListView),
//! [`ViewSelector`](view::selector::ViewSelector) and [`NoteFormView`](view::form::NoteFormView)
//! hold what the user sees and route their actions through the client. With the `wasm-js`
//! feature the [`dom`] module paints the views into a browser document.
//!
//! # Usage
//! ```no_run
//! use notes_app_client::{
//!     busy::CountingBusyIndicator, notifier::RecordingNotifier, NotesApp, NotesClientOptions,
//! };
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), notes_app_client::client::ClientBuildError> {
//! let app = NotesApp::with_client_options(
//!     NotesClientOptions::default(),
//!     Arc::new(RecordingNotifier::default()),
//!     Arc::new(CountingBusyIndicator::new()),
//! )?;
//! app.start().await;
//! println!("{:?}", app.list().state());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod busy;
pub mod client;
#[cfg(feature = "wasm-js")]
pub mod dom;
pub mod note;
pub mod notifier;
pub mod option;
pub mod render;
pub mod view;

mod util {
    pub mod callback;
}

#[cfg(test)]
mod testing;

pub use app::NotesApp;
pub use client::{NotesApi, NotesClient, NotesClientError};
pub use note::{Collection, Note, NoteId};
pub use option::{NotesClientOptions, ViewConfig};
pub use util::callback;
