//! Browser bindings: dialogs, the busy element, and mounting views into the document.

use crate::{
    app::NotesApp,
    busy::BusyIndicator,
    note::{Collection, NoteId},
    notifier::Notifier,
    render,
    view::{
        form::{FormField, FormState, NoteFormView},
        list::{ItemAction, ListState, NoteListView},
        selector::ViewSelector,
    },
};
use futures::future::LocalBoxFuture;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_utils::{document, window};
use std::fmt;
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, HtmlTextAreaElement};

/// Errors raised while touching the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("No element with id \"{0}\" in the document")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

fn element(id: &str) -> Result<Element, DomError> {
    document()
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))
}

/// Paints `html` into the element `id`, logging if it has disappeared.
fn paint(id: &str, html: &str) {
    match element(id) {
        Ok(element) => element.set_inner_html(html),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            error!("Failed to paint: {_e}");
        }
    }
}

/// Uses the window's blocking `confirm` and `alert` dialogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, bool> {
        Box::pin(async move {
            match window().confirm_with_message(message) {
                Ok(answer) => answer,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    error!("Failed to open confirm dialog: {_e:?}");
                    false
                }
            }
        })
    }

    fn notify(&self, message: &str) {
        if let Err(_e) = window().alert_with_message(message) {
            #[cfg(feature = "tracing")]
            error!("Failed to open alert dialog: {_e:?}");
        }
    }
}

/// Shows the busy state by toggling the `hidden` attribute of a document element.
#[derive(Debug, Clone)]
pub struct ElementBusyIndicator {
    element_id: String,
}

impl ElementBusyIndicator {
    /// Fails if the element is not in the document yet.
    pub fn new<T: Into<String>>(element_id: T) -> Result<Self, DomError> {
        let element_id = element_id.into();
        element(&element_id)?;
        Ok(Self { element_id })
    }

    fn set_hidden(&self, hidden: bool) -> Result<(), DomError> {
        let element = element(&self.element_id)?;
        if hidden {
            element.set_attribute("hidden", "")?;
        } else {
            element.remove_attribute("hidden")?;
        }
        Ok(())
    }
}

impl BusyIndicator for ElementBusyIndicator {
    fn show(&self) {
        if let Err(_e) = self.set_hidden(false) {
            #[cfg(feature = "tracing")]
            error!("Failed to show busy indicator: {_e}");
        }
    }

    fn hide(&self) {
        if let Err(_e) = self.set_hidden(true) {
            #[cfg(feature = "tracing")]
            error!("Failed to hide busy indicator: {_e}");
        }
    }
}

/// Keeps the input listeners of a mounted view alive. Dropping it detaches them; painting
/// continues either way.
#[must_use = "dropping a Mount detaches its listeners"]
pub struct Mount {
    listeners: Vec<EventListener>,
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Mount {
    /// Leaves the listeners attached for the lifetime of the page.
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }

    fn join(mut self, other: Mount) -> Self {
        self.listeners.extend(other.listeners);
        self
    }
}

fn child(container: &Element, selector: &str) -> Result<Element, DomError> {
    container
        .query_selector(selector)?
        .ok_or_else(|| DomError::MissingElement(selector.to_string()))
}

/// The closest element matching `selector` from the event target upwards.
fn event_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Paints the list into the element `id` on every state change and routes clicks on its item
/// controls to [`NoteListView::dispatch`] and on its reload control to [`reload_page`].
pub fn mount_list(list: &NoteListView, id: &str) -> Result<Mount, DomError> {
    let container = element(id)?;
    container.set_inner_html(&render::list_html(&list.state()));
    let paint_id = id.to_string();
    list.register_on_render(move |state: &ListState| {
        paint(&paint_id, &render::list_html(state))
    });

    let list = list.clone();
    let on_click = EventListener::new(&container, "click", move |event| {
        let Some(target) = event_target(event, "[data-action]") else {
            return;
        };
        let action = target.get_attribute("data-action").unwrap_or_default();
        if action == "reload" {
            if let Err(_e) = reload_page() {
                #[cfg(feature = "tracing")]
                error!("Failed to reload page: {_e}");
            }
            return;
        }
        let (Some(action), Some(id)) = (
            ItemAction::from_verb(&action),
            target.get_attribute("data-id"),
        ) else {
            return;
        };
        let list = list.clone();
        spawn_local(async move {
            list.dispatch(&NoteId::new(id), action).await;
        });
    });

    Ok(Mount {
        listeners: vec![on_click],
    })
}

/// Paints the selector buttons into the element `id` on every list state change and routes
/// clicks on them to [`ViewSelector::switch_to`].
pub fn mount_selector(
    selector: &ViewSelector,
    list: &NoteListView,
    id: &str,
) -> Result<Mount, DomError> {
    let container = element(id)?;
    container.set_inner_html(&render::selector_html(selector.current()));
    let paint_id = id.to_string();
    let painted = selector.clone();
    list.register_on_render(move |_: &ListState| {
        paint(&paint_id, &render::selector_html(painted.current()))
    });

    let selector = selector.clone();
    let on_click = EventListener::new(&container, "click", move |event| {
        let Some(collection) = event_target(event, "[data-view]")
            .and_then(|target| target.get_attribute("data-view"))
            .and_then(|name| Collection::from_name(&name))
        else {
            return;
        };
        let selector = selector.clone();
        spawn_local(async move {
            selector.switch_to(collection).await;
        });
    });

    Ok(Mount {
        listeners: vec![on_click],
    })
}

/// Brings the painted form in line with `state` without replacing its inputs.
fn sync_form(id: &str, state: &FormState) -> Result<(), DomError> {
    let container = element(id)?;
    for (field, value) in [(FormField::Title, &state.title), (FormField::Body, &state.body)] {
        let input = child(&container, &format!("#{}", render::input_id(field)))?;
        if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
            if input.value() != *value {
                input.set_value(value);
            }
        } else if let Some(input) = input.dyn_ref::<HtmlTextAreaElement>() {
            if input.value() != *value {
                input.set_value(value);
            }
        }
        match render::field_class(state, field) {
            Some(class) => input.set_attribute("class", class)?,
            None => input.remove_attribute("class")?,
        }

        let error = child(&container, &format!("#{}", render::error_id(field)))?;
        let text = state.validation.error(field);
        error.set_text_content(text.as_deref());
        error.toggle_attribute_with_force("hidden", text.is_none())?;
    }

    let submit = child(&container, r#"button[type="submit"]"#)?;
    submit.set_text_content(Some(&state.submit_label));
    submit.toggle_attribute_with_force("disabled", !state.submit_enabled)?;
    Ok(())
}

/// Paints the form into the element `id` once, keeps it in sync with the view, and routes
/// input and submit events to [`NoteFormView`].
pub fn mount_form(form: &NoteFormView, id: &str) -> Result<Mount, DomError> {
    let container = element(id)?;
    container.set_inner_html(&render::form_html(&form.state(), form.labels()));
    let sync_id = id.to_string();
    form.register_on_change(move |state: &FormState| {
        if let Err(_e) = sync_form(&sync_id, state) {
            #[cfg(feature = "tracing")]
            error!("Failed to update form: {_e}");
        }
    });

    let title = child(&container, &format!("#{}", render::input_id(FormField::Title)))?;
    let body = child(&container, &format!("#{}", render::input_id(FormField::Body)))?;
    let note_form = child(&container, "form")?;

    let title_form = form.clone();
    let on_title = EventListener::new(&title, "input", move |event| {
        if let Some(input) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        {
            title_form.set_title(input.value());
        }
    });

    let body_form = form.clone();
    let on_body = EventListener::new(&body, "input", move |event| {
        if let Some(input) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlTextAreaElement>().ok())
        {
            body_form.set_body(input.value());
        }
    });

    let form = form.clone();
    let on_submit = EventListener::new_with_options(
        &note_form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let form = form.clone();
            spawn_local(async move {
                form.submit().await;
            });
        },
    );

    Ok(Mount {
        listeners: vec![on_title, on_body, on_submit],
    })
}

/// Mounts the list, the selector and the form of `app` into the elements with the given ids.
pub fn mount_app(
    app: &NotesApp,
    list_id: &str,
    selector_id: &str,
    form_id: &str,
) -> Result<Mount, DomError> {
    Ok(mount_list(app.list(), list_id)?
        .join(mount_selector(app.selector(), app.list(), selector_id)?)
        .join(mount_form(app.form(), form_id)?))
}

/// Reloads the page; offered as the recovery from a failed fetch.
pub fn reload_page() -> Result<(), DomError> {
    window().location().reload()?;
    Ok(())
}

/// Runs [`NotesApp::start`] on the browser's event loop.
pub fn spawn_start(app: NotesApp) {
    spawn_local(async move {
        app.start().await;
    });
}
