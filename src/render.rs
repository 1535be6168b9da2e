//! HTML rendering of view state.
//!
//! Pure functions from state to markup; painting them into a document is left to the caller
//! (see `dom` for the browser binding).

use crate::{
    note::Collection,
    option::FormLabels,
    view::{
        form::{FormField, FormState},
        list::{ListState, NoteItemView},
    },
};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

fn item_html(item: &NoteItemView) -> String {
    let buttons: String = item
        .actions()
        .iter()
        .map(|action| {
            format!(
                r#"<button class="{verb}-btn" data-action="{verb}" data-id="{id}"{disabled}>{label}</button>"#,
                verb = action.verb(),
                id = html_escape(item.id().as_str()),
                disabled = disabled(!item.is_enabled()),
                label = item.control_label(*action),
            )
        })
        .collect();

    let date = item
        .date
        .as_deref()
        .map(|date| format!("<small>{}</small>", html_escape(date)))
        .unwrap_or_default();

    format!(
        r#"<article class="note-item" data-id="{id}"><div class="note-header"><h3>{title}</h3><div class="note-actions">{buttons}</div></div><p>{excerpt}</p>{date}</article>"#,
        id = html_escape(item.id().as_str()),
        title = html_escape(&item.note.title),
        excerpt = html_escape(&item.excerpt),
    )
}

/// Renders the list. Every state replaces the previous markup entirely.
pub fn list_html(state: &ListState) -> String {
    match state {
        ListState::Idle => String::new(),
        ListState::Loading(_) => "<loading-indicator></loading-indicator>".to_string(),
        ListState::Rendered { items, .. } => items.iter().map(item_html).collect(),
        ListState::Empty { message, .. } => {
            format!(r#"<p class="empty">{}</p>"#, html_escape(message))
        }
        ListState::Errored { message, .. } => format!(
            r#"<p class="error">{}</p><button class="reload-btn" data-action="reload">Reload</button>"#,
            html_escape(message)
        ),
    }
}

/// Renders the two selector buttons, marking the selected one.
pub fn selector_html(current: Collection) -> String {
    let button = |collection: Collection, label: &str| {
        let active = if collection == current { " active" } else { "" };
        format!(r#"<button class="toggle-btn{active}" data-view="{collection}">{label}</button>"#)
    };
    format!(
        r#"<div class="view-toggle">{}{}</div>"#,
        button(Collection::Active, "📝 Active Notes"),
        button(Collection::Archived, "📦 Archived Notes"),
    )
}

/// Id of the element holding `field`'s value.
pub fn input_id(field: FormField) -> &'static str {
    match field {
        FormField::Title => "title",
        FormField::Body => "body",
    }
}

/// Id of the element holding `field`'s error text.
pub fn error_id(field: FormField) -> &'static str {
    match field {
        FormField::Title => "titleError",
        FormField::Body => "bodyError",
    }
}

/// The class marking a field invalid or valid. Empty fields get none.
pub fn field_class(state: &FormState, field: FormField) -> Option<&'static str> {
    let validation = match field {
        FormField::Title => state.validation.title,
        FormField::Body => state.validation.body,
    };
    if state.validation.error(field).is_some() {
        Some("invalid")
    } else if validation.is_valid() {
        Some("valid")
    } else {
        None
    }
}

/// Renders the form with its current values, error texts and submit control.
///
/// Both error elements are always present and `hidden` while their field has no error, so the
/// form can be updated in place afterwards.
pub fn form_html(state: &FormState, labels: &FormLabels) -> String {
    let class = |field: FormField| {
        field_class(state, field)
            .map(|class| format!(r#" class="{class}""#))
            .unwrap_or_default()
    };
    let error = |field: FormField| {
        let text = state.validation.error(field);
        format!(
            r#"<small id="{}" class="field-error"{}>{}</small>"#,
            error_id(field),
            if text.is_some() { "" } else { " hidden" },
            html_escape(text.as_deref().unwrap_or_default())
        )
    };

    format!(
        concat!(
            r#"<form id="noteForm">"#,
            r#"<div><input type="text" id="{title_id}" placeholder="{title_placeholder}" value="{title}"{title_class} required />{title_error}</div>"#,
            r#"<div><textarea id="{body_id}" placeholder="{body_placeholder}"{body_class} required>{body}</textarea>{body_error}</div>"#,
            r#"<button type="submit"{disabled}>{submit}</button>"#,
            r#"</form>"#
        ),
        title_id = input_id(FormField::Title),
        title_placeholder = html_escape(&labels.title_placeholder),
        title = html_escape(&state.title),
        title_class = class(FormField::Title),
        title_error = error(FormField::Title),
        body_id = input_id(FormField::Body),
        body_placeholder = html_escape(&labels.body_placeholder),
        body_class = class(FormField::Body),
        body = html_escape(&state.body),
        body_error = error(FormField::Body),
        disabled = disabled(!state.submit_enabled),
        submit = html_escape(&state.submit_label),
    )
}
