//! Client and view configuration types.
//!
//! Views take an explicit configuration object at construction time instead of reading
//! attributes off rendered elements.

/// The endpoint used when [`NotesClientOptions::base_url`] is not set.
pub const DEFAULT_BASE_URL: &str = "https://notes-api.dicoding.dev/v2";

/// Options for creating a [`NotesClient`](crate::client::NotesClient).
#[derive(Clone, Debug, Default, bon::Builder)]
#[builder(on(String, into))]
pub struct NotesClientOptions {
    /// Base URL of the notes service, without a trailing `/notes`. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,

    /// A preconfigured HTTP client, e.g. one with custom headers or proxies.
    pub http_client: Option<reqwest::Client>,
}

/// How the creation timestamp of a note is displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// Date and time.
    #[default]
    Locale,
    /// Date only.
    Short,
}

/// Display and validation settings shared by the list and the form.
///
/// Override single values with struct update syntax:
///
/// ```
/// use notes_app_client::option::ViewConfig;
///
/// let config = ViewConfig {
///     show_date: false,
///     ..Default::default()
/// };
/// assert_eq!(config.min_title_length, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    /// Whether list items show their creation date.
    pub show_date: bool,
    /// Format of the creation date.
    pub date_format: DateFormat,
    /// Maximum number of characters of a note body shown in the list. `None` and `Some(0)` show
    /// the whole body.
    pub max_content_length: Option<usize>,
    /// Minimum title length, in characters, after trimming.
    pub min_title_length: usize,
    /// Minimum body length, in characters, after trimming.
    pub min_body_length: usize,
}

impl ViewConfig {
    /// Default for [`ViewConfig::max_content_length`].
    pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 200;
    /// Default for [`ViewConfig::min_title_length`].
    pub const DEFAULT_MIN_TITLE_LENGTH: usize = 3;
    /// Default for [`ViewConfig::min_body_length`].
    pub const DEFAULT_MIN_BODY_LENGTH: usize = 5;
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_date: true,
            date_format: DateFormat::Locale,
            max_content_length: Some(Self::DEFAULT_MAX_CONTENT_LENGTH),
            min_title_length: Self::DEFAULT_MIN_TITLE_LENGTH,
            min_body_length: Self::DEFAULT_MIN_BODY_LENGTH,
        }
    }
}

/// Texts of the new-note form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormLabels {
    pub title_placeholder: String,
    pub body_placeholder: String,
    pub submit_text: String,
}

impl Default for FormLabels {
    fn default() -> Self {
        Self {
            title_placeholder: "Title".to_string(),
            body_placeholder: "Content".to_string(),
            submit_text: "Add Note".to_string(),
        }
    }
}
