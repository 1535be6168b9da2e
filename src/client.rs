//! HTTP client for the notes service.

use crate::{
    api::{ApiResponse, NewNote},
    note::{Collection, Note, NoteId},
    option::{NotesClientOptions, DEFAULT_BASE_URL},
};
use futures::future::LocalBoxFuture;
use reqwest::Method;
use serde::{de::DeserializeOwned, de::IgnoredAny};
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::{debug, warn};
use url::Url;

/// The error returned by every [`NotesApi`] operation.
///
/// Transport failures and failures reported by the service end up in the same variant; only
/// the message tells them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotesClientError {
    /// The operation did not complete.
    #[error("{message}")]
    OperationFailed { message: String },
}

impl NotesClientError {
    pub fn failed<T: Into<String>>(message: T) -> Self {
        NotesClientError::OperationFailed {
            message: message.into(),
        }
    }

    /// The human-readable description of the failure.
    pub fn message(&self) -> &str {
        match self {
            NotesClientError::OperationFailed { message } => message,
        }
    }
}

/// The error returned when a [`NotesClient`] cannot be constructed.
#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Base URL cannot carry a path: {0}")]
    CannotBeABase(String),
}

/// Future returned by [`NotesApi`] operations.
pub type ApiFuture<'a, T> = LocalBoxFuture<'a, Result<T, NotesClientError>>;

/// The remote operations the views depend on.
///
/// Futures are not required to be `Send` so that implementations can run on the browser's
/// single thread.
pub trait NotesApi: Send + Sync {
    /// Lists notes with `archived == false`, in the order the service returns them.
    fn list_active(&self) -> ApiFuture<'_, Vec<Note>>;

    /// Lists notes with `archived == true`.
    fn list_archived(&self) -> ApiFuture<'_, Vec<Note>>;

    /// Creates a note. The service assigns its id and creation date.
    fn create<'a>(&'a self, note: &'a NewNote) -> ApiFuture<'a, Note>;

    fn delete<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()>;

    fn archive<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()>;

    fn unarchive<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()>;

    /// Lists the given collection.
    fn list(&self, collection: Collection) -> ApiFuture<'_, Vec<Note>> {
        match collection {
            Collection::Active => self.list_active(),
            Collection::Archived => self.list_archived(),
        }
    }
}

/// [`NotesApi`] implementation talking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct NotesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NotesClient {
    /// Creates a client for the default endpoint.
    pub fn new() -> Result<Self, ClientBuildError> {
        Self::new_with_options(NotesClientOptions::default())
    }

    /// Creates a client with the given options.
    pub fn new_with_options(options: NotesClientOptions) -> Result<Self, ClientBuildError> {
        let base_url = options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::CannotBeABase(base_url.to_string()));
        }

        Ok(Self {
            http: options.http_client.unwrap_or_default(),
            base_url,
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each of them.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request and unwraps the response envelope.
    ///
    /// Errors are returned as bare messages; callers prefix them with the operation name.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&NewNote>,
    ) -> Result<Option<T>, String> {
        #[cfg(feature = "tracing")]
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| e.to_string())?;
        envelope.into_result()
    }

    async fn send_void(&self, method: Method, url: Url) -> Result<(), String> {
        self.send::<IgnoredAny>(method, url, None).await.map(|_| ())
    }
}

fn operation_failed(context: &'static str) -> impl FnOnce(String) -> NotesClientError {
    move |message| {
        #[cfg(feature = "tracing")]
        warn!("{context}: {message}");
        NotesClientError::failed(format!("{context}: {message}"))
    }
}

impl NotesApi for NotesClient {
    fn list_active(&self) -> ApiFuture<'_, Vec<Note>> {
        Box::pin(async move {
            let url = self.endpoint(&["notes"]);
            let notes = self
                .send::<Vec<Note>>(Method::GET, url, None)
                .await
                .map_err(operation_failed("Failed to fetch notes"))?;
            Ok(notes.unwrap_or_default())
        })
    }

    fn list_archived(&self) -> ApiFuture<'_, Vec<Note>> {
        Box::pin(async move {
            let url = self.endpoint(&["notes", "archived"]);
            let notes = self
                .send::<Vec<Note>>(Method::GET, url, None)
                .await
                .map_err(operation_failed("Failed to fetch archived notes"))?;
            Ok(notes.unwrap_or_default())
        })
    }

    fn create<'a>(&'a self, note: &'a NewNote) -> ApiFuture<'a, Note> {
        Box::pin(async move {
            let url = self.endpoint(&["notes"]);
            self.send::<Note>(Method::POST, url, Some(note))
                .await
                .and_then(|created| {
                    created.ok_or_else(|| "response did not include the created note".to_string())
                })
                .map_err(operation_failed("Failed to create note"))
        })
    }

    fn delete<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = self.endpoint(&["notes", id.as_str()]);
            self.send_void(Method::DELETE, url)
                .await
                .map_err(operation_failed("Failed to delete note"))
        })
    }

    fn archive<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = self.endpoint(&["notes", id.as_str(), "archive"]);
            self.send_void(Method::POST, url)
                .await
                .map_err(operation_failed("Failed to archive note"))
        })
    }

    fn unarchive<'a>(&'a self, id: &'a NoteId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = self.endpoint(&["notes", id.as_str(), "unarchive"]);
            self.send_void(Method::POST, url)
                .await
                .map_err(operation_failed("Failed to unarchive note"))
        })
    }
}

#[cfg(all(test, not(target_family = "wasm")))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::{net::TcpListener, thread};
    use tiny_http::{Header, Response, Server};

    #[derive(Debug)]
    struct Recorded {
        method: String,
        url: String,
        body: String,
    }

    /// Serves one scripted `(status, body)` response per incoming request, then stops.
    fn serve(responses: Vec<(u16, String)>) -> (String, thread::JoinHandle<Vec<Recorded>>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            for (status, payload) in responses {
                let mut request = server.recv().unwrap();
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();
                recorded.push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body,
                });
                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .unwrap(),
                    );
                request.respond(response).unwrap();
            }
            recorded
        });

        (format!("http://127.0.0.1:{port}/v2"), handle)
    }

    fn client(base_url: &str) -> NotesClient {
        NotesClient::new_with_options(NotesClientOptions::builder().base_url(base_url).build())
            .unwrap()
    }

    fn note_json(id: &str, title: &str, archived: bool) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "body": "Milk, eggs",
            "createdAt": "2024-03-01T08:30:00.000Z",
            "archived": archived
        })
    }

    #[tokio::test]
    async fn list_active_keeps_server_order() {
        let payload = json!({
            "status": "success",
            "data": [note_json("b", "Second", false), note_json("a", "First", false)]
        });
        let (base, server) = serve(vec![(200, payload.to_string())]);

        let notes = client(&base).list_active().await.unwrap();
        let ids: Vec<_> = notes.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);

        let recorded = server.join().unwrap();
        assert_eq!(recorded[0].method, "GET");
        assert_eq!(recorded[0].url, "/v2/notes");
    }

    #[tokio::test]
    async fn list_archived_hits_archived_endpoint() {
        let payload = json!({ "status": "success", "data": [note_json("a", "Old", true)] });
        let (base, server) = serve(vec![(200, payload.to_string())]);

        let notes = client(&base).list(Collection::Archived).await.unwrap();
        assert!(notes.iter().all(|note| note.archived));

        let recorded = server.join().unwrap();
        assert_eq!(recorded[0].url, "/v2/notes/archived");
    }

    #[tokio::test]
    async fn successful_list_without_data_is_empty() {
        let (base, server) = serve(vec![(200, json!({ "status": "success" }).to_string())]);
        assert!(client(&base).list_active().await.unwrap().is_empty());
        server.join().unwrap();
    }

    #[tokio::test]
    async fn create_posts_json_and_returns_created_note() {
        let payload = json!({
            "status": "success",
            "message": "Note created",
            "data": note_json("notes-42", "Groceries", false)
        });
        let (base, server) = serve(vec![(201, payload.to_string())]);

        let created = client(&base)
            .create(&NewNote::new("Groceries", "Milk, eggs"))
            .await
            .unwrap();
        assert_eq!(created.id, NoteId::new("notes-42"));
        assert_eq!(created.title, "Groceries");
        assert!(!created.archived);

        let recorded = server.join().unwrap();
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].url, "/v2/notes");
        let sent: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(sent, json!({ "title": "Groceries", "body": "Milk, eggs" }));
    }

    #[tokio::test]
    async fn create_without_data_fails() {
        let (base, server) = serve(vec![(201, json!({ "status": "success" }).to_string())]);
        let err = client(&base)
            .create(&NewNote::new("Groceries", "Milk, eggs"))
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Failed to create note: response did not include the created note"
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn mutations_use_expected_routes() {
        let ok = json!({ "status": "success", "message": "done" }).to_string();
        let (base, server) = serve(vec![(200, ok.clone()), (200, ok.clone()), (200, ok)]);
        let client = client(&base);
        let id = NoteId::new("notes-1");

        client.delete(&id).await.unwrap();
        client.archive(&id).await.unwrap();
        client.unarchive(&id).await.unwrap();

        let recorded: Vec<_> = server
            .join()
            .unwrap()
            .into_iter()
            .map(|r| (r.method, r.url))
            .collect();
        assert_eq!(
            recorded,
            [
                ("DELETE".to_string(), "/v2/notes/notes-1".to_string()),
                ("POST".to_string(), "/v2/notes/notes-1/archive".to_string()),
                ("POST".to_string(), "/v2/notes/notes-1/unarchive".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn note_id_is_a_single_path_segment() {
        let ok = json!({ "status": "success" }).to_string();
        let (base, server) = serve(vec![(200, ok)]);

        client(&base).delete(&NoteId::new("a/b c")).await.unwrap();

        let recorded = server.join().unwrap();
        assert_eq!(recorded[0].url, "/v2/notes/a%2Fb%20c");
    }

    #[tokio::test]
    async fn failure_status_wins_over_http_success() {
        let payload = json!({ "status": "fail", "message": "Note is not found" });
        let (base, server) = serve(vec![(200, payload.to_string())]);

        let err = client(&base)
            .delete(&NoteId::new("missing"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            NotesClientError::failed("Failed to delete note: Note is not found")
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn http_error_with_envelope_reports_server_message() {
        let payload = json!({ "status": "fail", "message": "Gagal menambahkan catatan" });
        let (base, server) = serve(vec![(400, payload.to_string())]);

        let err = client(&base)
            .archive(&NoteId::new("notes-1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to archive note: Gagal menambahkan catatan"
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn transport_failure_uses_the_same_error_kind() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = client(&format!("http://127.0.0.1:{port}"))
            .list_active()
            .await
            .unwrap_err();
        assert!(matches!(err, NotesClientError::OperationFailed { .. }));
        assert!(err.message().starts_with("Failed to fetch notes: "));
    }

    #[tokio::test]
    async fn non_json_body_is_a_failure() {
        let (base, server) = serve(vec![(502, "Bad Gateway".to_string())]);
        let err = client(&base).list_archived().await.unwrap_err();
        assert!(err.message().starts_with("Failed to fetch archived notes: "));
        server.join().unwrap();
    }

    #[test]
    fn rejects_cannot_be_a_base_url() {
        let options = NotesClientOptions::builder()
            .base_url("mailto:notes@example.com")
            .build();
        assert!(matches!(
            NotesClient::new_with_options(options),
            Err(ClientBuildError::CannotBeABase(_))
        ));
    }

    #[test]
    fn default_client_points_at_default_endpoint() {
        let client = NotesClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }
}
