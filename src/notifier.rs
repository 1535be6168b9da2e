//! Confirmation and feedback surface used by the views.
//!
//! The views only need two capabilities: asking a yes/no question and showing a transient
//! message. How either is presented is up to the implementation.

use futures::future::{ready, LocalBoxFuture};
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

/// Asks the user to confirm destructive actions and reports outcomes.
pub trait Notifier: Send + Sync {
    /// Asks a yes/no question. Resolves to `true` if the user agreed.
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, bool>;

    /// Shows a transient message.
    fn notify(&self, message: &str);
}

/// A [`Notifier`] that answers every question with a fixed value and keeps the messages it
/// was asked to show.
///
/// Useful for headless front ends and for tests.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    answers: Arc<Mutex<VecDeque<bool>>>,
    default_answer: bool,
    questions: Arc<Mutex<Vec<String>>>,
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Creates a notifier answering every question with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            default_answer: answer,
            questions: Arc::new(Mutex::new(Vec::new())),
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues an answer for the next question. Queued answers take precedence over the default.
    pub fn push_answer(&self, answer: bool) {
        self.answers.lock().push_back(answer);
    }

    /// The questions asked so far.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().clone()
    }

    /// The messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl Notifier for RecordingNotifier {
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, bool> {
        self.questions.lock().push(message.to_string());
        let answer = self
            .answers
            .lock()
            .pop_front()
            .unwrap_or(self.default_answer);
        Box::pin(ready(answer))
    }

    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
