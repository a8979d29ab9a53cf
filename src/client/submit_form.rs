//! src/client/submit_form.rs

use crate::client::waitlist_client::{SubmitOutcome, WaitlistClient};
use crate::domain::looks_like_email;

/// A transient message for the notification/toast surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Info(String),
    Error(String),
}

impl Notification {
    fn success(message: &str) -> Self {
        Self::Success(message.into())
    }

    fn info(message: &str) -> Self {
        Self::Info(message.into())
    }

    fn error(message: &str) -> Self {
        Self::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Info(m) | Self::Error(m) => m,
        }
    }
}

/// State behind the landing-page signup form: the text being typed and an
/// in-flight flag that the rendering layer binds to its disabled state.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    email: String,
    in_flight: bool,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the bound input; called on every keystroke.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Drives one submission attempt and yields the notification to show,
    /// or `None` when a previous attempt is still in flight.
    ///
    /// The local shape check only exists to skip obviously-malformed
    /// network calls; the service re-validates and its verdict is the one
    /// that counts. The input is cleared only when a new entry was added,
    /// so an already-registered visitor keeps what they typed. The
    /// in-flight flag is dropped before the outcome is inspected, so the
    /// form is usable again after every exit path. Failed attempts are not
    /// retried.
    pub async fn submit(&mut self, client: &WaitlistClient) -> Option<Notification> {
        if self.in_flight {
            return None;
        }

        if !looks_like_email(&self.email) {
            return Some(Notification::error("Enter a valid email."));
        }

        self.in_flight = true;
        let outcome = client.submit(&self.email).await;
        self.in_flight = false;

        let notification = match outcome {
            Ok(SubmitOutcome::AlreadyRegistered) => Notification::info("Email already registered."),
            Ok(SubmitOutcome::Added) => {
                self.email.clear();
                Notification::success("🎉 You're on the waitlist!")
            }
            Ok(SubmitOutcome::Unexpected) => Notification::error("Something went wrong."),
            Err(_) => Notification::error("Network error."),
        };

        Some(notification)
    }
}
