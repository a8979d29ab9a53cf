//! src/client/waitlist_client.rs

use reqwest::Client;

#[derive(Clone, serde::Deserialize)]
pub struct WaitlistClientSettings {
    pub base_url: String,
    pub submit_timeout_ms: u64,
}

/// Outcome of a create-or-check call, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The email was not on the waitlist and has been added.
    Added,
    /// The email was already on the waitlist; nothing was written.
    AlreadyRegistered,
    /// The service answered 2xx but the body carried neither signal.
    Unexpected,
}

#[derive(serde::Serialize)]
struct SubmitRequest<'a> {
    email: &'a str,
}

#[derive(serde::Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    exists: Option<bool>,
    #[serde(default)]
    added: Option<bool>,
}

pub struct WaitlistClient {
    http_client: Client,
    settings: WaitlistClientSettings,
}

impl WaitlistClient {
    pub fn new(settings: WaitlistClientSettings) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_millis(settings.submit_timeout_ms))
                .build()
                .unwrap(),
            settings,
        }
    }

    /// Posts `email` to the waitlist endpoint and interprets the reply.
    ///
    /// Any non-2xx status is turned into an error, so callers see one
    /// failure channel for timeouts, refused connections and server
    /// failures alike. A 2xx reply whose body does not decode or carries
    /// neither `exists` nor `added` is reported as [`SubmitOutcome::Unexpected`].
    pub async fn submit(&self, email: &str) -> Result<SubmitOutcome, reqwest::Error> {
        let url = format!("{}/api/email", self.settings.base_url);
        let request_body = SubmitRequest { email };

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        let outcome = match response.json::<SubmitResponse>().await {
            Ok(SubmitResponse {
                exists: Some(true), ..
            }) => SubmitOutcome::AlreadyRegistered,
            Ok(SubmitResponse {
                added: Some(true), ..
            }) => SubmitOutcome::Added,
            Ok(_) | Err(_) => SubmitOutcome::Unexpected,
        };

        Ok(outcome)
    }
}
