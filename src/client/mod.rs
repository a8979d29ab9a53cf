pub mod submit_form;
pub mod waitlist_client;

pub use submit_form::{Notification, SubmissionForm};
pub use waitlist_client::{SubmitOutcome, WaitlistClient, WaitlistClientSettings};
