pub mod waitlist_email;

pub use waitlist_email::{looks_like_email, WaitlistEmail};
