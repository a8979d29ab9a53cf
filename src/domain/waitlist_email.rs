//! src/domain/waitlist_email.rs

/// A waitlist email address that passed the loose shape check.
///
/// The check is intentionally permissive: at least one non-whitespace
/// character, an `@`, another non-whitespace run, a `.`, and a final
/// non-whitespace run. It accepts plenty of undeliverable addresses
/// (multiple `@`, trailing dots in labels) and that looseness is part of
/// the contract; callers wanting deliverability must verify out of band.
#[derive(Debug)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    /// Accepts `s` iff it matches the full loose shape: no whitespace
    /// anywhere, an `@` with at least one character before it, and a later
    /// `.` with at least one character on each side.
    pub fn parse(s: String) -> Result<WaitlistEmail, String> {
        let contains_whitespace = s.chars().any(char::is_whitespace);

        if s.is_empty() || contains_whitespace || !has_email_shape(&s) {
            return Err(format!("{} is not a valid waitlist email.", s));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The client-side gate: true when any whitespace-free run of `s` contains
/// the email shape. Looser than [`WaitlistEmail::parse`], which requires
/// the whole string to match; the server remains the authority.
pub fn looks_like_email(s: &str) -> bool {
    s.split_whitespace().any(has_email_shape)
}

// `candidate` must already be whitespace-free. Scans for an `@` with at
// least one character before it, then a `.` at least two bytes further
// along and not in the final position. `@` and `.` are ASCII, so byte
// positions are safe even for multi-byte input.
fn has_email_shape(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    bytes.iter().enumerate().any(|(at, &b)| {
        b == b'@'
            && at >= 1
            && bytes[at + 1..]
                .iter()
                .enumerate()
                .any(|(gap, &c)| c == b'.' && gap >= 1 && at + 2 + gap < bytes.len())
    })
}

#[cfg(test)]
mod tests {
    use claim::{assert_err, assert_ok};
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    use super::{looks_like_email, WaitlistEmail};

    #[derive(Debug, Clone)]
    struct ValidEmailFixture(pub String);

    impl quickcheck::Arbitrary for ValidEmailFixture {
        fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
            let email = SafeEmail().fake_with_rng(g);
            Self(email)
        }
    }

    #[quickcheck_macros::quickcheck]
    fn valid_emails_are_parsed_successfully(valid_email: ValidEmailFixture) -> bool {
        WaitlistEmail::parse(valid_email.0).is_ok()
    }

    #[test]
    fn empty_string_is_rejected() {
        let email = "".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn email_missing_at_symbol_is_rejected() {
        let email = "ursuladomain.com".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn email_missing_subject_is_rejected() {
        let email = "@domain.com".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn email_without_dot_after_at_is_rejected() {
        let email = "ursula@domain".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn email_ending_in_a_dot_is_rejected() {
        let email = "ursula@domain.".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn email_containing_whitespace_is_rejected() {
        let email = "ursula le guin@domain.com".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn a_valid_email_is_parsed_successfully() {
        let email = "ursula@domain.com".to_string();
        assert_ok!(WaitlistEmail::parse(email));
    }

    // The shape check is deliberately loose; these stay accepted.
    #[test]
    fn multiple_at_symbols_are_accepted() {
        let email = "ursula@le@domain.com".to_string();
        assert_ok!(WaitlistEmail::parse(email));
    }

    #[test]
    fn dot_before_the_at_symbol_still_requires_one_after() {
        let email = "ursula.le@domain".to_string();
        assert_err!(WaitlistEmail::parse(email));
    }

    #[test]
    fn client_gate_matches_embedded_addresses() {
        assert!(looks_like_email("ursula@domain.com"));
        assert!(looks_like_email("contact me at ursula@domain.com please"));
        assert!(!looks_like_email("ursula at domain dot com"));
        assert!(!looks_like_email(""));
    }
}
