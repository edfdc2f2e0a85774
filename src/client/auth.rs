// File: ./src/client/auth.rs
// Login form handling for the portal's session-cookie authentication.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a login attempt. A rejection is a normal outcome, not an error:
/// network or markup failures are reported through `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The dashboard page served after logging in.
    LoggedIn { dashboard: String },
    Rejected,
}

impl LoginOutcome {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, LoginOutcome::LoggedIn { .. })
    }
}

/// Body of the login POST.
pub fn login_form(credentials: &Credentials, authenticity_token: &str) -> String {
    form_encode(&[
        ("utf8", "✓"),
        ("authenticity_token", authenticity_token),
        ("session[email]", &credentials.email),
        ("session[password]", &credentials.password),
        ("session[remember_me]", "0"),
        ("commit", "Log In"),
    ])
}

/// `application/x-www-form-urlencoded` serialization.
pub fn form_encode(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
