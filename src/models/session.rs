// src/models/session.rs

//! Authenticated session state.

/// Session state for one run of the entry engine.
///
/// The cookie is fixed for the process lifetime; the anti-forgery token is
/// re-read from the base page at the start of every cycle. The point
/// balance lives in the budget tracker, not here.
#[derive(Debug, Clone)]
pub struct Session {
    /// PHPSESSID cookie value, the sole authentication credential
    pub cookie: String,

    /// Per-session anti-forgery token required on entry submissions
    pub xsrf_token: String,
}

impl Session {
    /// Create a fresh session with no token yet.
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            xsrf_token: String::new(),
        }
    }
}
