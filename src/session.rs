//! Client-held session: token, user profile, and the two clocks that bound
//! its life (absolute expiry and inactivity). Persisted as JSON under one
//! localStorage key; a value that fails to parse counts as no session.

use serde::{Deserialize, Serialize};

use crate::browser;

pub const SESSION_STORAGE_KEY: &str = "sessionData";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub user_type: UserType,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
    /// Epoch milliseconds after which the session is dead.
    pub expiry_time: f64,
    /// Epoch milliseconds of the last observed user interaction.
    pub last_activity: f64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionStatus {
    Active,
    Expired,
    Inactive,
}

impl SessionStatus {
    /// Message shown on the login screen when a session was torn down.
    pub fn expiry_message(self) -> Option<&'static str> {
        match self {
            SessionStatus::Active => None,
            SessionStatus::Expired => Some("Session expired. Please login again."),
            SessionStatus::Inactive => {
                Some("Session expired due to inactivity. Please login again.")
            }
        }
    }
}

impl Session {
    pub fn new(token: String, user: User, now_ms: f64, duration_ms: f64) -> Session {
        Session {
            token,
            user,
            expiry_time: now_ms + duration_ms,
            last_activity: now_ms,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms > self.expiry_time
    }

    pub fn is_inactive(&self, now_ms: f64, timeout_ms: f64) -> bool {
        now_ms - self.last_activity > timeout_ms
    }

    /// Expiry wins over inactivity when both hold.
    pub fn status(&self, now_ms: f64, inactivity_timeout_ms: f64) -> SessionStatus {
        if self.is_expired(now_ms) {
            SessionStatus::Expired
        } else if self.is_inactive(now_ms, inactivity_timeout_ms) {
            SessionStatus::Inactive
        } else {
            SessionStatus::Active
        }
    }
}

/// Parse a stored session. Corrupt JSON is treated as absent, per the
/// failure semantics of the auth lifecycle.
pub fn parse_session(raw: &str) -> Option<Session> {
    serde_json::from_str(raw).ok()
}

pub fn load() -> Option<Session> {
    let raw = browser::local_storage_get(SESSION_STORAGE_KEY)?;
    match parse_session(&raw) {
        Some(session) => Some(session),
        None => {
            // Corrupt entry: clear it silently so the next load is clean.
            browser::local_storage_remove(SESSION_STORAGE_KEY);
            None
        }
    }
}

pub fn save(session: &Session) {
    if let Ok(raw) = serde_json::to_string(session) {
        browser::local_storage_set(SESSION_STORAGE_KEY, &raw);
    }
}

pub fn clear() {
    browser::local_storage_remove(SESSION_STORAGE_KEY);
}

/// Refresh `lastActivity` on the stored copy, if one exists.
pub fn touch(now_ms: f64) {
    if let Some(mut session) = load() {
        session.last_activity = now_ms;
        save(&session);
    }
}

/// Bearer token of the stored session, used by the HTTP layer.
pub fn stored_token() -> Option<String> {
    load().map(|s| s.token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 7,
            username: "nadia".into(),
            user_type: UserType::Customer,
            firstname: "Nadia".into(),
            lastname: "Khan".into(),
            email: "nadia@example.com".into(),
        }
    }

    const HOUR: f64 = 3_600_000.0;
    const HALF_HOUR: f64 = 1_800_000.0;

    #[test]
    fn new_session_expires_one_duration_out() {
        let s = Session::new("tok".into(), test_user(), 1_000.0, HOUR);
        assert_eq!(s.expiry_time, 1_000.0 + HOUR);
        assert_eq!(s.last_activity, 1_000.0);
    }

    #[test]
    fn expired_iff_now_past_expiry() {
        let s = Session::new("tok".into(), test_user(), 0.0, HOUR);
        assert!(!s.is_expired(HOUR));
        assert!(s.is_expired(HOUR + 1.0));
    }

    #[test]
    fn inactivity_measured_from_last_activity() {
        let mut s = Session::new("tok".into(), test_user(), 0.0, 10.0 * HOUR);
        assert!(!s.is_inactive(HALF_HOUR, HALF_HOUR));
        assert!(s.is_inactive(HALF_HOUR + 1.0, HALF_HOUR));
        s.last_activity = HALF_HOUR;
        assert!(!s.is_inactive(HALF_HOUR + 1.0, HALF_HOUR));
    }

    #[test]
    fn expiry_takes_precedence_over_inactivity() {
        let s = Session::new("tok".into(), test_user(), 0.0, HOUR);
        // Both limits blown: report Expired.
        assert_eq!(s.status(2.0 * HOUR, HALF_HOUR), SessionStatus::Expired);
        assert_eq!(s.status(HOUR - 1.0, HALF_HOUR), SessionStatus::Inactive);
        assert_eq!(s.status(1.0, HALF_HOUR), SessionStatus::Active);
    }

    #[test]
    fn parse_round_trip() {
        let s = Session::new("tok".into(), test_user(), 42.0, HOUR);
        let raw = serde_json::to_string(&s).unwrap();
        assert_eq!(parse_session(&raw), Some(s));
    }

    #[test]
    fn corrupt_session_parses_to_none() {
        assert_eq!(parse_session("not json"), None);
        assert_eq!(parse_session(r#"{"token":"t"}"#), None);
    }

    #[test]
    fn user_type_wire_form_is_lowercase() {
        let u: User = serde_json::from_str(
            r#"{"id":1,"username":"root","user_type":"admin"}"#,
        )
        .unwrap();
        assert!(u.is_admin());
        assert_eq!(u.firstname, "");
    }

    #[test]
    fn session_json_uses_camel_case_keys() {
        let s = Session::new("tok".into(), test_user(), 0.0, HOUR);
        let raw = serde_json::to_string(&s).unwrap();
        assert!(raw.contains("expiryTime"));
        assert!(raw.contains("lastActivity"));
    }
}
