// In-memory session state. A `Session` lives for one process run, is filled
// in by sign-up/sign-in and read by the gateway for every request. It is
// never persisted.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

/// The few JWT claims worth showing to the user after sign-in.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a bearer token for subsequent requests. Blank tokens are ignored.
    pub fn set_token(&mut self, token: &str) {
        let token = token.trim();
        if !token.is_empty() {
            self.token = Some(token.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Peek at the token payload when it is a JWT. Display only: the
    /// signature is not checked and a non-JWT token simply yields `None`.
    pub fn claims(&self) -> Option<TokenClaims> {
        let payload = self.token.as_deref()?.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn starts_without_token() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn set_and_clear_token() {
        let mut session = Session::new();
        session.set_token("abc");
        assert_eq!(session.token(), Some("abc"));
        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn blank_token_is_ignored() {
        let mut session = Session::new();
        session.set_token("   ");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn claims_are_read_from_jwt_payload() {
        let mut session = Session::new();
        session.set_token(&jwt_with_payload(r#"{"sub":"ana@example.com","exp":1700000000}"#));

        let claims = session.claims().unwrap();
        assert_eq!(claims.sub.as_deref(), Some("ana@example.com"));
        assert_eq!(
            claims.expires_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn opaque_token_has_no_claims() {
        let mut session = Session::new();
        session.set_token("abc");
        assert!(session.claims().is_none());
    }
}
