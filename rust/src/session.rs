//! Session providers supplying the optional `.SUFFIX` of client IDs.

/// Supplies the session token appended to IDs, if any.
pub trait SessionProvider: Send + Sync {
    /// Current session token. `None` (or an empty string) means no suffix.
    fn session_token(&self) -> Option<String>;
}

/// Provider for server contexts: never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySession;

impl SessionProvider for EmptySession {
    fn session_token(&self) -> Option<String> {
        None
    }
}

/// Provider returning a fixed token, e.g. a session number known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSession {
    token: String,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn session_token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}

/// A token is usable as a suffix only if it is a non-empty digit run.
pub(crate) fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        assert_eq!(EmptySession.session_token(), None);
    }

    #[test]
    fn test_static_session() {
        let s = StaticSession::new("42");
        assert_eq!(s.session_token().as_deref(), Some("42"));
    }

    #[test]
    fn test_is_valid_token() {
        assert!(is_valid_token("42"));
        assert!(is_valid_token("0007"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("4a"));
        assert!(!is_valid_token("4.2"));
    }
}
