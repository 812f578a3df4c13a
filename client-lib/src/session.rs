use std::sync::Mutex;

/// The resolved actor driving a view's actions.
///
/// Identity resolution deliberately degrades to `Anonymous` on any failure
/// (expired token, network error) so public views stay usable while logged
/// out. Ownership-gated controls must only be computed once a `Viewer` is
/// in hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User { id: String, username: String },
}

impl Viewer {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Viewer::Anonymous)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { id, .. } => Some(id),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { username, .. } => Some(username),
        }
    }
}

/// Explicit holder of the bearer token, created at application start and
/// shared with every [`crate::ApiMethods`] instance. A login performed
/// through one client is visible to all views using the same session.
///
/// The token is never validated or refreshed client-side; a stale token
/// simply makes the backend reject the request.
#[derive(Debug, Default)]
pub struct Session {
    token: Mutex<Option<String>>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn with_token(token: impl Into<String>) -> Session {
        Session {
            token: Mutex::new(Some(token.into())),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.lock() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    // Nothing can panic while the guard is held, but a poisoned lock
    // should still hand the token back rather than take the session down.
    fn lock(&self) -> ::std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let session = Session::new();
        assert!(!session.is_authenticated());

        session.set_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.clear();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_poisoned_lock_still_yields_the_token() {
        let session = ::std::sync::Arc::new(Session::with_token("abc"));

        let clone = session.clone();
        let _ = ::std::thread::spawn(move || {
            let _guard = clone.lock();
            panic!("poison the session lock");
        })
        .join();

        assert_eq!(session.token().as_deref(), Some("abc"));
        session.set_token("def");
        assert_eq!(session.token().as_deref(), Some("def"));
    }

    #[test]
    fn test_anonymous_viewer_has_no_identity() {
        let viewer = Viewer::Anonymous;
        assert!(viewer.is_anonymous());
        assert_eq!(viewer.id(), None);
        assert_eq!(viewer.username(), None);
    }
}
