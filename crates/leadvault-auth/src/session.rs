use std::sync::atomic::{AtomicBool, Ordering};

/// Process-local admin login flag.
///
/// Ephemeral session state scoped to one process lifetime: it starts unset,
/// is set by a successful password verification, and is cleared by logout.
/// Nothing about it is persisted; it is deliberately not a session token.
#[derive(Debug, Default)]
pub struct Session {
    logged_in: AtomicBool,
}

impl Session {
    /// A fresh, logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the admin is currently logged in.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Relaxed)
    }

    /// Mark the session as logged in.
    pub fn mark_logged_in(&self) {
        self.logged_in.store(true, Ordering::Relaxed);
    }

    /// Clear the login flag. Idempotent.
    pub fn clear(&self) {
        self.logged_in.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        assert!(!Session::new().is_logged_in());
    }

    #[test]
    fn login_then_logout() {
        let session = Session::new();
        session.mark_logged_in();
        assert!(session.is_logged_in());
        session.clear();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn clear_is_idempotent() {
        let session = Session::new();
        session.clear();
        session.clear();
        assert!(!session.is_logged_in());
    }
}
