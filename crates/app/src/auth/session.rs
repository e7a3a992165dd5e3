//! Session identity state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::models::UserId;

/// Storage bucket used for cart and order records when no user is
/// authenticated.
pub const GUEST_BUCKET: &str = "guest";

/// Per-session identity state.
///
/// Single writer (the auth service), many readers. Cart and order
/// operations key their remote collections off [`Session::cart_owner`],
/// resolved at each operation, so signing in or out redirects subsequent
/// remote writes without touching earlier ones.
#[derive(Debug, Default)]
pub struct Session {
    current: Mutex<Option<UserId>>,
}

impl Session {
    /// Create an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the authenticated user, when any.
    pub fn current_user_id(&self) -> Option<UserId> {
        self.lock().clone()
    }

    /// Whether a user is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// Remote storage owner for cart and order records: the authenticated
    /// user's id, falling back to the shared guest bucket.
    pub fn cart_owner(&self) -> String {
        self.lock()
            .as_ref()
            .map_or_else(|| GUEST_BUCKET.to_string(), ToString::to_string)
    }

    pub(crate) fn sign_in(&self, user: UserId) {
        *self.lock() = Some(user);
    }

    pub(crate) fn sign_out(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<UserId>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_guest_bucket() {
        let session = Session::new();

        assert!(!session.is_authenticated());
        assert_eq!(session.current_user_id(), None);
        assert_eq!(session.cart_owner(), GUEST_BUCKET);
    }

    #[test]
    fn sign_in_switches_the_owner() {
        let session = Session::new();

        session.sign_in(UserId::new("abc123"));

        assert!(session.is_authenticated());
        assert_eq!(session.cart_owner(), "abc123");
    }

    #[test]
    fn sign_out_reverts_to_guest() {
        let session = Session::new();
        session.sign_in(UserId::new("abc123"));

        session.sign_out();

        assert!(!session.is_authenticated());
        assert_eq!(session.cart_owner(), GUEST_BUCKET);
    }
}
