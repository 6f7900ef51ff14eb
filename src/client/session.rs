//! Session
//!
//! Bearer token and cached user profile, persisted through a [`TokenStore`]
//! so the browser can keep them in localStorage.

use std::cell::RefCell;

use crate::models::UserProfile;

/// Storage keys used by persistent stores
pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

/// Persistence backend for the session
pub trait TokenStore {
    fn load_token(&self) -> Option<String>;
    fn save_token(&self, token: &str);
    fn load_user(&self) -> Option<UserProfile>;
    fn save_user(&self, user: &UserProfile);
    fn clear(&self);
}

/// Non-persistent store, used by the CLI and tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
    user: RefCell<Option<UserProfile>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
            user: RefCell::new(None),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save_token(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn load_user(&self) -> Option<UserProfile> {
        self.user.borrow().clone()
    }

    fn save_user(&self, user: &UserProfile) {
        *self.user.borrow_mut() = Some(user.clone());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
        *self.user.borrow_mut() = None;
    }
}

/// Explicit session object handed to the API client at construction
pub struct Session {
    token: RefCell<Option<String>>,
    user: RefCell<Option<UserProfile>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Restore whatever the store already holds
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self {
            token: RefCell::new(store.load_token()),
            user: RefCell::new(store.load_user()),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryTokenStore::default()))
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.store.save_token(&token);
        *self.token.borrow_mut() = Some(token);
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.user.borrow().clone()
    }

    pub fn set_user(&self, user: UserProfile) {
        self.store.save_user(&user);
        *self.user.borrow_mut() = Some(user);
    }

    /// Drop token and profile, in memory and in the store
    pub fn clear(&self) {
        self.store.clear();
        *self.token.borrow_mut() = None;
        *self.user.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    #[test]
    fn test_session_restores_from_store() {
        let session = Session::new(Box::new(MemoryTokenStore::with_token("abc")));
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert!(session.user().is_none());
    }

    #[test]
    fn test_session_clear() {
        let session = Session::in_memory();
        session.set_token("t");
        session.set_user(UserProfile {
            id: "u1".into(),
            email: "chef@example.com".into(),
            name: None,
            role: UserRole::Owner,
            account_id: Some("a1".into()),
        });
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
