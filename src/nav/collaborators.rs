//! Capabilities the navigation surface consumes but does not own:
//! the signed-in session, the content entitlement flag and the router.
//!
//! Each is a small trait so the host application can plug in its own
//! implementation. Simple in-process adapters are provided for the terminal
//! front end and for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ============================================================================
// Routes
// ============================================================================

pub mod routes {
    pub const HOME: &str = "/";
    pub const BLOG: &str = "/blog";
    pub const QUIZ: &str = "/quiz";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const SUBSCRIPTION_STATUS: &str = "/subscription/status";
    pub const CONTENT_ACCESS_TEST: &str = "/test-content-lock";

    /// Content route for a category or subcategory id.
    pub fn study_materials(id: &str) -> String {
        format!("/study-materials/{}", id)
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

pub trait AuthSession {
    fn is_authenticated(&self) -> bool;
    fn current_user(&self) -> Option<&User>;
    fn logout(&mut self);
}

/// Session held in memory; signed in iff a user is set.
#[derive(Debug, Clone, Default)]
pub struct LocalSession {
    user: Option<User>,
}

impl LocalSession {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl AuthSession for LocalSession {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "Signed out");
        }
    }
}

// ============================================================================
// Entitlement
// ============================================================================

pub trait ContentEntitlement {
    fn is_content_locked(&self) -> bool;
}

/// Shared flag the host can flip at any time; readers see the new value on
/// their next call.
impl ContentEntitlement for Arc<AtomicBool> {
    fn is_content_locked(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl ContentEntitlement for bool {
    fn is_content_locked(&self) -> bool {
        *self
    }
}

/// Label shown in the mobile bar's subscription slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionBadge {
    Upgrade,
    Subscribed,
}

impl SubscriptionBadge {
    pub fn from_locked(locked: bool) -> Self {
        if locked {
            SubscriptionBadge::Upgrade
        } else {
            SubscriptionBadge::Subscribed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionBadge::Upgrade => "Upgrade",
            SubscriptionBadge::Subscribed => "Subscribed",
        }
    }
}

// ============================================================================
// Routing
// ============================================================================

pub trait Navigator {
    fn navigate(&mut self, path: &str);
    fn current_path(&self) -> &str;
}

/// Router that records every navigation.
#[derive(Debug, Clone)]
pub struct InMemoryRouter {
    history: Vec<String>,
}

impl Default for InMemoryRouter {
    fn default() -> Self {
        Self::starting_at(routes::HOME)
    }
}

impl InMemoryRouter {
    pub fn starting_at(path: &str) -> Self {
        Self {
            history: vec![path.to_owned()],
        }
    }

    /// Every path visited, the starting path first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Paths navigated to since construction.
    pub fn navigations(&self) -> &[String] {
        &self.history[1..]
    }
}

impl Navigator for InMemoryRouter {
    fn navigate(&mut self, path: &str) {
        tracing::info!(path, "Navigate");
        self.history.push(path.to_owned());
    }

    fn current_path(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(routes::HOME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_follows_lock_flag() {
        assert_eq!(SubscriptionBadge::from_locked(true).label(), "Upgrade");
        assert_eq!(SubscriptionBadge::from_locked(false).label(), "Subscribed");
    }

    #[test]
    fn test_shared_flag_is_read_live() {
        let flag = Arc::new(AtomicBool::new(true));
        let reader = Arc::clone(&flag);
        assert!(reader.is_content_locked());
        flag.store(false, Ordering::Release);
        assert!(!reader.is_content_locked());
    }

    #[test]
    fn test_local_session_logout() {
        let mut session = LocalSession::signed_in(User {
            name: "Asha".into(),
            email: "asha@example.com".into(),
        });
        assert!(session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_router_records_history() {
        let mut router = InMemoryRouter::default();
        assert_eq!(router.current_path(), "/");
        router.navigate(&routes::study_materials("s1"));
        assert_eq!(router.current_path(), "/study-materials/s1");
        assert_eq!(router.navigations(), ["/study-materials/s1".to_string()]);
    }
}
