//! Session state
//!
//! The signed-in user and the presentation flags derived from it.

use serde::{Deserialize, Serialize};
use shared::models::{Account, Role};

/// Snapshot of the signed-in account taken at login or session restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&Account> for SessionUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

/// Visibility flags for the navigation chrome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub authenticated: bool,
    pub is_admin: bool,
}

impl Presentation {
    pub fn not_authenticated(&self) -> bool {
        !self.authenticated
    }

    /// Class names in the order the chrome applies them
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![if self.authenticated {
            "authenticated"
        } else {
            "not-authenticated"
        }];
        if self.is_admin {
            classes.push("is-admin");
        }
        classes
    }
}

#[derive(Debug, Default, Clone)]
pub struct AuthState {
    user: Option<SessionUser>,
}

impl AuthState {
    pub fn set_session(&mut self, user: Option<SessionUser>) {
        match &user {
            Some(u) => tracing::info!(user_id = u.id, role = %u.role, "Session started"),
            None if self.user.is_some() => tracing::info!("Session ended"),
            None => {}
        }
        self.user = user;
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Flags derived only from whether there is a user and its role
    pub fn presentation(&self) -> Presentation {
        Presentation {
            authenticated: self.user.is_some(),
            is_admin: self.user.as_ref().is_some_and(|u| u.is_admin()),
        }
    }

    /// Label for the user menu
    pub fn nav_label(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.first_name.as_str())
            .unwrap_or("Guest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: 1,
            first_name: "Admin".into(),
            last_name: "User".into(),
            email: "admin@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_presentation_flags() {
        let mut auth = AuthState::default();
        let p = auth.presentation();
        assert!(p.not_authenticated());
        assert_eq!(p.classes(), vec!["not-authenticated"]);
        assert_eq!(auth.nav_label(), "Guest");

        auth.set_session(Some(user(Role::User)));
        assert_eq!(auth.presentation().classes(), vec!["authenticated"]);

        auth.set_session(Some(user(Role::Admin)));
        let p = auth.presentation();
        assert!(p.authenticated && p.is_admin);
        assert_eq!(p.classes(), vec!["authenticated", "is-admin"]);
        assert_eq!(auth.nav_label(), "Admin");

        auth.set_session(None);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.user_id(), None);
    }
}
