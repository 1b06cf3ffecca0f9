//! Fragment router
//!
//! Maps a location fragment to a [`Route`] and applies the access lists.

mod route;

pub use route::{Access, Route};

use crate::auth::SessionUser;

/// Outcome of resolving a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    /// Require the Admin role on admin routes instead of any session
    strict_admin: bool,
}

impl Router {
    pub fn new(strict_admin: bool) -> Self {
        Self { strict_admin }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_admin
    }

    pub fn resolve(&self, route: Route, user: Option<&SessionUser>) -> Resolution {
        match (route.access(), user) {
            (Access::Public, _) => Resolution::Render(route),
            (Access::Authenticated | Access::Admin, None) => Resolution::Redirect(Route::Login),
            (Access::Admin, Some(u)) if self.strict_admin && !u.is_admin() => {
                Resolution::Redirect(Route::Profile)
            }
            (_, Some(_)) => Resolution::Render(route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: 2,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_guest_redirected_to_login() {
        let router = Router::default();
        for route in [Route::Profile, Route::Requests, Route::Accounts, Route::Employees] {
            assert_eq!(router.resolve(route, None), Resolution::Redirect(Route::Login));
        }
        assert_eq!(router.resolve(Route::Register, None), Resolution::Render(Route::Register));
    }

    #[test]
    fn test_any_session_reaches_admin_pages_by_default() {
        let router = Router::default();
        let u = user(Role::User);
        assert_eq!(
            router.resolve(Route::Accounts, Some(&u)),
            Resolution::Render(Route::Accounts)
        );
    }

    #[test]
    fn test_strict_mode_requires_admin_role() {
        let router = Router::new(true);
        let u = user(Role::User);
        let a = user(Role::Admin);
        assert_eq!(
            router.resolve(Route::Departments, Some(&u)),
            Resolution::Redirect(Route::Profile)
        );
        assert_eq!(
            router.resolve(Route::Departments, Some(&a)),
            Resolution::Render(Route::Departments)
        );
        assert_eq!(
            router.resolve(Route::Requests, Some(&u)),
            Resolution::Render(Route::Requests)
        );
    }
}
