//! Route table

use std::fmt;

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Signed-in users only
    Authenticated,
    /// Admin pages
    Admin,
}

/// Every page of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Register,
    VerifyEmail,
    Login,
    Profile,
    Requests,
    Accounts,
    Departments,
    Employees,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Register,
        Route::VerifyEmail,
        Route::Login,
        Route::Profile,
        Route::Requests,
        Route::Accounts,
        Route::Departments,
        Route::Employees,
    ];

    /// Resolve a location fragment
    ///
    /// Accepts `#/accounts`, `/accounts` or `accounts`; a `?query` suffix
    /// is ignored. Empty and unknown fragments resolve to Home.
    pub fn from_fragment(fragment: &str) -> Route {
        let path = fragment.trim();
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.split('?').next().unwrap_or_default();
        let path = path.strip_prefix('/').unwrap_or(path);
        match path {
            "register" => Route::Register,
            "verify-email" => Route::VerifyEmail,
            "login" => Route::Login,
            "profile" => Route::Profile,
            "requests" => Route::Requests,
            "accounts" => Route::Accounts,
            "departments" => Route::Departments,
            "employees" => Route::Employees,
            _ => Route::Home,
        }
    }

    /// Path segment after `#/`
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "",
            Route::Register => "register",
            Route::VerifyEmail => "verify-email",
            Route::Login => "login",
            Route::Profile => "profile",
            Route::Requests => "requests",
            Route::Accounts => "accounts",
            Route::Departments => "departments",
            Route::Employees => "employees",
        }
    }

    /// Canonical fragment, e.g. `#/accounts`
    pub fn fragment(&self) -> String {
        format!("#/{}", self.path())
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Profile | Route::Requests => Access::Authenticated,
            Route::Accounts | Route::Departments | Route::Employees => Access::Admin,
            _ => Access::Public,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#/{}", self.path())
    }
}
