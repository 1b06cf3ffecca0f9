//! Static pages: home, register, verify-email, login

use super::{Action, BannerKind, Block, Page};
use crate::auth::SessionUser;
use crate::router::Route;

pub fn render_home(user: Option<&SessionUser>) -> Page {
    let page = Page::new(Route::Home, "Home");
    match user {
        None => page
            .with(Block::Text(
                "Manage accounts, departments, employees and item requests.".into(),
            ))
            .with(Block::Actions(vec![
                Action::new("Get Started", "go register"),
                Action::new("Login", "go login"),
            ])),
        Some(u) => {
            let mut actions = vec![
                Action::new("Profile", "go profile"),
                Action::new("My Requests", "go requests"),
            ];
            if u.is_admin() {
                actions.extend([
                    Action::new("Accounts", "go accounts"),
                    Action::new("Departments", "go departments"),
                    Action::new("Employees", "go employees"),
                ]);
            }
            page.with(Block::Text(format!("Welcome back, {}.", u.first_name)))
                .with(Block::Actions(actions))
        }
    }
}

pub fn render_register() -> Page {
    Page::new(Route::Register, "Register")
        .with(Block::Text(
            "Create an account with your first name, last name, email and a password of at least 6 characters."
                .into(),
        ))
        .with(Block::Actions(vec![
            Action::new("Register", "register"),
            Action::new("Already have an account? Login", "go login"),
        ]))
}

/// Verification screen for the pending email, if any
pub fn render_verify_email(pending_email: Option<&str>) -> Page {
    let page = Page::new(Route::VerifyEmail, "Verify Email");
    match pending_email {
        Some(email) => page
            .with(Block::Text(format!("A verification link has been sent to {email}")))
            .with(Block::Actions(vec![Action::new(
                "Simulate Email Verification",
                "verify",
            )])),
        None => page
            .with(Block::Text("No registration is waiting for verification.".into()))
            .with(Block::Actions(vec![Action::new("Register", "go register")])),
    }
}

/// Login page; `just_verified` reveals the one-time success banner
pub fn render_login(just_verified: bool) -> Page {
    let mut page = Page::new(Route::Login, "Login");
    if just_verified {
        page = page.with(Block::Banner {
            kind: BannerKind::Success,
            text: "Email verified! You may now log in.".into(),
        });
    }
    page.with(Block::Actions(vec![
        Action::new("Login", "login"),
        Action::new("Create an account", "go register"),
    ]))
}
