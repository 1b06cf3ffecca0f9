use super::{Action, Block, Page};
use crate::auth::SessionUser;
use crate::router::Route;

pub fn render_profile(user: &SessionUser) -> Page {
    Page::new(Route::Profile, "My Profile")
        .with(Block::Heading(
            format!("{} {}", user.first_name, user.last_name).trim().to_string(),
        ))
        .with(Block::Fields(vec![
            ("Email".into(), user.email.clone()),
            ("Role".into(), user.role.to_string()),
        ]))
        .with(Block::Actions(vec![Action::new(
            "Change Password",
            "profile password",
        )]))
}
