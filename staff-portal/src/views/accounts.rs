use super::{Action, Block, Cell, DASH, Page, Row, Table};
use crate::router::Route;
use crate::storage::Store;

pub fn render_accounts(store: &Store) -> Page {
    let mut table = Table::new(&["Name", "Email", "Role", "Verified"], "No accounts.");
    for a in &store.accounts {
        table.push(
            Row::new(vec![
                Cell::from(a.full_name()),
                Cell::from(a.email.as_str()),
                Cell::from(a.role.as_str()),
                Cell::from(if a.verified { "✓" } else { DASH }),
            ])
            .with_actions(vec![
                Action::new("Edit", format!("account edit {}", a.id)),
                Action::new("Reset Password", format!("account reset {}", a.id)),
                Action::new("Delete", format!("account delete {}", a.id)),
            ]),
        );
    }

    Page::new(Route::Accounts, "Accounts")
        .with(Block::Actions(vec![Action::new("+ Add Account", "account add")]))
        .with(Block::Table(table))
}
