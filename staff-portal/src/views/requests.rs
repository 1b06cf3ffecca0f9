use super::{Action, Block, Cell, DASH, Page, Row, Table};
use crate::auth::SessionUser;
use crate::router::Route;
use crate::storage::Store;
use shared::models::RequestStatus;

fn badge_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Approved => "badge-success",
        RequestStatus::Rejected => "badge-danger",
        RequestStatus::Pending => "badge-warning",
    }
}

/// The signed-in user's own requests
pub fn render_requests(store: &Store, user: &SessionUser) -> Page {
    let mut table = Table::new(&["Type", "Items", "Status", "Date"], "You have no requests yet.");
    for r in store.requests_for(&user.email) {
        let items = r
            .items
            .iter()
            .map(|i| format!("{} ({})", i.name, i.qty))
            .collect::<Vec<_>>()
            .join(", ");
        table.push(Row::new(vec![
            Cell::from(r.kind.as_str()),
            Cell::from(if items.is_empty() { DASH.to_string() } else { items }),
            Cell::badge(r.status.as_str(), badge_class(r.status)),
            Cell::from(r.date.format("%Y-%m-%d").to_string()),
        ]));
    }

    let mut actions = vec![Action::new("+ New Request", "request new")];
    if table.is_empty() {
        actions.push(Action::new("Create One", "request new"));
    }

    Page::new(Route::Requests, "My Requests")
        .with(Block::Table(table))
        .with(Block::Actions(actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Passwords;
    use chrono::NaiveDate;
    use shared::models::{Request, RequestItem, Role};

    fn user(email: &str) -> SessionUser {
        SessionUser {
            id: 5,
            first_name: "Ada".into(),
            last_name: "L".into(),
            email: email.into(),
            role: Role::User,
        }
    }

    #[test]
    fn test_only_own_requests_listed() {
        let mut store = Store::seed(&Passwords::fast()).unwrap();
        store.requests.push(Request {
            id: 1,
            kind: "Equipment".into(),
            items: vec![
                RequestItem { name: "Laptop".into(), qty: 1 },
                RequestItem { name: "Mouse".into(), qty: 2 },
            ],
            status: RequestStatus::Pending,
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            employee_email: "ada@example.com".into(),
        });

        let page = render_requests(&store, &user("ada@example.com"));
        let table = page.table().unwrap();
        assert_eq!(table.column(1), vec!["Laptop (1), Mouse (2)"]);
        assert_eq!(table.rows[0].cells[2].badge, Some("badge-warning"));
        assert_eq!(table.column(3), vec!["2026-10-18"]);
        assert!(!page.actions().iter().any(|a| a.label == "Create One"));

        let other = render_requests(&store, &user("bob@example.com"));
        assert!(other.table().unwrap().is_empty());
        assert!(other.actions().iter().any(|a| a.label == "Create One"));
    }
}
