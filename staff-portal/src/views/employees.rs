use super::{Action, Block, Cell, DASH, Page, Row, Table};
use crate::router::Route;
use crate::storage::Store;

/// Employee list; links to vanished accounts or departments show as a dash
pub fn render_employees(store: &Store) -> Page {
    let mut table = Table::new(&["ID", "User", "Position", "Dept"], "No employees.");
    for e in &store.employees {
        let email = store.account(e.user_id).map_or(DASH, |a| a.email.as_str());
        let dept = store.department(e.dept_id).map_or(DASH, |d| d.name.as_str());
        table.push(
            Row::new(vec![
                Cell::from(e.employee_id.as_str()),
                Cell::from(email),
                Cell::from(e.position.as_str()),
                Cell::from(dept),
            ])
            .with_actions(vec![
                Action::new("Edit", format!("employee edit {}", e.id)),
                Action::new("Delete", format!("employee delete {}", e.id)),
            ]),
        );
    }

    let departments = store
        .departments
        .iter()
        .map(|d| format!("{}={}", d.id, d.name))
        .collect::<Vec<_>>()
        .join(", ");

    Page::new(Route::Employees, "Employees")
        .with(Block::Actions(vec![Action::new("+ Add Employee", "employee add")]))
        .with(Block::Table(table))
        .with(Block::Fields(vec![("Departments".into(), departments)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Passwords;
    use shared::models::Employee;

    #[test]
    fn test_dangling_links_render_dash() {
        let mut store = Store::seed(&Passwords::fast()).unwrap();
        store.employees.push(Employee {
            id: 1,
            employee_id: "EMP-9".into(),
            user_id: 1,
            dept_id: 1,
            position: "Lead".into(),
            hire_date: None,
        });
        store.employees.push(Employee {
            id: 2,
            employee_id: "EMP-10".into(),
            user_id: 77,
            dept_id: 55,
            position: "Ghost".into(),
            hire_date: None,
        });

        let page = render_employees(&store);
        let table = page.table().unwrap();
        assert_eq!(table.column(1), vec!["admin@example.com", DASH]);
        assert_eq!(table.column(3), vec!["Engineering", DASH]);
    }
}
