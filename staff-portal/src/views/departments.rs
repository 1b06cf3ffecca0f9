use super::{Action, Block, Cell, DASH, Page, Row, Table};
use crate::router::Route;
use crate::storage::Store;

pub fn render_departments(store: &Store) -> Page {
    let mut table = Table::new(&["Name", "Description"], "No departments.");
    for d in &store.departments {
        let description = if d.description.is_empty() {
            DASH
        } else {
            d.description.as_str()
        };
        table.push(
            Row::new(vec![Cell::from(d.name.as_str()), Cell::from(description)]).with_actions(
                vec![
                    Action::new("Edit", format!("dept edit {}", d.id)),
                    Action::new("Delete", format!("dept delete {}", d.id)),
                ],
            ),
        );
    }

    Page::new(Route::Departments, "Departments")
        .with(Block::Actions(vec![Action::new("+ Add Department", "dept add")]))
        .with(Block::Table(table))
}
