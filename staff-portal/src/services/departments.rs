//! Department management

use crate::storage::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, DepartmentForm};

pub fn save(store: &mut Store, form: &DepartmentForm) -> AppResult<Department> {
    let name = form.name.trim();
    let description = form.description.trim();
    validate_required_text(name, "Department name", MAX_NAME_LEN)?;
    validate_optional_text(description, "Description", MAX_NOTE_LEN)?;

    match form.edit_id {
        Some(id) => {
            let dept = store
                .departments
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", id))?;
            dept.name = name.to_string();
            dept.description = description.to_string();
            tracing::info!(department_id = id, "Department updated");
            Ok(dept.clone())
        }
        None => {
            let dept = Department {
                id: store.next_id.department(),
                name: name.to_string(),
                description: description.to_string(),
            };
            tracing::info!(department_id = dept.id, name = %dept.name, "Department created");
            store.departments.push(dept.clone());
            Ok(dept)
        }
    }
}

/// Remove a department
///
/// Employees pointing at it keep their `dept_id`; lists show them without
/// a department name.
pub fn delete(store: &mut Store, id: i64) -> AppResult<Department> {
    let index = store
        .departments
        .iter()
        .position(|d| d.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", id))?;
    let removed = store.departments.remove(index);
    let orphaned = store.employees.iter().filter(|e| e.dept_id == id).count();
    tracing::info!(department_id = id, orphaned, "Department deleted");
    Ok(removed)
}
