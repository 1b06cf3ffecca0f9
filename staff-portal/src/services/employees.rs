//! Employee records

use crate::storage::Store;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeForm};
use shared::util::normalize_email;

fn parse_hire_date(raw: &str) -> AppResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            AppError::validation("Hire date must be YYYY-MM-DD.").with_detail("field", "hireDate")
        })
}

/// Create or update an employee record
///
/// The typed email must belong to an existing account; no account is
/// created on the fly. The department must exist at save time.
pub fn save(store: &mut Store, form: &EmployeeForm) -> AppResult<Employee> {
    let employee_id = form.employee_id.trim();
    let position = form.position.trim();
    validate_required_text(employee_id, "Employee ID", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(position, "Position", MAX_NAME_LEN)?;

    let email = normalize_email(&form.email);
    let user_id = store
        .account_by_email(&email)
        .map(|a| a.id)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeAccountNotFound).with_detail("email", email))?;
    if store.department(form.dept_id).is_none() {
        return Err(AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", form.dept_id));
    }
    let hire_date = parse_hire_date(&form.hire_date)?;

    match form.edit_id {
        Some(id) => {
            let emp = store
                .employees
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
            emp.employee_id = employee_id.to_string();
            emp.user_id = user_id;
            emp.dept_id = form.dept_id;
            emp.position = position.to_string();
            emp.hire_date = hire_date;
            tracing::info!(employee_id = id, "Employee updated");
            Ok(emp.clone())
        }
        None => {
            let emp = Employee {
                id: store.next_id.employee(),
                employee_id: employee_id.to_string(),
                user_id,
                dept_id: form.dept_id,
                position: position.to_string(),
                hire_date,
            };
            tracing::info!(employee_id = emp.id, user_id, "Employee created");
            store.employees.push(emp.clone());
            Ok(emp)
        }
    }
}

pub fn delete(store: &mut Store, id: i64) -> AppResult<Employee> {
    let index = store
        .employees
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    let removed = store.employees.remove(index);
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{add_account, seeded};
    use shared::models::Role;

    fn form(email: &str) -> EmployeeForm {
        EmployeeForm {
            edit_id: None,
            employee_id: "EMP-001".into(),
            email: email.into(),
            position: "Engineer".into(),
            dept_id: 1,
            hire_date: "2024-03-01".into(),
        }
    }

    #[test]
    fn test_create_links_existing_account() {
        let (mut store, passwords) = seeded();
        let user_id = add_account(&mut store, &passwords, "ada@example.com", Role::User);

        let emp = save(&mut store, &form(" ADA@example.com")).unwrap();
        assert_eq!(emp.id, 1);
        assert_eq!(emp.user_id, user_id);
        assert_eq!(emp.hire_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(store.employees.len(), 1);
    }

    #[test]
    fn test_unknown_email_creates_nothing() {
        let (mut store, _) = seeded();
        let err = save(&mut store, &form("ghost@example.com")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeAccountNotFound);
        assert_eq!(err.message, "No account found with that email.");
        assert!(store.employees.is_empty());
        assert_eq!(store.accounts.len(), 1);
        assert_eq!(store.next_id.employee, 1);
    }

    #[test]
    fn test_missing_department_rejected() {
        let (mut store, _) = seeded();
        let mut f = form("admin@example.com");
        f.dept_id = 99;
        assert_eq!(
            save(&mut store, &f).unwrap_err().code,
            ErrorCode::DepartmentNotFound
        );
    }

    #[test]
    fn test_bad_hire_date_and_blank_date() {
        let (mut store, _) = seeded();
        let mut f = form("admin@example.com");
        f.hire_date = "03/01/2024".into();
        assert_eq!(
            save(&mut store, &f).unwrap_err().code,
            ErrorCode::ValidationFailed
        );

        f.hire_date = String::new();
        let emp = save(&mut store, &f).unwrap();
        assert_eq!(emp.hire_date, None);
    }

    #[test]
    fn test_edit_relinks_account() {
        let (mut store, passwords) = seeded();
        let emp = save(&mut store, &form("admin@example.com")).unwrap();
        let other = add_account(&mut store, &passwords, "ada@example.com", Role::User);

        let mut f = EmployeeForm::for_edit(&emp, Some("admin@example.com"));
        f.email = "ada@example.com".into();
        f.dept_id = 2;
        let updated = save(&mut store, &f).unwrap();
        assert_eq!(updated.user_id, other);
        assert_eq!(updated.dept_id, 2);
        assert_eq!(store.employees.len(), 1);
    }

    #[test]
    fn test_account_deletion_leaves_dangling_link() {
        let (mut store, passwords) = seeded();
        let user_id = add_account(&mut store, &passwords, "ada@example.com", Role::User);
        let emp = save(&mut store, &form("ada@example.com")).unwrap();

        crate::services::accounts::delete(&mut store, user_id, Some(1)).unwrap();
        assert_eq!(store.employee(emp.id).unwrap().user_id, user_id);
        assert!(store.account(user_id).is_none());
    }

    #[test]
    fn test_delete_employee() {
        let (mut store, _) = seeded();
        let emp = save(&mut store, &form("admin@example.com")).unwrap();
        delete(&mut store, emp.id).unwrap();
        assert!(store.employees.is_empty());
        assert_eq!(
            delete(&mut store, emp.id).unwrap_err().code,
            ErrorCode::EmployeeNotFound
        );
    }
}
