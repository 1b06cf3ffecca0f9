//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee entity
///
/// Links an account (`user_id`) to a department (`dept_id`). Both
/// references are checked when the record is saved, not afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    /// Free-text external employee code
    pub employee_id: String,
    /// Account reference
    pub user_id: i64,
    /// Department reference
    pub dept_id: i64,
    pub position: String,
    pub hire_date: Option<NaiveDate>,
}

/// Employee form
///
/// The account is given by email and resolved at submit time; the hire
/// date stays text until then so the form can carry what the user typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    pub edit_id: Option<i64>,
    pub employee_id: String,
    pub email: String,
    pub position: String,
    pub dept_id: i64,
    pub hire_date: String,
}

impl EmployeeForm {
    /// Prefill from an existing record; `email` is the linked account's
    /// email, or empty when that account no longer exists.
    pub fn for_edit(employee: &Employee, email: Option<&str>) -> Self {
        Self {
            edit_id: Some(employee.id),
            employee_id: employee.employee_id.clone(),
            email: email.unwrap_or_default().to_string(),
            position: employee.position.clone(),
            dept_id: employee.dept_id,
            hire_date: employee
                .hire_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_json_shape() {
        let emp = Employee {
            id: 1,
            employee_id: "EMP-001".into(),
            user_id: 2,
            dept_id: 1,
            position: "Engineer".into(),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        let json = serde_json::to_value(&emp).unwrap();
        assert_eq!(json["employeeId"], "EMP-001");
        assert_eq!(json["userId"], 2);
        assert_eq!(json["deptId"], 1);
        assert_eq!(json["hireDate"], "2024-03-01");

        let form = EmployeeForm::for_edit(&emp, Some("ada@example.com"));
        assert_eq!(form.hire_date, "2024-03-01");
        assert_eq!(form.email, "ada@example.com");
    }
}
