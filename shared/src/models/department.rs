//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Department form (add when `edit_id` is `None`, edit otherwise)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentForm {
    pub edit_id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl DepartmentForm {
    pub fn for_edit(department: &Department) -> Self {
        Self {
            edit_id: Some(department.id),
            name: department.name.clone(),
            description: department.description.clone(),
        }
    }
}
