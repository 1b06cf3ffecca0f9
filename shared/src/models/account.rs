//! Account Model

use super::Role;
use serde::{Deserialize, Serialize};

/// Account entity
///
/// `email` is stored normalized (trimmed, lowercase) and is unique across
/// all accounts. `password_hash` holds an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
}

impl Account {
    /// "First Last" as shown in lists and on the profile page
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Self-registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Admin account form, shared between add and edit mode
///
/// `edit_id` selects the mode: `None` creates an account, `Some(id)`
/// updates that account. In edit mode a blank password keeps the old one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    pub edit_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub verified: bool,
}

impl AccountForm {
    /// Prefill the form from an existing account (password left blank)
    pub fn for_edit(account: &Account) -> Self {
        Self {
            edit_id: Some(account.id),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            password: String::new(),
            role: account.role,
            verified: account.verified,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.edit_id.is_some()
    }
}
