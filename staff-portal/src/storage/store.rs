//! The entity store
//!
//! One JSON document holds every collection plus the id counters. It is
//! read once at startup and rewritten whole after each mutation.

use super::{KvStore, STORE_KEY};
use crate::auth::Passwords;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{Account, Department, Employee, Request, Role};

/// Seeded administrator credentials
pub const SEED_ADMIN_EMAIL: &str = "admin@example.com";
pub const SEED_ADMIN_PASSWORD: &str = "Password123!";

/// Per-kind id counters. Each call hands out the current value and advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextId {
    pub account: i64,
    pub department: i64,
    pub employee: i64,
    pub request: i64,
}

impl Default for NextId {
    fn default() -> Self {
        Self {
            account: 1,
            department: 1,
            employee: 1,
            request: 1,
        }
    }
}

impl NextId {
    pub fn account(&mut self) -> i64 {
        bump(&mut self.account)
    }

    pub fn department(&mut self) -> i64 {
        bump(&mut self.department)
    }

    pub fn employee(&mut self) -> i64 {
        bump(&mut self.employee)
    }

    pub fn request(&mut self) -> i64 {
        bump(&mut self.request)
    }
}

fn bump(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub next_id: NextId,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub requests: Vec<Request>,
}

impl Store {
    /// Read the persisted store, or fall back to the seed
    ///
    /// A missing slot, a storage read failure and unparsable JSON all end
    /// in the seed; nothing is reported to the user. The seed is not
    /// written back until the first mutation saves it.
    pub fn load(kv: &dyn KvStore, passwords: &Passwords) -> AppResult<Self> {
        match kv.get(STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Store>(&raw) {
                Ok(store) => {
                    tracing::info!(
                        accounts = store.accounts.len(),
                        departments = store.departments.len(),
                        employees = store.employees.len(),
                        requests = store.requests.len(),
                        "Store loaded"
                    );
                    return Ok(store);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Stored data is corrupted, reseeding");
                }
            },
            Ok(None) => tracing::info!("No stored data, seeding defaults"),
            Err(e) => tracing::warn!(error = %e, "Stored data is unreadable, reseeding"),
        }
        Self::seed(passwords)
    }

    /// Default data: one verified admin and two departments
    pub fn seed(passwords: &Passwords) -> AppResult<Self> {
        Ok(Self {
            next_id: NextId {
                account: 2,
                department: 3,
                employee: 1,
                request: 1,
            },
            accounts: vec![Account {
                id: 1,
                first_name: "Admin".into(),
                last_name: "User".into(),
                email: SEED_ADMIN_EMAIL.into(),
                password_hash: passwords.hash(SEED_ADMIN_PASSWORD)?,
                role: Role::Admin,
                verified: true,
            }],
            departments: vec![
                Department {
                    id: 1,
                    name: "Engineering".into(),
                    description: "Software team".into(),
                },
                Department {
                    id: 2,
                    name: "HR".into(),
                    description: "Human Resources".into(),
                },
            ],
            employees: Vec::new(),
            requests: Vec::new(),
        })
    }

    /// Serialize the whole store into its slot
    pub fn save(&self, kv: &mut dyn KvStore) -> AppResult<()> {
        let raw = serde_json::to_string(self)
            .map_err(|e| AppError::internal(format!("Serialize store: {e}")))?;
        kv.set(STORE_KEY, &raw)
    }

    // ========== Lookups ==========

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_mut(&mut self, id: i64) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Exact match on an already normalized email
    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    /// Whether `email` belongs to an account other than `except`
    pub fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email == email && Some(a.id) != except)
    }

    pub fn department(&self, id: i64) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Requests submitted by `email`, in creation order
    pub fn requests_for<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a Request> + 'a {
        self.requests.iter().filter(move |r| r.employee_email == email)
    }
}
