//! Staff Portal - personnel and item-request management
//!
//! # Architecture
//!
//! A single-user console application over one persisted store. Every
//! user action runs the same loop: read the store, validate the form,
//! mutate, save the whole store, re-render the current page.
//!
//! # Module layout
//!
//! ```text
//! staff-portal/src/
//! ├── core/          # Config, App controller
//! ├── storage/       # Key-value slots (redb / memory) and the Store
//! ├── auth/          # Password hashing, session state
//! ├── router/        # Fragment routes and access rules
//! ├── services/      # Form handlers over the Store
//! ├── views/         # Declarative pages and the text renderer
//! ├── console/       # Command parsing and terminal I/O
//! ├── toast.rs       # Transient notifications
//! └── utils/         # Logging, field validation
//! ```

pub mod auth;
pub mod console;
pub mod core;
pub mod router;
pub mod services;
pub mod storage;
pub mod toast;
pub mod utils;
pub mod views;

// Re-export public types
pub use auth::{AuthState, Passwords, SessionUser};
pub use crate::core::{App, Config, Prompter};
pub use router::{Route, Router};
pub use storage::{KvStore, MemoryKv, RedbKv, Store};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load `.env`, make sure the working directory exists and start logging
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::debug!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Environment ready"
    );
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ___ _        __  __   ___         _        _
 / __| |_ __ _ / _|/ _| | _ \___ _ _| |_ __ _| |
 \__ \  _/ _` |  _|  _| |  _/ _ \ '_|  _/ _` | |
 |___/\__\__,_|_| |_|   |_| \___/_|  \__\__,_|_|
    "#
    );
}
