//! Console command grammar
//!
//! One line of input is one command, parsed with clap:
//!
//! ```text
//! go <route>              register | verify | login | logout
//! profile password        account add|edit <id>|reset <id>|delete <id>
//! dept add|edit|delete    employee add|edit|delete
//! request new             show | help | quit
//! ```

use clap::{CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "portal",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Navigate to a route (`accounts`, `#/login`, ...); empty means home
    Go {
        #[arg(default_value = "")]
        route: String,
    },
    /// Create a new account
    Register,
    /// Confirm the pending email address
    Verify,
    /// Sign in
    Login,
    /// Sign out
    Logout,
    /// Own profile actions
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Manage departments
    Dept {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Item requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Redraw the current page
    Show,
    /// List commands
    Help,
    /// Leave the portal
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProfileAction {
    /// Change your own password
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum AccountAction {
    Add,
    Edit { id: i64 },
    /// Set a new password on another account
    Reset { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum RecordAction {
    Add,
    Edit { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum RequestAction {
    /// Fill in and submit a new request
    New,
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
}

/// Rendered command overview
pub fn help_text() -> String {
    Line::command().render_help().to_string()
}
