//! Declarative views
//!
//! Render functions read the store and session and return a [`Page`]
//! value. They never mutate anything; the front-end decides how to draw
//! a page (see [`text`]).

mod accounts;
mod departments;
mod employees;
mod pages;
mod profile;
mod requests;
pub mod text;

pub use accounts::render_accounts;
pub use departments::render_departments;
pub use employees::render_employees;
pub use pages::{render_home, render_login, render_register, render_verify_email};
pub use profile::render_profile;
pub use requests::render_requests;

use crate::router::Route;

/// Placeholder for missing values in tables
pub const DASH: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(route: Route, title: impl Into<String>) -> Self {
        Self {
            route,
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// First table on the page
    pub fn table(&self) -> Option<&Table> {
        self.blocks.iter().find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn banner(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Banner { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Every action reachable from the page, row actions included
    pub fn actions(&self) -> Vec<&Action> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Actions(actions) => out.extend(actions.iter()),
                Block::Table(t) => out.extend(t.rows.iter().flat_map(|r| r.actions.iter())),
                _ => {}
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Text(String),
    Banner { kind: BannerKind, text: String },
    /// Label / value pairs
    Fields(Vec<(String, String)>),
    Table(Table),
    Actions(Vec<Action>),
}

/// A user-triggerable action and the console command that performs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub command: String,
}

impl Action {
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// Style hint such as `badge-warning`
    pub badge: Option<&'static str>,
}

impl Cell {
    pub fn badge(text: impl Into<String>, class: &'static str) -> Self {
        Self {
            text: text.into(),
            badge: Some(class),
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, badge: None }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub actions: Vec<Action>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            actions: Vec::new(),
        }
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }
}

/// Tabular list; `empty` is shown as a single row when there are no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    pub empty: String,
}

impl Table {
    pub fn new(headers: &[&str], empty: impl Into<String>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            empty: empty.into(),
        }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of column `col` in every row
    pub fn column(&self, col: usize) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(col).map(|c| c.text.as_str()))
            .collect()
    }
}
