//! Core module: configuration and the application controller
//!
//! - [`Config`] - runtime configuration
//! - [`App`] - state owner and handler entry points
//! - [`Prompter`] - confirmation / text input used by handlers

pub mod app;
pub mod config;

pub use app::{App, Prompter};
pub use config::Config;
