//! Transient notifications
//!
//! A toast is visible until its lifetime runs out. Expiry is checked when
//! the queue is read; nothing runs in the background.

use shared::error::{AppError, ErrorCode};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Kind used when reporting a failed operation
    pub fn for_error(err: &AppError) -> Self {
        match err.code {
            ErrorCode::CannotResetOwnPassword | ErrorCode::Cancelled => Self::Warning,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct Toasts {
    ttl: Duration,
    queue: Vec<Toast>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(kind = %kind, message = %message, "Toast");
        self.queue.push(Toast {
            kind,
            message,
            expires_at: now + self.ttl,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Toasts still visible at `now`; expired ones are dropped
    pub fn visible_at(&mut self, now: Instant) -> &[Toast] {
        self.queue.retain(|t| t.expires_at > now);
        &self.queue
    }

    /// Hand every visible toast to the caller and empty the queue
    pub fn drain(&mut self) -> Vec<Toast> {
        let now = Instant::now();
        self.queue.retain(|t| t.expires_at > now);
        std::mem::take(&mut self.queue)
    }
}
