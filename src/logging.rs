//! Logging
//!
//! Every non-fatal condition in the tree is reported through a [`Logger`].
//! Notices never interrupt the caller; they exist so authoring tools can
//! show what was ignored and why.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

// =============================================================================
// Codes
// =============================================================================

/// Code identifying the condition being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeCode {
    /// Write to a property the schema does not declare
    UndeclaredProperty,
    /// Write to a readonly property
    ReadonlyProperty,
    /// Render requested without a resolvable template
    MissingTemplate,
    /// A validation error record
    SchemaValidation,
    /// A `$ref` could not be expanded
    ResolveFailed,
    /// The template engine failed
    RenderFailed,
    /// A schema name is not registered
    UnknownSchema,
    /// Schema text could not be decoded
    DecodeFailed,
}

impl NoticeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UndeclaredProperty => "N001",
            Self::ReadonlyProperty => "N002",
            Self::MissingTemplate => "N003",
            Self::SchemaValidation => "N004",
            Self::ResolveFailed => "E001",
            Self::RenderFailed => "E002",
            Self::UnknownSchema => "E003",
            Self::DecodeFailed => "E004",
        }
    }
}

impl fmt::Display for NoticeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Level
// =============================================================================

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Notice,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notice => write!(f, "notice"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Logger
// =============================================================================

/// Sink for non-fatal conditions. Implementations must not panic.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, code: NoticeCode, message: &str);

    fn notice(&self, code: NoticeCode, message: &str) {
        self.log(Level::Notice, code, message);
    }

    fn error(&self, code: NoticeCode, message: &str) {
        self.log(Level::Error, code, message);
    }
}

/// Forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, code: NoticeCode, message: &str) {
        match level {
            Level::Notice => tracing::info!(code = %code, "{}", message),
            Level::Error => tracing::error!(code = %code, "{}", message),
        }
    }
}

/// A single recorded log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: Level,
    pub code: NoticeCode,
    pub message: String,
}

/// Keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Entries carrying the given code
    pub fn with_code(&self, code: NoticeCode) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.code == code)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, code: NoticeCode, message: &str) {
        tracing::debug!(%level, code = %code, "{}", message);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                code,
                message: message.to_string(),
            });
        }
    }
}
