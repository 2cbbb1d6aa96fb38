use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::ConsoleValue;

/// Severity of a captured emission; mirrors the four console channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All four channels, in their conventional order.
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Log,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// The wire/display name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved id of the sentinel entry emitted by a bulk clear.
pub const CLEAR_SENTINEL_ID: i64 = -1;

/// One captured diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Whether this is the "history was reset" sentinel rather than a
    /// normal entry.
    pub fn is_clear_sentinel(&self) -> bool {
        self.id == CLEAR_SENTINEL_ID
    }
}

/// Renders a console argument list into a single message string.
///
/// Text arguments pass through verbatim; everything else is pretty-printed
/// JSON with a non-failing fallback. Renderings are joined with a single
/// space, in call order.
pub(crate) fn format_message(args: &[ConsoleValue]) -> String {
    args.iter()
        .map(render_value)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_value(value: &ConsoleValue) -> String {
    match value {
        ConsoleValue::Text(text) => text.clone(),
        ConsoleValue::Error(info) => {
            serde_json::to_string_pretty(info).unwrap_or_else(|_| info.to_string())
        }
        ConsoleValue::Data(data) => pretty_json(data),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Collects the trace text of every exception-like argument, newline
/// joined in call order. `None` when no such argument exists.
pub(crate) fn extract_details(args: &[ConsoleValue]) -> Option<String> {
    let parts: Vec<&str> = args
        .iter()
        .filter_map(|arg| match arg {
            ConsoleValue::Error(info) => Some(info.trace.as_deref().unwrap_or(&info.message)),
            _ => None,
        })
        .collect();

    (!parts.is_empty()).then(|| parts.join("\n"))
}
