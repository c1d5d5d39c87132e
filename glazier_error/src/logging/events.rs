//! Event system for Glazier logging

use crate::registry::ErrorCode;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Critical = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Nearest level of the `log` facade, which has no critical level
    pub fn to_facade_level(self) -> log::Level {
        match self {
            LogLevel::Critical | LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Option<ErrorCode>, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            context: BTreeMap::new(),
        }
    }

    /// Terminal failure; always carries a code
    pub fn critical(code: ErrorCode, message: &str) -> Self {
        Self::new(LogLevel::Critical, Some(code), message)
    }

    pub fn error(code: ErrorCode, message: &str) -> Self {
        Self::new(LogLevel::Error, Some(code), message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, None, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, None, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, None, message)
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_critical(&self) -> bool {
        self.level == LogLevel::Critical
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    /// Category of the event's code, if the code is registered
    pub fn category(&self) -> Option<&'static str> {
        let code = self.code?;
        crate::registry::ErrorRegistry::global()
            .get(code)
            .map(|metadata| metadata.category)
    }

    /// Format for display
    pub fn format(&self) -> String {
        match self.code {
            Some(code) => format!("[{}] {} - {}", self.level.as_str(), code, self.message),
            None => format!("[{}] {}", self.level.as_str(), self.message),
        }
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "level": self.level.as_str(),
            "message": self.message,
        });

        if let Some(code) = self.code {
            json["code"] = serde_json::json!(code.as_u32());
            if let Some(category) = self.category() {
                json["category"] = serde_json::json!(category);
            }
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}
