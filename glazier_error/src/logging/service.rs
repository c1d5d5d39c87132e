//! Logging service implementation

use super::events::{LogEvent, LogLevel};
use crate::config::ReportingPreferences;
use crate::registry::ErrorCode;
use std::sync::{Arc, Mutex};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service; fans each event out to its loggers
///
/// A service with no loggers still emits critical events through its last
/// resort logger (stderr unless replaced), so a fatal message is never lost.
pub struct LoggingService {
    loggers: Vec<Arc<dyn Logger>>,
    last_resort: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self {
            loggers: vec![logger],
            last_resort: Arc::new(ConsoleLogger),
            min_level,
        }
    }

    /// Create service from runtime preferences
    pub fn from_preferences(preferences: &ReportingPreferences) -> Self {
        let min_level = preferences.min_log_level.to_events_log_level();
        let mut loggers: Vec<Arc<dyn Logger>> = Vec::new();

        if preferences.enable_console_logging {
            if preferences.use_structured_logging {
                loggers.push(Arc::new(StructuredLogger));
            } else {
                loggers.push(Arc::new(ConsoleLogger));
            }
        }

        if preferences.forward_to_log_facade {
            loggers.push(Arc::new(FacadeLogger::default()));
        }

        Self {
            loggers,
            last_resort: Arc::new(ConsoleLogger),
            min_level,
        }
    }

    /// Add another destination
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }

    /// Replace the destination used for critical events when no logger is configured
    pub fn with_last_resort(mut self, logger: Arc<dyn Logger>) -> Self {
        self.last_resort = logger;
        self
    }

    /// Check if level should be logged; critical events are never filtered
    pub fn should_log(&self, level: LogLevel) -> bool {
        level == LogLevel::Critical || level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if !self.should_log(event.level) {
            return;
        }

        if self.loggers.is_empty() {
            if event.is_critical() {
                self.last_resort.log(&event);
            }
            return;
        }

        for logger in &self.loggers {
            logger.log(&event);
        }
    }

    /// Emit a terminal failure message
    pub fn log_critical(&self, code: ErrorCode, message: &str) {
        self.log_event(LogEvent::critical(code, message));
    }

    pub fn log_error(&self, code: ErrorCode, message: &str) {
        self.log_event(LogEvent::error(code, message));
    }

    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Simple console logger
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        match event.level {
            LogLevel::Critical | LogLevel::Error | LogLevel::Warning => {
                eprintln!("{}", event.format())
            }
            _ => println!("{}", event.format()),
        }
    }
}

/// Structured logger for JSON output and better tooling integration
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.format_json().unwrap_or_else(|_| event.format());
        match event.level {
            LogLevel::Critical | LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// Forwards events to whatever `log` implementation the host installed
pub struct FacadeLogger {
    target: &'static str,
}

impl FacadeLogger {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for FacadeLogger {
    fn default() -> Self {
        Self::new("glazier")
    }
}

impl Logger for FacadeLogger {
    fn log(&self, event: &LogEvent) {
        log::log!(target: self.target, event.level.to_facade_level(), "{}", event.format());
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn get_critical(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_critical())
            .cloned()
            .collect()
    }

    pub fn has_critical_with_code(&self, code: ErrorCode) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.is_critical() && e.code == Some(code))
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
