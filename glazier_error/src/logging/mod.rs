//! Global logging module for Glazier
//!
//! Provides a process-wide logging service with console, JSON and
//! `log`-facade destinations.

pub mod events;
pub mod macros;
pub mod service;

use crate::config::ReportingPreferences;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, FacadeLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from runtime preferences
pub fn init_global_logging(preferences: &ReportingPreferences) -> Result<(), String> {
    preferences
        .validate()
        .map_err(|e| format!("Configuration validation failed: {}", e))?;

    let service = Arc::new(LoggingService::from_preferences(preferences));
    init_global_logging_with_service(service)
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Shared handle to the global logger, if set
pub fn global_logger_handle() -> Option<Arc<LoggingService>> {
    GLOBAL_LOGGER.get().cloned()
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::info(message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}
