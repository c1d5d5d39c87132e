//! Terminal error reporting for Glazier
//!
//! Converts an error code into a user-facing message, collects diagnostic
//! logs, logs the message at critical severity and exits with status 1.

// Internal modules
pub mod buildinfo;
pub mod config;
pub mod fatal;
#[macro_use]
pub mod logging;
pub mod logs;
pub mod registry;

// Re-export key types for library consumers
pub use fatal::{install_panic_hook, FatalError, Reporter, Terminator, EXIT_STATUS};
pub use registry::codes::{self, ErrorCode};
pub use registry::{get_message, ErrorRegistry, ResolveError};

/// Initialize logging and the process-wide reporter from preferences
pub fn init_global_reporting(preferences: &config::ReportingPreferences) -> Result<(), String> {
    logging::init_global_logging(preferences)?;
    fatal::init_reporter(Reporter::from_preferences(preferences))
}
