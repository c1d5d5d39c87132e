//! Fatal error reporting
//!
//! A [`FatalError`] describes an unrecoverable condition. Raising it
//! resolves the message, collects diagnostic logs, logs the message at
//! critical severity and terminates the process with [`EXIT_STATUS`].
//! Raising never returns to the caller.
//!
//! Failures inside the reporting path are reported again with a more
//! specific code: an unresolvable message becomes
//! [`internal::MESSAGE_RESOLUTION_FAILED`], a failed collection becomes
//! [`internal::LOG_COLLECTION_FAILED`] with collection disabled.

use crate::buildinfo::{BuildInfo, ConfiguredBuildInfo};
use crate::config::{self, ReportingPreferences};
use crate::logging::{self, LoggingService};
use crate::logs::{self, LogCollector, ZipLogCollector};
use crate::registry::codes::internal;
use crate::registry::{ErrorCode, ErrorRegistry, ResolveError};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Exit status of every fatal path
pub const EXIT_STATUS: i32 = 1;

static GLOBAL_REPORTER: OnceLock<Reporter> = OnceLock::new();

// ============================================================================
// TERMINATION
// ============================================================================

/// Ends the process once the fatal message has been logged
pub trait Terminator: Send + Sync {
    fn terminate(&self, status: i32) -> !;
}

/// Exits the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTerminator;

impl Terminator for ProcessTerminator {
    fn terminate(&self, status: i32) -> ! {
        std::process::exit(status)
    }
}

// ============================================================================
// FATAL ERROR
// ============================================================================

/// An unrecoverable condition, reported with [`FatalError::raise`]
///
/// Building a `FatalError` has no side effects; raising it ends the process.
///
/// When the message cannot be resolved the process is reported as
/// [`internal::MESSAGE_RESOLUTION_FAILED`] with the resolution error as its
/// exception detail, so the report names the code that failed. Glazier's
/// earlier reporter raised this code without any detail.
#[derive(Debug, Clone)]
#[must_use = "a FatalError does nothing until it is raised"]
pub struct FatalError {
    code: ErrorCode,
    message: Option<String>,
    exception: Option<String>,
    collect_logs: bool,
    args: Vec<(String, String)>,
}

impl Default for FatalError {
    fn default() -> Self {
        Self::new(internal::UNCAUGHT)
    }
}

impl FatalError {
    pub fn new(code: impl Into<ErrorCode>) -> Self {
        Self {
            code: code.into(),
            message: None,
            exception: None,
            collect_logs: true,
            args: Vec::new(),
        }
    }

    /// Use `message` verbatim instead of the registry template
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying failure
    pub fn exception(mut self, exception: impl fmt::Display) -> Self {
        self.exception = Some(exception.to_string());
        self
    }

    pub fn collect_logs(mut self, collect_logs: bool) -> Self {
        self.collect_logs = collect_logs;
        self
    }

    /// Add a template argument. Only the value is used; arguments fill
    /// placeholders in the order they are added.
    pub fn arg(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.args.push((name.into(), value.to_string()));
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn collects_logs(&self) -> bool {
        self.collect_logs
    }

    /// Template values in insertion order
    pub fn substitutions(&self) -> Vec<&str> {
        self.args.iter().map(|(_, value)| value.as_str()).collect()
    }

    /// Report through the process-wide reporter and terminate
    pub fn raise(self) -> ! {
        reporter().report(self)
    }

    /// Report through `reporter` and terminate
    pub fn raise_with(self, reporter: &Reporter) -> ! {
        reporter.report(self)
    }
}

// ============================================================================
// REPORTER
// ============================================================================

/// Runs the fatal reporting protocol against its collaborators
pub struct Reporter {
    registry: &'static ErrorRegistry,
    logger: Arc<LoggingService>,
    collector: Arc<dyn LogCollector>,
    build_info: Arc<dyn BuildInfo>,
    terminator: Arc<dyn Terminator>,
    help_uri: String,
}

impl Reporter {
    pub fn new(
        logger: Arc<LoggingService>,
        collector: Arc<dyn LogCollector>,
        build_info: Arc<dyn BuildInfo>,
        terminator: Arc<dyn Terminator>,
    ) -> Self {
        Self {
            registry: ErrorRegistry::global(),
            logger,
            collector,
            build_info,
            terminator,
            help_uri: config::help_uri().to_string(),
        }
    }

    /// Reporter wired to the real filesystem and process
    ///
    /// Uses the global logging service when one is initialized.
    pub fn from_preferences(preferences: &ReportingPreferences) -> Self {
        let logger = logging::global_logger_handle()
            .unwrap_or_else(|| Arc::new(LoggingService::from_preferences(preferences)));

        Self::new(
            logger,
            Arc::new(ZipLogCollector::new(preferences.logs_dir.clone())),
            Arc::new(ConfiguredBuildInfo::from_preferences(preferences)),
            Arc::new(ProcessTerminator),
        )
    }

    pub fn with_registry(mut self, registry: &'static ErrorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_help_uri(mut self, help_uri: impl Into<String>) -> Self {
        self.help_uri = help_uri.into();
        self
    }

    pub fn help_uri(&self) -> &str {
        &self.help_uri
    }

    /// Compose the full message for `error` without side effects
    pub fn compose(&self, error: &FatalError) -> Result<String, ResolveError> {
        let message = match error.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => self.registry.resolve(error.code, &error.substitutions())?,
        };

        Ok(self.decorate(message, error.code, error.exception.as_deref()))
    }

    /// Report `error` and terminate the process
    pub fn report(&self, error: FatalError) -> ! {
        let message = match self.compose(&error) {
            Ok(message) => message,
            Err(e) => self.fail_internal(
                internal::MESSAGE_RESOLUTION_FAILED,
                e.to_string(),
                error.collect_logs,
            ),
        };

        self.finish(error.code, &message, error.collect_logs)
    }

    /// Re-enter the protocol for a failure of the reporting path itself
    fn fail_internal(&self, code: ErrorCode, exception: String, collect_logs: bool) -> ! {
        let empty: [&str; 0] = [];
        let message = self
            .registry
            .resolve(code, &empty)
            .unwrap_or_else(|_| builtin_message(code).to_string());

        let message = self.decorate(message, code, Some(&exception));
        self.finish(code, &message, collect_logs)
    }

    fn finish(&self, code: ErrorCode, message: &str, collect_logs: bool) -> ! {
        if collect_logs {
            let destination = logs::archive_path(&self.build_info.cache_path());
            if let Err(e) = self.collector.collect(&destination) {
                self.fail_internal(internal::LOG_COLLECTION_FAILED, e.to_string(), false);
            }
        }

        self.logger.log_critical(code, message);
        self.terminator.terminate(EXIT_STATUS)
    }

    fn decorate(&self, mut message: String, code: ErrorCode, exception: Option<&str>) -> String {
        message.push_str("\n\n");

        if let Some(exception) = exception.filter(|e| !e.is_empty()) {
            message.push_str(&format!("Exception: {}\n\n", exception));
        }

        message.push_str(&format!("Need help? Visit {}#{}", self.help_uri, code));
        message
    }
}

fn builtin_message(code: ErrorCode) -> &'static str {
    match code {
        internal::MESSAGE_RESOLUTION_FAILED => internal::MESSAGE_RESOLUTION_FAILED_MESSAGE,
        internal::LOG_COLLECTION_FAILED => internal::LOG_COLLECTION_FAILED_MESSAGE,
        _ => internal::UNCAUGHT_MESSAGE,
    }
}

// ============================================================================
// GLOBAL REPORTER
// ============================================================================

/// Install the process-wide reporter
pub fn init_reporter(reporter: Reporter) -> Result<(), String> {
    reporter
        .registry
        .validate()
        .map_err(|e| format!("Error registry validation failed: {}", e))?;

    GLOBAL_REPORTER
        .set(reporter)
        .map_err(|_| "Global reporter already initialized".to_string())
}

/// Process-wide reporter, built from default preferences on first use
pub fn reporter() -> &'static Reporter {
    GLOBAL_REPORTER.get_or_init(|| Reporter::from_preferences(&ReportingPreferences::default()))
}

/// Report every panic as an uncaught failure
///
/// The process-wide reporter is initialized here, so the hook only reads it.
pub fn install_panic_hook() {
    let reporter = reporter();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic with non-string payload".to_string());

        let detail = match info.location() {
            Some(location) => format!("{} at {}:{}", detail, location.file(), location.line()),
            None => detail,
        };

        FatalError::new(internal::UNCAUGHT)
            .exception(detail)
            .raise_with(reporter)
    }));
}
