//! Installing the panic hook settles the process-wide reporter

use glazier_error::config::ReportingPreferences;
use glazier_error::fatal::{self, Reporter};
use std::panic;

#[test]
fn test_panic_hook_initializes_reporter_up_front() {
    glazier_error::install_panic_hook();
    // Restore the default hook so a failing assertion reports normally
    let _ = panic::take_hook();

    let result = fatal::init_reporter(Reporter::from_preferences(&ReportingPreferences::default()));
    assert_eq!(result, Err("Global reporter already initialized".to_string()));
}
