//! Error code constants and their message templates
//!
//! Codes are grouped by leading digit: 4xxx for failures inside Glazier
//! itself, 5xxx for network failures. Every code listed in [`ENTRIES`]
//! must be unique.

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Numeric identifier of a fatal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorCode(u32);

impl ErrorCode {
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Subsystem derived from the leading digit
    pub fn subsystem(&self) -> Subsystem {
        let mut leading = self.0;
        while leading >= 10 {
            leading /= 10;
        }

        match leading {
            4 => Subsystem::Internal,
            5 => Subsystem::Network,
            _ => Subsystem::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// Subsystem a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Internal,
    Network,
    Unknown,
}

impl Subsystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subsystem::Internal => "Internal",
            Subsystem::Network => "Network",
            Subsystem::Unknown => "Unknown",
        }
    }
}

/// Registry entry for a single code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: ErrorCode,
    pub category: &'static str,
    pub template: &'static str,
}

impl ErrorMetadata {
    pub const fn new(code: ErrorCode, category: &'static str, template: &'static str) -> Self {
        Self {
            code,
            category,
            template,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// Failures inside Glazier itself
pub mod internal {
    use super::ErrorCode;

    pub const UNCAUGHT: ErrorCode = ErrorCode::new(4000);
    pub const MESSAGE_RESOLUTION_FAILED: ErrorCode = ErrorCode::new(4301);
    pub const LOG_COLLECTION_FAILED: ErrorCode = ErrorCode::new(4302);

    pub(crate) const UNCAUGHT_MESSAGE: &str = "Uncaught exception";
    pub(crate) const MESSAGE_RESOLUTION_FAILED_MESSAGE: &str =
        "Failed to determine error message from code";
    pub(crate) const LOG_COLLECTION_FAILED_MESSAGE: &str = "Failed to collect logs";
}

/// Network failures
pub mod network {
    use super::ErrorCode;

    pub const WEB_SERVER_UNREACHABLE: ErrorCode = ErrorCode::new(5000);
    pub const SERVICE_UNAVAILABLE: ErrorCode = ErrorCode::new(5300);
}

/// Codes the reporter falls back on; the registry refuses to build without them
pub const RESERVED: [ErrorCode; 3] = [
    internal::UNCAUGHT,
    internal::MESSAGE_RESOLUTION_FAILED,
    internal::LOG_COLLECTION_FAILED,
];

// ============================================================================
// MESSAGE TEMPLATES
// ============================================================================

pub static ENTRIES: &[ErrorMetadata] = &[
    // Internal
    ErrorMetadata::new(internal::UNCAUGHT, "Internal", internal::UNCAUGHT_MESSAGE),
    ErrorMetadata::new(
        internal::MESSAGE_RESOLUTION_FAILED,
        "Internal",
        internal::MESSAGE_RESOLUTION_FAILED_MESSAGE,
    ),
    ErrorMetadata::new(
        internal::LOG_COLLECTION_FAILED,
        "Internal",
        internal::LOG_COLLECTION_FAILED_MESSAGE,
    ),
    // Network
    ErrorMetadata::new(
        network::WEB_SERVER_UNREACHABLE,
        "Network",
        "Failed to reach web server",
    ),
    ErrorMetadata::new(network::SERVICE_UNAVAILABLE, "Network", "Service unavailable"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entries_are_unique() {
        let mut seen = HashSet::new();
        for entry in ENTRIES {
            assert!(seen.insert(entry.code), "duplicate code {}", entry.code);
        }
    }

    #[test]
    fn test_reserved_codes_listed() {
        for code in RESERVED {
            assert!(ENTRIES.iter().any(|e| e.code == code), "missing {}", code);
        }
    }

    #[test]
    fn test_subsystem_by_leading_digit() {
        assert_eq!(internal::UNCAUGHT.subsystem(), Subsystem::Internal);
        assert_eq!(network::SERVICE_UNAVAILABLE.subsystem(), Subsystem::Network);
        assert_eq!(ErrorCode::new(42).subsystem(), Subsystem::Internal);
        assert_eq!(ErrorCode::new(7001).subsystem(), Subsystem::Unknown);
        assert_eq!(ErrorCode::new(0).subsystem(), Subsystem::Unknown);
    }

    #[test]
    fn test_category_matches_subsystem() {
        for entry in ENTRIES {
            assert_eq!(entry.category, entry.code.subsystem().as_str());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(network::WEB_SERVER_UNREACHABLE.to_string(), "5000");
    }
}
