//! Error registry: code to message template lookup
//!
//! The registry is built once from [`codes::ENTRIES`] and never mutated.
//! Lookup is safe from any thread.

pub mod codes;
pub mod error;
pub mod template;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use codes::{ErrorCode, ErrorMetadata, Subsystem};
pub use error::{RegistryError, ResolveError, TemplateError};

static GLOBAL_REGISTRY: OnceLock<ErrorRegistry> = OnceLock::new();

/// Immutable mapping from error code to message template
#[derive(Debug)]
pub struct ErrorRegistry {
    entries: HashMap<ErrorCode, &'static ErrorMetadata>,
}

impl ErrorRegistry {
    /// Process-wide registry built from the built-in table
    pub fn global() -> &'static ErrorRegistry {
        GLOBAL_REGISTRY.get_or_init(|| Self {
            // Uniqueness of the built-in table is covered by its tests.
            entries: codes::ENTRIES.iter().map(|e| (e.code, e)).collect(),
        })
    }

    /// Build a registry from a table, rejecting duplicate or missing reserved codes
    pub fn from_entries(table: &'static [ErrorMetadata]) -> Result<Self, RegistryError> {
        let mut entries = HashMap::with_capacity(table.len());
        for entry in table {
            if entries.insert(entry.code, entry).is_some() {
                return Err(RegistryError::DuplicateCode { code: entry.code });
            }
        }

        let registry = Self { entries };
        registry.validate()?;
        Ok(registry)
    }

    /// Check that every reserved code is present and needs no substitutions
    pub fn validate(&self) -> Result<(), RegistryError> {
        for code in codes::RESERVED {
            let metadata = self
                .get(code)
                .ok_or(RegistryError::MissingReservedCode { code })?;

            let empty: [&str; 0] = [];
            template::format_positional(metadata.template, &empty)
                .map_err(|source| RegistryError::ReservedCodeUnresolvable { code, source })?;
        }
        Ok(())
    }

    pub fn get(&self, code: ErrorCode) -> Option<&'static ErrorMetadata> {
        self.entries.get(&code).copied()
    }

    pub fn template(&self, code: ErrorCode) -> Option<&'static str> {
        self.get(code).map(|metadata| metadata.template)
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// All registered codes in ascending order
    pub fn codes(&self) -> Vec<ErrorCode> {
        let mut codes: Vec<ErrorCode> = self.entries.keys().copied().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the message for `code`, filling placeholders by position
    pub fn resolve<S: AsRef<str>>(
        &self,
        code: ErrorCode,
        substitutions: &[S],
    ) -> Result<String, ResolveError> {
        let template = self
            .template(code)
            .ok_or(ResolveError::UnknownCode { code })?;

        template::format_positional(template, substitutions)
            .map_err(|source| ResolveError::TemplateMismatch { code, source })
    }
}

/// Resolve a message from named arguments
///
/// Argument names are not matched against placeholders; only the values
/// are used, in the order they are given.
pub fn get_message(code: ErrorCode, args: &[(&str, &str)]) -> Result<String, ResolveError> {
    let values: Vec<&str> = args.iter().map(|(_, value)| *value).collect();
    ErrorRegistry::global().resolve(code, &values)
}

#[cfg(test)]
mod tests {
    use super::codes::{internal, network};
    use super::*;
    use assert_matches::assert_matches;

    static DUPLICATED: &[ErrorMetadata] = &[
        ErrorMetadata::new(internal::UNCAUGHT, "Internal", "Uncaught exception"),
        ErrorMetadata::new(internal::UNCAUGHT, "Internal", "Uncaught again"),
    ];

    static WITHOUT_RESERVED: &[ErrorMetadata] = &[ErrorMetadata::new(
        network::WEB_SERVER_UNREACHABLE,
        "Network",
        "Failed to reach web server",
    )];

    static TEMPLATED: &[ErrorMetadata] = &[
        ErrorMetadata::new(internal::UNCAUGHT, "Internal", "Uncaught exception"),
        ErrorMetadata::new(
            internal::MESSAGE_RESOLUTION_FAILED,
            "Internal",
            "Failed to determine error message from code",
        ),
        ErrorMetadata::new(
            internal::LOG_COLLECTION_FAILED,
            "Internal",
            "Failed to collect logs",
        ),
        ErrorMetadata::new(
            ErrorCode::new(5100),
            "Network",
            "Failed to download {} to {}",
        ),
    ];

    static RESERVED_WITH_PLACEHOLDER: &[ErrorMetadata] = &[
        ErrorMetadata::new(internal::UNCAUGHT, "Internal", "Uncaught exception in {}"),
        ErrorMetadata::new(
            internal::MESSAGE_RESOLUTION_FAILED,
            "Internal",
            "Failed to determine error message from code",
        ),
        ErrorMetadata::new(
            internal::LOG_COLLECTION_FAILED,
            "Internal",
            "Failed to collect logs",
        ),
    ];

    #[test]
    fn test_global_registry_is_valid() {
        let registry = ErrorRegistry::global();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.len(), codes::ENTRIES.len());
    }

    #[test]
    fn test_every_registered_code_resolves_verbatim() {
        let registry = ErrorRegistry::global();
        let empty: [&str; 0] = [];
        for code in registry.codes() {
            let message = registry.resolve(code, &empty).unwrap();
            assert_eq!(message, registry.template(code).unwrap());
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn test_resolve_5000() {
        let message = get_message(network::WEB_SERVER_UNREACHABLE, &[]).unwrap();
        assert_eq!(message, "Failed to reach web server");
    }

    #[test]
    fn test_unknown_code() {
        let result = get_message(ErrorCode::new(9999), &[]);
        assert_matches!(result, Err(ResolveError::UnknownCode { code }) if code.as_u32() == 9999);
    }

    #[test]
    fn test_codes_sorted() {
        let codes = ErrorRegistry::global().codes();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
        assert_eq!(codes.first(), Some(&internal::UNCAUGHT));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = ErrorRegistry::from_entries(DUPLICATED);
        assert_matches!(result, Err(RegistryError::DuplicateCode { code }) if code == internal::UNCAUGHT);
    }

    #[test]
    fn test_missing_reserved_rejected() {
        let result = ErrorRegistry::from_entries(WITHOUT_RESERVED);
        assert_matches!(result, Err(RegistryError::MissingReservedCode { .. }));
    }

    #[test]
    fn test_reserved_with_placeholder_rejected() {
        let result = ErrorRegistry::from_entries(RESERVED_WITH_PLACEHOLDER);
        assert_matches!(
            result,
            Err(RegistryError::ReservedCodeUnresolvable { code, .. }) if code == internal::UNCAUGHT
        );
    }

    #[test]
    fn test_named_arguments_used_by_position() {
        let registry = ErrorRegistry::from_entries(TEMPLATED).unwrap();
        // Names are ignored; insertion order decides placement.
        let args = [("destination", "C:\\image.wim"), ("url", "https://example.com")];
        let values: Vec<&str> = args.iter().map(|(_, v)| *v).collect();

        let message = registry.resolve(ErrorCode::new(5100), &values).unwrap();
        assert_eq!(
            message,
            "Failed to download C:\\image.wim to https://example.com"
        );
    }

    #[test]
    fn test_insufficient_substitutions() {
        let registry = ErrorRegistry::from_entries(TEMPLATED).unwrap();
        let result = registry.resolve(ErrorCode::new(5100), &["only-one"]);
        assert_matches!(
            result,
            Err(ResolveError::TemplateMismatch {
                source: TemplateError::MissingValue { index: 1, supplied: 1 },
                ..
            })
        );
    }
}
