//! Registry and message resolution errors

use super::codes::ErrorCode;

/// Template could not be filled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("placeholder {index} has no value ({supplied} supplied)")]
    MissingValue { index: usize, supplied: usize },

    #[error("named placeholder '{name}' cannot be filled positionally")]
    NamedPlaceholder { name: String },

    #[error("format specification in placeholder '{field}' is not supported")]
    UnsupportedSpec { field: String },

    #[error("unbalanced brace at byte {position}")]
    UnbalancedBrace { position: usize },

    #[error("cannot mix automatic and manual placeholder numbering")]
    MixedNumbering,
}

/// Message could not be resolved from a code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown error code {code}")]
    UnknownCode { code: ErrorCode },

    #[error("malformed message for error code {code}: {source}")]
    TemplateMismatch {
        code: ErrorCode,
        #[source]
        source: TemplateError,
    },
}

/// Registry table is unusable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("error code {code} is registered more than once")]
    DuplicateCode { code: ErrorCode },

    #[error("reserved error code {code} is missing from the registry")]
    MissingReservedCode { code: ErrorCode },

    #[error("reserved error code {code} does not resolve: {source}")]
    ReservedCodeUnresolvable {
        code: ErrorCode,
        #[source]
        source: TemplateError,
    },
}
