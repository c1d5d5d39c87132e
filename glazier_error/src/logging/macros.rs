//! Logging and fatal-reporting macros

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

/// Report a fatal error and terminate the process
///
/// `fatal!(code)` or `fatal!(code, "name" => value, ...)` raises through the
/// process-wide reporter; `fatal!(in reporter; code, ...)` raises through
/// the given one. Argument values fill the code's template placeholders in
/// the order given.
#[macro_export]
macro_rules! fatal {
    (in $reporter:expr; $code:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::fatal::FatalError::new($code)
            $(.arg($key, $value))*
            .raise_with(&$reporter)
    };

    ($code:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::fatal::FatalError::new($code)
            $(.arg($key, $value))*
            .raise()
    };
}
