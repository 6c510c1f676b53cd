//! Convenience macros for structured logging

/// Log an error and return it
///
/// ```rust
/// let err = poolkit_log::log_error!(std::fmt::Error);
/// # let _ = err;
/// ```
#[macro_export]
macro_rules! log_error {
    ($err:expr) => {{
        let e = $err;
        $crate::error!(error = ?e);
        e
    }};
    ($err:expr, $($arg:tt)*) => {{
        let e = $err;
        $crate::error!(error = ?e, $($arg)*);
        e
    }};
}
