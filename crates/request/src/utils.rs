//! Utility macros used internally by the request crate.

/// Returns early with `Err($error)` when `$predicate` does not hold.
///
/// Works like `assert!`, but for recoverable misuse that the caller should see as an error.
///
/// # Example
///
/// ```ignore
/// ensure!(cursor.generation() == generation, CursorError::invalidated(cursor.generation(), generation));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
