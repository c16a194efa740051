//! Validation macros for dataset rows.

/// Returns a row-scoped [`TPulseError::Validation`](crate::TPulseError::Validation)
/// from the enclosing function when `cond` does not hold.
///
/// # Examples
///
/// ```rust
/// use tpulse_common::{ensure_row, Result};
///
/// fn check_likes(likes: i64, row: usize) -> Result<()> {
///     ensure_row!(likes >= 0, "tweet_like_count", row, "negative count {likes}");
///     Ok(())
/// }
///
/// assert!(check_likes(3, 0).is_ok());
/// assert!(check_likes(-1, 4).unwrap_err().to_string().contains("row 4"));
/// ```
#[macro_export]
macro_rules! ensure_row {
    ($cond:expr, $field:expr, $row:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::TPulseError::validation_at(format!($msg), $field, $row));
        }
    };
    ($cond:expr, $field:expr, $row:expr, $fmt:literal, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::TPulseError::validation_at(
                format!($fmt, $($arg)*),
                $field,
                $row,
            ));
        }
    };
}
