//! Well-known record keys.
//!
//! Keys are restricted to ASCII alphanumerics, `_`, `-` and `.` so that every
//! backend can store them verbatim (the file backend uses them as file names).

/// The single payment-completed record shared by every observer.
pub const PAYMENT_EVENT: &str = "payment_completed";

/// Last successfully loaded product list.
pub const CACHED_PRODUCTS: &str = "cached_products";

/// Last successfully loaded customer list.
pub const CACHED_CUSTOMERS: &str = "cached_customers";

/// Check that `key` is non-empty, not a dot-path, and uses only allowed characters.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}
