//! Optional-field codec
//!
//! Legacy versions use a scalar's zero value to mean "unset"; newer versions use
//! `Option<T>`. Going legacy → new collapses zero to `None`, so an explicit
//! `Some(zero)` on the newer side cannot survive a round trip through the legacy
//! form without help from the restore helpers below.

/// Convert a zero-means-unset scalar into an `Option`.
pub fn to_optional<T: Default + PartialEq>(value: T) -> Option<T> {
    if value == T::default() { None } else { Some(value) }
}

/// Convert an `Option` back into a zero-means-unset scalar.
pub fn from_optional<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Copy `previous` into `dst` if `dst` is the zero value.
///
/// Used on the legacy side: a field the newer version left unset comes back as
/// zero, which would otherwise wipe a value known from the previous snapshot.
pub fn restore_if_zero<T: Default + PartialEq + Clone>(previous: &T, dst: &mut T) {
    if *dst == T::default() {
        dst.clone_from(previous);
    }
}

/// Restore an explicit zero value on the optional side.
///
/// `dst` is only touched when it is unset and `previous` held exactly the zero
/// value, which is the one case the legacy form cannot express.
pub fn restore_optional<T: Default + PartialEq + Clone>(previous: &Option<T>, dst: &mut Option<T>) {
    if dst.is_none() && previous.as_ref().is_some_and(|value| *value == T::default()) {
        dst.clone_from(previous);
    }
}

/// [`restore_optional`] for strings.
pub fn restore_string(previous: &Option<String>, dst: &mut Option<String>) {
    restore_optional(previous, dst);
}

/// [`restore_optional`] for booleans.
pub fn restore_bool(previous: &Option<bool>, dst: &mut Option<bool>) {
    restore_optional(previous, dst);
}

/// [`restore_optional`] for integers.
pub fn restore_int(previous: &Option<i32>, dst: &mut Option<i32>) {
    restore_optional(previous, dst);
}

#[cfg(test)]
#[path = "optional_test.rs"]
mod tests;
