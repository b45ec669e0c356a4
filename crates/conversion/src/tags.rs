//! Neutron tag codec
//!
//! Legacy API versions store tag filters as a single comma-joined string,
//! newer ones as an ordered list. The legacy form cannot represent a tag that
//! contains a comma (`"foo,bar"` is always two tags), and empty segments are
//! dropped on split, so `"a,,b"` comes back as `"a,b"`. Both cases are rejected
//! by the CRD schema at admission time rather than handled here.

/// Split a comma-joined tag string into tags.
///
/// Returns an empty vector for an empty string. Empty segments produced by
/// leading, trailing or doubled commas are skipped.
pub fn split_tags<T: From<String>>(tags: &str) -> Vec<T> {
    if tags.is_empty() {
        return Vec::new();
    }

    tags.split(',')
        .filter(|tag| !tag.is_empty())
        .map(|tag| T::from(tag.to_string()))
        .collect()
}

/// Join tags into the comma-separated legacy form.
///
/// Returns an empty string when there are no tags.
pub fn join_tags<T: AsRef<str>>(tags: &[T]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "tags_test.rs"]
mod tests;
