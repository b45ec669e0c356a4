//! Restorer registry
//!
//! A restorer owns one logical field (or subtree) of a resource and patches it
//! back from the previous snapshot after a structural conversion has lost it.
//! Registries are ordered and keyed by dotted field path; two keys may never
//! name the same path or a path nested inside another key's path.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::ConversionError;
use crate::hash::content_hash;

/// Restore function: `previous` is the field value from the snapshot, `dst` the
/// value produced by the structural conversion.
pub type RestoreFn<F> = fn(&F, &mut F);

/// Normalisation applied to a copy of the field before it is hashed.
pub type FilterFn<F> = fn(&mut F);

/// One restoration step for objects of type `T`.
pub trait Restorer<T>: Send + Sync {
    /// Hash of the owned field in `obj`, or `None` if this restorer is not
    /// hash-gated.
    fn hash(&self, obj: &T) -> Result<Option<String>, ConversionError>;

    /// Patch `dst` from `previous`.
    ///
    /// `stored_hash` is the hash recorded for this restorer's key when the
    /// snapshot was written. Returns whether anything was restored.
    fn restore(
        &self,
        previous: &T,
        dst: &mut T,
        stored_hash: Option<&str>,
    ) -> Result<bool, ConversionError>;
}

/// Accessor pair for a field (or a tuple of fields) of `T`.
///
/// The getter returns an owned value so a single key can cover several sibling
/// fields at once.
pub struct Field<T, F> {
    get: fn(&T) -> F,
    set: fn(&mut T, F),
}

impl<T, F> Field<T, F> {
    /// Create an accessor from a getter and a setter.
    pub fn new(get: fn(&T) -> F, set: fn(&mut T, F)) -> Self {
        Self { get, set }
    }
}

impl<T, F> Clone for Field<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for Field<T, F> {}

impl<T, F> fmt::Debug for Field<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").finish_non_exhaustive()
    }
}

/// Build a [`Field`] that clones a (possibly nested) field of `$ty` out and
/// assigns it back.
///
/// ```ignore
/// let image = field!(OpenStackMachineSpec, image);
/// let name = field!(OpenStackMachineSpec, identity_ref.name);
/// ```
#[macro_export]
macro_rules! field {
    ($ty:ty, $($path:ident).+) => {
        $crate::Field::new(
            |obj: &$ty| obj.$($path).+.clone(),
            |obj: &mut $ty, value| obj.$($path).+ = value,
        )
    };
}

fn copy_value<F: Clone>(previous: &F, dst: &mut F) {
    dst.clone_from(previous);
}

/// Restores a field only if it is unchanged since the snapshot was written.
///
/// The field in the freshly converted destination is hashed (after the
/// filters have been applied to a copy) and compared with the hash stored
/// alongside the snapshot. A mismatch means the object was edited directly in
/// the destination version and the edit wins.
pub struct HashedFieldRestorer<T, F> {
    field: Field<T, F>,
    restore: RestoreFn<F>,
    filters: Vec<FilterFn<F>>,
}

impl<T, F: Clone> HashedFieldRestorer<T, F> {
    /// Restorer that copies the previous value wholesale.
    pub fn new(field: Field<T, F>) -> Self {
        Self {
            field,
            restore: copy_value::<F>,
            filters: Vec::new(),
        }
    }

    /// Replace the wholesale copy with a custom restore function.
    #[must_use]
    pub fn with_restore(mut self, restore: RestoreFn<F>) -> Self {
        self.restore = restore;
        self
    }

    /// Add a normalisation step applied before hashing.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterFn<F>) -> Self {
        self.filters.push(filter);
        self
    }
}

impl<T, F: Serialize> HashedFieldRestorer<T, F> {
    fn field_hash(&self, obj: &T) -> Result<String, ConversionError> {
        let mut value = (self.field.get)(obj);
        for filter in &self.filters {
            filter(&mut value);
        }
        content_hash(&value)
    }
}

impl<T, F> Restorer<T> for HashedFieldRestorer<T, F>
where
    F: Clone + Serialize,
{
    fn hash(&self, obj: &T) -> Result<Option<String>, ConversionError> {
        self.field_hash(obj).map(Some)
    }

    fn restore(
        &self,
        previous: &T,
        dst: &mut T,
        stored_hash: Option<&str>,
    ) -> Result<bool, ConversionError> {
        let Some(stored_hash) = stored_hash else {
            return Ok(false);
        };
        if self.field_hash(dst)? != stored_hash {
            return Ok(false);
        }

        let previous_value = (self.field.get)(previous);
        let mut value = (self.field.get)(dst);
        (self.restore)(&previous_value, &mut value);
        (self.field.set)(dst, value);
        Ok(true)
    }
}

impl<T, F> fmt::Debug for HashedFieldRestorer<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedFieldRestorer")
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}

/// Restores a field every time a snapshot is available.
///
/// For fields with no equivalent in the other version: nothing can have edited
/// them there, so there is nothing to protect.
pub struct UnconditionalFieldRestorer<T, F> {
    field: Field<T, F>,
    restore: RestoreFn<F>,
}

impl<T, F: Clone> UnconditionalFieldRestorer<T, F> {
    /// Restorer that copies the previous value wholesale.
    pub fn new(field: Field<T, F>) -> Self {
        Self {
            field,
            restore: copy_value::<F>,
        }
    }

    /// Replace the wholesale copy with a custom restore function.
    #[must_use]
    pub fn with_restore(mut self, restore: RestoreFn<F>) -> Self {
        self.restore = restore;
        self
    }
}

impl<T, F> Restorer<T> for UnconditionalFieldRestorer<T, F> {
    fn hash(&self, _obj: &T) -> Result<Option<String>, ConversionError> {
        Ok(None)
    }

    fn restore(
        &self,
        previous: &T,
        dst: &mut T,
        _stored_hash: Option<&str>,
    ) -> Result<bool, ConversionError> {
        let previous_value = (self.field.get)(previous);
        let mut value = (self.field.get)(dst);
        (self.restore)(&previous_value, &mut value);
        (self.field.set)(dst, value);
        Ok(true)
    }
}

impl<T, F> fmt::Debug for UnconditionalFieldRestorer<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnconditionalFieldRestorer").finish_non_exhaustive()
    }
}

/// A restorer for `T` applied to the `T` embedded in an outer object `O`.
struct Lifted<O, T> {
    inner: Box<dyn Restorer<T>>,
    get: fn(&O) -> &T,
    get_mut: fn(&mut O) -> &mut T,
}

impl<O, T> Restorer<O> for Lifted<O, T> {
    fn hash(&self, obj: &O) -> Result<Option<String>, ConversionError> {
        self.inner.hash((self.get)(obj))
    }

    fn restore(
        &self,
        previous: &O,
        dst: &mut O,
        stored_hash: Option<&str>,
    ) -> Result<bool, ConversionError> {
        self.inner
            .restore((self.get)(previous), (self.get_mut)(dst), stored_hash)
    }
}

fn keys_overlap(a: &str, b: &str) -> bool {
    a == b
        || a.strip_prefix(b).is_some_and(|rest| rest.starts_with('.'))
        || b.strip_prefix(a).is_some_and(|rest| rest.starts_with('.'))
}

/// Ordered registry of restorers for objects of type `T`.
pub struct RestorerFor<T> {
    entries: Vec<(String, Box<dyn Restorer<T>>)>,
}

impl<T: 'static> RestorerFor<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register `restorer` under `key`.
    ///
    /// Fails if `key` equals an existing key or either key is a dotted-path
    /// prefix of the other.
    pub fn register<R>(
        &mut self,
        key: impl Into<String>,
        restorer: R,
    ) -> Result<(), ConversionError>
    where
        R: Restorer<T> + 'static,
    {
        self.insert(key.into(), Box::new(restorer))
    }

    fn insert(
        &mut self,
        key: String,
        restorer: Box<dyn Restorer<T>>,
    ) -> Result<(), ConversionError> {
        let existing = self
            .entries
            .iter()
            .find(|(existing, _)| keys_overlap(existing, &key));
        if let Some((existing, _)) = existing {
            return Err(ConversionError::OverlappingRestorer {
                key,
                existing: existing.clone(),
            });
        }
        self.entries.push((key, restorer));
        Ok(())
    }

    /// Append every entry of `other`, keeping its order.
    pub fn extend(&mut self, other: RestorerFor<T>) -> Result<(), ConversionError> {
        for (key, restorer) in other.entries {
            self.insert(key, restorer)?;
        }
        Ok(())
    }

    /// Re-target this registry onto an outer object.
    ///
    /// Every key is prefixed with `prefix` and every restorer operates on the
    /// `T` reached through `get` / `get_mut`.
    pub fn lift<O: 'static>(
        self,
        prefix: &str,
        get: fn(&O) -> &T,
        get_mut: fn(&mut O) -> &mut T,
    ) -> RestorerFor<O> {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, inner)| {
                let lifted: Box<dyn Restorer<O>> = Box::new(Lifted { inner, get, get_mut });
                (format!("{prefix}.{key}"), lifted)
            })
            .collect();
        RestorerFor { entries }
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of registered restorers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hashes of every hash-gated field of `obj`, keyed by restorer key.
    pub fn hashes(&self, obj: &T) -> Result<BTreeMap<String, String>, ConversionError> {
        let mut hashes = BTreeMap::new();
        for (key, restorer) in &self.entries {
            if let Some(hash) = restorer.hash(obj)? {
                hashes.insert(key.clone(), hash);
            }
        }
        Ok(hashes)
    }

    /// Run every restorer in registration order.
    ///
    /// Returns the keys that were actually restored.
    pub fn restore_all(
        &self,
        previous: &T,
        dst: &mut T,
        hashes: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, ConversionError> {
        let mut restored = Vec::new();
        for (key, restorer) in &self.entries {
            if restorer.restore(previous, dst, hashes.get(key).map(String::as_str))? {
                restored.push(key.clone());
            } else {
                trace!(key = %key, "field changed since last conversion, keeping converted value");
            }
        }
        Ok(restored)
    }
}

impl<T: 'static> Default for RestorerFor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RestorerFor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, _)| key))
            .finish()
    }
}

#[cfg(test)]
#[path = "restorer_test.rs"]
mod tests;
