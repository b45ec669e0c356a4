//! Annotation-based snapshot store
//!
//! Each conversion that needs to be lossless writes the source object (in its own
//! schema, metadata stripped) into an annotation on the converted object. The next
//! conversion in the opposite direction reads it back and hands it to the
//! restorers of the destination version.
//!
//! The annotation value is raw JSON:
//!
//! ```json
//! {
//!   "object": {"apiVersion": "...", "kind": "...", "spec": {}},
//!   "hashes": {"spec.image": "9f86d0..."}
//! }
//! ```
//!
//! `hashes` holds, for every hash-gated restorer of the snapshot's version, the
//! hash of that field as the reverse structural conversion produces it from the
//! object carrying the annotation. If the object is edited in a way that changes
//! that field, the hashes no longer match and the edit is kept.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Resource;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ConversionError;
use crate::restorer::RestorerFor;

/// Annotation holding the serialized snapshot of the other API version
pub const CONVERSION_DATA_ANNOTATION: &str = "cluster.x-k8s.io/conversion-data";

/// Contents of the conversion-data annotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestoreData<T> {
    /// The object as it was in its own version before the last conversion
    pub object: T,

    /// Field hashes keyed by restorer key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hashes: BTreeMap<String, String>,
}

fn corrupt(source: serde_json::Error) -> ConversionError {
    ConversionError::CorruptAnnotation {
        annotation: CONVERSION_DATA_ANNOTATION,
        source,
    }
}

/// Read a `T`-shaped snapshot from the annotations of `obj`.
///
/// Returns `Ok(None)` if there is no annotation or it was written for a
/// different API version or kind. An annotation that is present but cannot be
/// decoded is an error.
pub fn read_restore_data<T, O>(obj: &O) -> Result<Option<RestoreData<T>>, ConversionError>
where
    T: Resource<DynamicType = ()> + DeserializeOwned,
    O: Resource,
{
    let Some(raw) = obj
        .meta()
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(CONVERSION_DATA_ANNOTATION))
    else {
        return Ok(None);
    };

    let value: Value = serde_json::from_str(raw).map_err(corrupt)?;
    let Some(object) = value.get("object").filter(|object| object.is_object()) else {
        return Err(corrupt(serde_json::Error::custom("missing snapshot object")));
    };

    let api_version = object.get("apiVersion").and_then(Value::as_str);
    let kind = object.get("kind").and_then(Value::as_str);
    let expected_api_version = T::api_version(&());
    let expected_kind = T::kind(&());
    if api_version != Some(expected_api_version.as_ref()) || kind != Some(expected_kind.as_ref()) {
        debug!(
            expected = %expected_api_version,
            found = ?api_version,
            kind = ?kind,
            "Ignoring conversion data written for another version"
        );
        return Ok(None);
    }

    serde_json::from_value(value).map(Some).map_err(corrupt)
}

/// Store `data` in the annotations of `obj`, replacing any previous snapshot.
pub fn write_restore_data<T, O>(obj: &mut O, data: &RestoreData<T>) -> Result<(), ConversionError>
where
    T: Serialize,
    O: Resource,
{
    let raw = serde_json::to_string(data)?;
    obj.meta_mut()
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(CONVERSION_DATA_ANNOTATION.to_string(), raw);
    Ok(())
}

/// Copy of `obj` with empty metadata, as stored in a snapshot.
pub fn snapshot_of<T: Resource + Clone>(obj: &T) -> T {
    let mut snapshot = obj.clone();
    *snapshot.meta_mut() = ObjectMeta::default();
    snapshot
}

/// Convert `src` with `forward`, restore from the stored snapshot and record a
/// new snapshot of `src` on the result.
///
/// `back` must be the purely structural reverse mapping (no restoration); it is
/// used to compute the hashes the next reverse conversion will compare against.
/// Metadata is copied from `src` verbatim. If `forward` fails nothing is
/// written.
pub fn convert_and_restore<S, D, Fwd, Back>(
    src: &S,
    forward: Fwd,
    back: Back,
    src_restorers: &RestorerFor<S>,
    dst_restorers: &RestorerFor<D>,
) -> Result<D, ConversionError>
where
    S: Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + 'static,
    D: Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + 'static,
    Fwd: FnOnce(&S) -> Result<D, ConversionError>,
    Back: FnOnce(&D) -> Result<S, ConversionError>,
{
    let previous = read_restore_data::<D, S>(src)?;

    let mut dst = forward(src)?;
    *dst.meta_mut() = src.meta().clone();

    if let Some(previous) = previous {
        let restored = dst_restorers.restore_all(&previous.object, &mut dst, &previous.hashes)?;
        debug!(
            kind = %D::kind(&()),
            to = %D::api_version(&()),
            name = ?src.meta().name,
            restored = ?restored,
            "Restored fields from conversion data"
        );
    }

    let hashes = src_restorers.hashes(&back(&dst)?)?;
    write_restore_data(
        &mut dst,
        &RestoreData {
            object: snapshot_of(src),
            hashes,
        },
    )?;

    Ok(dst)
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
