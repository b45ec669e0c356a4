//! Untyped conversion between served versions
//!
//! Objects arrive as JSON from the API server. The source version is read from
//! `apiVersion`, the object is decoded into its typed form, converted to the
//! hub and from there to the desired version.

use std::fmt;
use std::str::FromStr;

use conversion::{ConversionError, Convertible, Hub};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{v1alpha5, v1alpha6, v1beta1, v1beta2};

/// API group of every kind in this crate
pub const GROUP: &str = "infrastructure.cluster.x-k8s.io";

/// Served API versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Deprecated legacy version
    V1alpha5,
    V1alpha6,
    /// The hub
    V1beta1,
    V1beta2,
}

impl Version {
    /// The storage version
    pub const HUB: Version = Version::V1beta1;

    /// Version name without the group, e.g. `v1beta1`
    pub fn as_str(self) -> &'static str {
        match self {
            Version::V1alpha5 => "v1alpha5",
            Version::V1alpha6 => "v1alpha6",
            Version::V1beta1 => "v1beta1",
            Version::V1beta2 => "v1beta2",
        }
    }

    /// Full `group/version` string
    pub fn api_version(self) -> String {
        format!("{GROUP}/{}", self.as_str())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = ConversionError;

    /// Parses a full `apiVersion`; other groups are rejected
    fn from_str(api_version: &str) -> Result<Self, Self::Err> {
        let version = match api_version.split_once('/') {
            Some((group, version)) if group == GROUP => version,
            _ => return Err(ConversionError::UnsupportedVersion(api_version.to_string())),
        };
        match version {
            "v1alpha5" => Ok(Version::V1alpha5),
            "v1alpha6" => Ok(Version::V1alpha6),
            "v1beta1" => Ok(Version::V1beta1),
            "v1beta2" => Ok(Version::V1beta2),
            _ => Err(ConversionError::UnsupportedVersion(api_version.to_string())),
        }
    }
}

fn string_field<'a>(object: &'a Value, field: &str) -> Result<&'a str, ConversionError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ConversionError::InvalidObject(format!("missing or non-string {field}")))
}

/// Convert `object` to `desired_api_version`.
///
/// Objects already at the desired version are returned unchanged. `*List`
/// kinds convert every item in order.
pub fn convert(object: Value, desired_api_version: &str) -> Result<Value, ConversionError> {
    let desired: Version = desired_api_version.parse()?;
    let from: Version = string_field(&object, "apiVersion")?.parse()?;
    let kind = string_field(&object, "kind")?.to_string();

    if from == desired {
        return Ok(object);
    }
    debug!(kind = %kind, from = %from, to = %desired, "converting object");

    if let Some(item_kind) = kind.strip_suffix("List") {
        return convert_list(object, item_kind, from, desired);
    }

    match kind.as_str() {
        "OpenStackCluster" => convert_typed::<
            v1alpha5::OpenStackCluster,
            v1alpha6::OpenStackCluster,
            v1beta2::OpenStackCluster,
            v1beta1::OpenStackCluster,
        >(object, from, desired),
        "OpenStackClusterTemplate" => convert_typed::<
            v1alpha5::OpenStackClusterTemplate,
            v1alpha6::OpenStackClusterTemplate,
            v1beta2::OpenStackClusterTemplate,
            v1beta1::OpenStackClusterTemplate,
        >(object, from, desired),
        "OpenStackMachine" => convert_typed::<
            v1alpha5::OpenStackMachine,
            v1alpha6::OpenStackMachine,
            v1beta2::OpenStackMachine,
            v1beta1::OpenStackMachine,
        >(object, from, desired),
        "OpenStackMachineTemplate" => convert_typed::<
            v1alpha5::OpenStackMachineTemplate,
            v1alpha6::OpenStackMachineTemplate,
            v1beta2::OpenStackMachineTemplate,
            v1beta1::OpenStackMachineTemplate,
        >(object, from, desired),
        other => Err(ConversionError::UnsupportedKind(other.to_string())),
    }
}

fn convert_list(
    mut list: Value,
    item_kind: &str,
    from: Version,
    desired: Version,
) -> Result<Value, ConversionError> {
    let items = match list.get_mut("items") {
        Some(Value::Array(items)) => std::mem::take(items),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(ConversionError::InvalidObject("items is not an array".to_string())),
    };

    let converted = items
        .into_iter()
        .map(|mut item| {
            // List items may omit their type information
            if let Some(fields) = item.as_object_mut() {
                fields
                    .entry("apiVersion")
                    .or_insert_with(|| Value::String(from.api_version()));
                fields
                    .entry("kind")
                    .or_insert_with(|| Value::String(item_kind.to_string()));
            }
            convert(item, &desired.api_version())
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(fields) = list.as_object_mut() {
        fields.insert("apiVersion".to_string(), Value::String(desired.api_version()));
        fields.insert("items".to_string(), Value::Array(converted));
    }
    Ok(list)
}

/// Decode as the `from` version, convert through the hub `H` and encode as
/// the `to` version
fn convert_typed<A5, A6, B2, H>(
    object: Value,
    from: Version,
    to: Version,
) -> Result<Value, ConversionError>
where
    A5: Convertible<H> + Serialize + DeserializeOwned,
    A6: Convertible<H> + Serialize + DeserializeOwned,
    B2: Convertible<H> + Serialize + DeserializeOwned,
    H: Hub + Serialize + DeserializeOwned,
{
    let hub: H = match from {
        Version::V1alpha5 => serde_json::from_value::<A5>(object)?.convert_to()?,
        Version::V1alpha6 => serde_json::from_value::<A6>(object)?.convert_to()?,
        Version::V1beta1 => serde_json::from_value(object)?,
        Version::V1beta2 => serde_json::from_value::<B2>(object)?.convert_to()?,
    };

    let converted = match to {
        Version::V1alpha5 => serde_json::to_value(A5::convert_from(&hub)?)?,
        Version::V1alpha6 => serde_json::to_value(A6::convert_from(&hub)?)?,
        Version::V1beta1 => serde_json::to_value(&hub)?,
        Version::V1beta2 => serde_json::to_value(B2::convert_from(&hub)?)?,
    };
    Ok(converted)
}

#[cfg(test)]
#[path = "scheme_test.rs"]
mod tests;
