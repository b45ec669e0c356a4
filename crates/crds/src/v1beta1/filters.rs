//! Resource filters and references
//!
//! Every OpenStack resource a cluster or machine points at is referenced either
//! directly by ID or by a filter that must match exactly one resource.

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

/// A single Neutron tag
///
/// Tags are non-empty and may not contain a comma: older API versions store tag
/// lists as one comma-joined string, and a tag containing a comma could not be
/// told apart from two tags there.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeutronTag(pub String);

impl NeutronTag {
    /// The tag as Neutron stores it
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NeutronTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NeutronTag {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for NeutronTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl JsonSchema for NeutronTag {
    fn schema_name() -> Cow<'static, str> {
        "NeutronTag".into()
    }

    fn inline_schema() -> bool {
        true
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "minLength": 1,
            "pattern": "^[^,]+$"
        })
    }
}

/// Neutron tag constraints shared by every Neutron filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterByNeutronTags {
    /// Resource must have all of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<NeutronTag>,

    /// Resource must have at least one of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags_any: Vec<NeutronTag>,

    /// Resource must not have all of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_tags: Vec<NeutronTag>,

    /// Resource must not have any of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_tags_any: Vec<NeutronTag>,
}

impl FilterByNeutronTags {
    /// True when no tag constraint is set
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.tags_any.is_empty()
            && self.not_tags.is_empty()
            && self.not_tags_any.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, rename = "projectID", skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    #[serde(flatten)]
    pub tags: FilterByNeutronTags,
}

/// Network by ID or by filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<NetworkFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubnetFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, rename = "projectID", skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<i32>,

    #[serde(default, rename = "gatewayIP", skip_serializing_if = "String::is_empty")]
    pub gateway_ip: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cidr: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv6_address_mode: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ipv6_ra_mode: String,

    #[serde(flatten)]
    pub tags: FilterByNeutronTags,
}

/// Subnet by ID or by filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubnetParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SubnetFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, rename = "projectID", skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    #[serde(flatten)]
    pub tags: FilterByNeutronTags,
}

/// Security group by ID or by filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SecurityGroupFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouterFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, rename = "projectID", skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    #[serde(flatten)]
    pub tags: FilterByNeutronTags,
}

/// Router by ID or by filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouterParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RouterFilter>,
}

/// Glance image filter. Glance tags are plain strings, not Neutron tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Image by ID or by filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ImageFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerGroupFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Server group by ID or by filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerGroupParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ServerGroupFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_is_empty() {
        assert!(FilterByNeutronTags::default().is_empty());

        let filter = FilterByNeutronTags {
            not_tags_any: vec![NeutronTag::from("legacy".to_string())],
            ..Default::default()
        };
        assert!(!filter.is_empty());
        assert_eq!(filter.not_tags_any[0].as_str(), "legacy");
    }
}
