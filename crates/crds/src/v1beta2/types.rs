//! Status types introduced by v1beta2
//!
//! Every type the resource specs use is unchanged from v1beta1 and
//! re-exported from there.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use crate::v1beta1::{
    APIEndpoint, BastionStatus, FailureDomain, LoadBalancer, NetworkStatus,
    NetworkStatusWithSubnets, NodeAddress, OpenStackIdentityReference, RootVolume, Router,
    SecurityGroupStatus,
};

/// Condition in the shape of the Kubernetes `metav1.Condition`
///
/// Unlike the v1beta1 condition there is no severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type in CamelCase, e.g. `Ready`
    #[serde(rename = "type")]
    pub type_: String,

    /// True, False or Unknown
    pub status: String,

    /// `metadata.generation` the condition was computed for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Last time the status changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Machine-readable reason for the last transition
    #[serde(default)]
    pub reason: String,

    /// Human-readable detail about the last transition
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Progress of the initial provisioning of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Initialization {
    /// Set once the infrastructure is ready for use. Never reset afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioned: Option<bool>,
}

/// Status kept for consumers of the v1beta1 contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeprecatedStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v1beta1: Option<V1beta1Status>,
}

/// The v1beta1 conditions and failure fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct V1beta1Status {
    /// Conditions with severity, as v1beta1 reports them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<crate::v1beta1::Condition>,

    /// Terminal failure reason, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// Terminal failure message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}
