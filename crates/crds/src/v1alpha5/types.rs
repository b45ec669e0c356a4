//! Shared v1alpha5 types
//!
//! Filters and references use the same legacy shapes as v1alpha6.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use crate::v1alpha6::{
    APIEndpoint, APIServerLoadBalancer, ExternalRouterIPParam, FailureDomainSpec, Instance,
    LoadBalancer, NetworkFilter, NetworkParam, NodeAddress, OpenStackIdentityReference, RootVolume,
    Router, SecurityGroup, SecurityGroupFilter, SecurityGroupParam, SecurityGroupRule, Subnet,
    SubnetFilter, SubnetParam,
};

/// Cluster API condition without severity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,

    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Cluster network as reported in status, with at most one subnet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,

    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<Subnet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router: Option<Router>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_load_balancer: Option<LoadBalancer>,
}
