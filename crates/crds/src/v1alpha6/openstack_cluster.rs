//! OpenStackCluster and OpenStackClusterTemplate (v1alpha6)

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::openstack_machine::OpenStackMachineSpec;
use super::types::{
    APIEndpoint, FailureDomainSpec, Instance, LoadBalancer, NetworkFilter, NetworkStatus,
    NetworkStatusWithSubnets, OpenStackIdentityReference, Router, RouterFilter, SecurityGroup,
    SubnetFilter, SubnetParam,
};

#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1alpha6",
    kind = "OpenStackCluster",
    namespaced,
    status = "OpenStackClusterStatus",
    category = "cluster-api",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackClusterSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_name: String,

    /// CIDR of the subnet to create. Empty means use an existing network.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_cidr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router: Option<RouterFilter>,

    #[serde(default)]
    pub network: NetworkFilter,

    #[serde(default)]
    pub subnet: SubnetFilter,

    #[serde(default)]
    pub network_mtu: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_nameservers: Vec<String>,

    #[serde(default, rename = "externalRouterIPs", skip_serializing_if = "Vec::is_empty")]
    pub external_router_ips: Vec<ExternalRouterIPParam>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_network_id: String,

    #[serde(default)]
    pub api_server_load_balancer: APIServerLoadBalancer,

    #[serde(default, rename = "disableAPIServerFloatingIP")]
    pub disable_api_server_floating_ip: bool,

    #[serde(default, rename = "apiServerFloatingIP", skip_serializing_if = "String::is_empty")]
    pub api_server_floating_ip: String,

    #[serde(default, rename = "apiServerFixedIP", skip_serializing_if = "String::is_empty")]
    pub api_server_fixed_ip: String,

    #[serde(default)]
    pub api_server_port: i32,

    /// Create and manage the control plane and worker security groups
    #[serde(default)]
    pub managed_security_groups: bool,

    #[serde(default)]
    pub allow_all_in_cluster_traffic: bool,

    #[serde(default)]
    pub disable_port_security: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub control_plane_endpoint: APIEndpoint,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control_plane_availability_zones: Vec<String>,

    #[serde(default)]
    pub control_plane_omit_availability_zone: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bastion: Option<Bastion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_ref: Option<OpenStackIdentityReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRouterIPParam {
    #[serde(default, rename = "fixedIP", skip_serializing_if = "String::is_empty")]
    pub fixed_ip: String,

    pub subnet: SubnetParam,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct APIServerLoadBalancer {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_ports: Vec<i32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_cidrs: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provider: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bastion {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub instance: OpenStackMachineSpec,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub availability_zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackClusterStatus {
    #[serde(default)]
    pub ready: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkStatusWithSubnets>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_network: Option<NetworkStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router: Option<Router>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_load_balancer: Option<LoadBalancer>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failure_domains: BTreeMap<String, FailureDomainSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_security_group: Option<SecurityGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_security_group: Option<SecurityGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bastion_security_group: Option<SecurityGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bastion: Option<Instance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1alpha6",
    kind = "OpenStackClusterTemplate",
    namespaced,
    category = "cluster-api",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackClusterTemplateSpec {
    pub template: OpenStackClusterTemplateResource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackClusterTemplateResource {
    pub spec: OpenStackClusterSpec,
}
