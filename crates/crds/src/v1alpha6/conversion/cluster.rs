//! Structural v1alpha6 ↔ v1beta1 mapping for clusters and cluster templates

use std::collections::BTreeMap;

use conversion::{ConversionError, from_optional, to_optional};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::filters::{
    network_filter_up, network_param_down, router_filter_up, router_param_down, subnet_filter_up,
    subnet_param_down, subnet_ref_down, subnet_ref_up,
};
use super::machine::{identity_ref_down, identity_ref_up, machine_spec_down, machine_spec_up};
use crate::v1alpha6::openstack_cluster::{
    APIServerLoadBalancer, Bastion, ExternalRouterIPParam, OpenStackCluster, OpenStackClusterSpec,
    OpenStackClusterStatus, OpenStackClusterTemplate, OpenStackClusterTemplateResource,
    OpenStackClusterTemplateSpec,
};
use crate::v1alpha6::types::{FailureDomainSpec, Instance, SecurityGroup};
use crate::v1beta1::{self as hub, legacy_all_nodes_rules};

fn api_server_load_balancer_up(lb: &APIServerLoadBalancer) -> Option<hub::APIServerLoadBalancer> {
    if *lb == APIServerLoadBalancer::default() {
        return None;
    }
    Some(hub::APIServerLoadBalancer {
        enabled: Some(lb.enabled),
        additional_ports: lb.additional_ports.clone(),
        allowed_cidrs: lb.allowed_cidrs.clone(),
        provider: to_optional(lb.provider.clone()),
    })
}

fn api_server_load_balancer_down(lb: &hub::APIServerLoadBalancer) -> APIServerLoadBalancer {
    APIServerLoadBalancer {
        enabled: lb.enabled.unwrap_or(true),
        additional_ports: lb.additional_ports.clone(),
        allowed_cidrs: lb.allowed_cidrs.clone(),
        provider: lb.provider.clone().unwrap_or_default(),
    }
}

/// The legacy bastion floating IP lives on the instance spec
fn bastion_up(bastion: &Bastion) -> hub::Bastion {
    let mut instance = bastion.instance.clone();
    let floating_ip = std::mem::take(&mut instance.floating_ip);

    hub::Bastion {
        enabled: Some(bastion.enabled),
        spec: (instance != Default::default()).then(|| machine_spec_up(&instance)),
        availability_zone: to_optional(bastion.availability_zone.clone()),
        floating_ip: to_optional(floating_ip),
    }
}

fn bastion_down(bastion: &hub::Bastion) -> Bastion {
    let mut instance = bastion.spec.as_ref().map(machine_spec_down).unwrap_or_default();
    instance.floating_ip = bastion.floating_ip.clone().unwrap_or_default();

    Bastion {
        enabled: bastion.enabled.unwrap_or(true),
        instance,
        availability_zone: bastion.availability_zone.clone().unwrap_or_default(),
    }
}

pub(crate) fn cluster_spec_up(spec: &OpenStackClusterSpec) -> hub::OpenStackClusterSpec {
    let managed_subnets = if spec.node_cidr.is_empty() {
        Vec::new()
    } else {
        vec![hub::SubnetSpec {
            cidr: spec.node_cidr.clone(),
            dns_nameservers: spec.dns_nameservers.clone(),
            allocation_pools: Vec::new(),
        }]
    };

    let managed_security_groups = spec.managed_security_groups.then(|| hub::ManagedSecurityGroups {
        all_nodes_security_group_rules: legacy_all_nodes_rules(spec.allow_all_in_cluster_traffic),
        allow_all_in_cluster_traffic: spec.allow_all_in_cluster_traffic,
    });

    hub::OpenStackClusterSpec {
        managed_subnets,
        router: spec.router.as_ref().map(router_filter_up),
        network_mtu: to_optional(spec.network_mtu),
        disable_port_security: to_optional(spec.disable_port_security),
        network: network_filter_up(&spec.network),
        subnets: subnet_filter_up(&spec.subnet).into_iter().collect(),
        external_router_ips: spec
            .external_router_ips
            .iter()
            .map(|ip| hub::ExternalRouterIPParam {
                fixed_ip: ip.fixed_ip.clone(),
                subnet: subnet_ref_up(&ip.subnet),
            })
            .collect(),
        external_network: to_optional(spec.external_network_id.clone()).map(|id| hub::NetworkParam {
            id: Some(id),
            filter: None,
        }),
        disable_external_network: None,
        api_server_load_balancer: api_server_load_balancer_up(&spec.api_server_load_balancer),
        disable_api_server_floating_ip: to_optional(spec.disable_api_server_floating_ip),
        api_server_floating_ip: to_optional(spec.api_server_floating_ip.clone()),
        api_server_fixed_ip: to_optional(spec.api_server_fixed_ip.clone()),
        api_server_port: to_optional(spec.api_server_port),
        managed_security_groups,
        bastion: spec.bastion.as_ref().map(bastion_up),
        tags: spec.tags.clone(),
        control_plane_endpoint: to_optional(spec.control_plane_endpoint.clone()),
        control_plane_availability_zones: spec.control_plane_availability_zones.clone(),
        control_plane_omit_availability_zone: to_optional(
            spec.control_plane_omit_availability_zone,
        ),
        identity_ref: identity_ref_up(spec.identity_ref.as_ref(), &spec.cloud_name),
    }
}

pub(crate) fn cluster_spec_down(spec: &hub::OpenStackClusterSpec) -> OpenStackClusterSpec {
    let (identity_ref, cloud_name) = identity_ref_down(spec.identity_ref.as_ref());
    let (node_cidr, dns_nameservers) = spec
        .managed_subnets
        .first()
        .map(|subnet| (subnet.cidr.clone(), subnet.dns_nameservers.clone()))
        .unwrap_or_default();
    let managed_security_groups = spec.managed_security_groups.as_ref();

    OpenStackClusterSpec {
        cloud_name,
        node_cidr,
        router: spec.router.as_ref().map(router_param_down),
        network: spec.network.as_ref().map(network_param_down).unwrap_or_default(),
        subnet: spec.subnets.first().map(subnet_param_down).unwrap_or_default(),
        network_mtu: from_optional(spec.network_mtu),
        dns_nameservers,
        external_router_ips: spec
            .external_router_ips
            .iter()
            .map(|ip| ExternalRouterIPParam {
                fixed_ip: ip.fixed_ip.clone(),
                subnet: subnet_ref_down(&ip.subnet),
            })
            .collect(),
        external_network_id: spec
            .external_network
            .as_ref()
            .and_then(|network| network.id.clone())
            .unwrap_or_default(),
        api_server_load_balancer: spec
            .api_server_load_balancer
            .as_ref()
            .map(api_server_load_balancer_down)
            .unwrap_or_default(),
        disable_api_server_floating_ip: from_optional(spec.disable_api_server_floating_ip),
        api_server_floating_ip: from_optional(spec.api_server_floating_ip.clone()),
        api_server_fixed_ip: from_optional(spec.api_server_fixed_ip.clone()),
        api_server_port: from_optional(spec.api_server_port),
        managed_security_groups: managed_security_groups.is_some(),
        allow_all_in_cluster_traffic: managed_security_groups
            .is_some_and(|groups| groups.allow_all_in_cluster_traffic),
        disable_port_security: from_optional(spec.disable_port_security),
        tags: spec.tags.clone(),
        control_plane_endpoint: from_optional(spec.control_plane_endpoint.clone()),
        control_plane_availability_zones: spec.control_plane_availability_zones.clone(),
        control_plane_omit_availability_zone: from_optional(
            spec.control_plane_omit_availability_zone,
        ),
        bastion: spec.bastion.as_ref().map(bastion_down),
        identity_ref,
    }
}

fn security_group_up(group: &SecurityGroup) -> hub::SecurityGroupStatus {
    hub::SecurityGroupStatus {
        name: group.name.clone(),
        id: group.id.clone(),
    }
}

fn security_group_down(group: &hub::SecurityGroupStatus) -> SecurityGroup {
    SecurityGroup {
        name: group.name.clone(),
        id: group.id.clone(),
        rules: Vec::new(),
    }
}

fn instance_up(instance: &Instance) -> hub::BastionStatus {
    hub::BastionStatus {
        id: instance.id.clone(),
        name: instance.name.clone(),
        ssh_key_name: instance.ssh_key_name.clone(),
        state: instance.state.clone(),
        ip: instance.ip.clone(),
        floating_ip: instance.floating_ip.clone(),
    }
}

fn instance_down(bastion: &hub::BastionStatus) -> Instance {
    Instance {
        id: bastion.id.clone(),
        name: bastion.name.clone(),
        ssh_key_name: bastion.ssh_key_name.clone(),
        state: bastion.state.clone(),
        ip: bastion.ip.clone(),
        floating_ip: bastion.floating_ip.clone(),
        ..Default::default()
    }
}

/// Map entries come out sorted by name
pub(crate) fn failure_domains_up(
    domains: &BTreeMap<String, FailureDomainSpec>,
) -> Vec<hub::FailureDomain> {
    domains
        .iter()
        .map(|(name, domain)| hub::FailureDomain {
            name: name.clone(),
            control_plane: domain.control_plane,
            attributes: domain.attributes.clone(),
        })
        .collect()
}

/// The last entry wins when a name appears more than once
pub(crate) fn failure_domains_down(
    domains: &[hub::FailureDomain],
) -> BTreeMap<String, FailureDomainSpec> {
    domains
        .iter()
        .map(|domain| {
            (
                domain.name.clone(),
                FailureDomainSpec {
                    control_plane: domain.control_plane,
                    attributes: domain.attributes.clone(),
                },
            )
        })
        .collect()
}

pub(crate) fn cluster_status_up(status: &OpenStackClusterStatus) -> hub::OpenStackClusterStatus {
    hub::OpenStackClusterStatus {
        ready: status.ready,
        network: status.network.clone(),
        external_network: status.external_network.clone(),
        router: status.router.clone(),
        api_server_load_balancer: status.api_server_load_balancer.clone(),
        failure_domains: failure_domains_up(&status.failure_domains),
        control_plane_security_group: status
            .control_plane_security_group
            .as_ref()
            .map(security_group_up),
        worker_security_group: status.worker_security_group.as_ref().map(security_group_up),
        bastion_security_group: status.bastion_security_group.as_ref().map(security_group_up),
        bastion: status.bastion.as_ref().map(instance_up),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
        conditions: Vec::new(),
    }
}

pub(crate) fn cluster_status_down(status: &hub::OpenStackClusterStatus) -> OpenStackClusterStatus {
    OpenStackClusterStatus {
        ready: status.ready,
        network: status.network.clone(),
        external_network: status.external_network.clone(),
        router: status.router.clone(),
        api_server_load_balancer: status.api_server_load_balancer.clone(),
        failure_domains: failure_domains_down(&status.failure_domains),
        control_plane_security_group: status
            .control_plane_security_group
            .as_ref()
            .map(security_group_down),
        worker_security_group: status.worker_security_group.as_ref().map(security_group_down),
        bastion_security_group: status.bastion_security_group.as_ref().map(security_group_down),
        bastion: status.bastion.as_ref().map(instance_down),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
    }
}

pub(crate) fn cluster_up(src: &OpenStackCluster) -> Result<hub::OpenStackCluster, ConversionError> {
    Ok(hub::OpenStackCluster {
        metadata: ObjectMeta::default(),
        spec: cluster_spec_up(&src.spec),
        status: src.status.as_ref().map(cluster_status_up),
    })
}

pub(crate) fn cluster_down(
    src: &hub::OpenStackCluster,
) -> Result<OpenStackCluster, ConversionError> {
    Ok(OpenStackCluster {
        metadata: ObjectMeta::default(),
        spec: cluster_spec_down(&src.spec),
        status: src.status.as_ref().map(cluster_status_down),
    })
}

pub(crate) fn cluster_template_up(
    src: &OpenStackClusterTemplate,
) -> Result<hub::OpenStackClusterTemplate, ConversionError> {
    Ok(hub::OpenStackClusterTemplate {
        metadata: ObjectMeta::default(),
        spec: hub::OpenStackClusterTemplateSpec {
            template: hub::OpenStackClusterTemplateResource {
                spec: cluster_spec_up(&src.spec.template.spec),
            },
        },
    })
}

pub(crate) fn cluster_template_down(
    src: &hub::OpenStackClusterTemplate,
) -> Result<OpenStackClusterTemplate, ConversionError> {
    Ok(OpenStackClusterTemplate {
        metadata: ObjectMeta::default(),
        spec: OpenStackClusterTemplateSpec {
            template: OpenStackClusterTemplateResource {
                spec: cluster_spec_down(&src.spec.template.spec),
            },
        },
    })
}
