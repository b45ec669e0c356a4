//! v1alpha5 ↔ v1beta1 conversion
//!
//! v1alpha5 shares the legacy filter conventions of v1alpha6, so each
//! structural mapping goes through the v1alpha6 shape and reuses its
//! conversion. Both directions then restore through [`convert_and_restore`],
//! with registries of their own for what v1alpha5 cannot express: routers,
//! the network MTU, machine ports and subnets beyond the first. Condition
//! severity has no snapshot to come back from and is lost when a hub object
//! is written back through this version.

use conversion::{ConversionError, Convertible, convert_and_restore};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::openstack_cluster::{
    Bastion, OpenStackCluster, OpenStackClusterSpec, OpenStackClusterStatus,
    OpenStackClusterTemplate, OpenStackClusterTemplateResource, OpenStackClusterTemplateSpec,
};
use super::openstack_machine::{
    OpenStackMachine, OpenStackMachineSpec, OpenStackMachineStatus, OpenStackMachineTemplate,
    OpenStackMachineTemplateResource, OpenStackMachineTemplateSpec,
};
use super::restore;
use super::types::{Condition, Network};
use crate::v1alpha6::{self as alpha6, conversion as alpha6_conversion};
use crate::v1beta1 as hub;

fn machine_spec_to_alpha6(spec: &OpenStackMachineSpec) -> alpha6::OpenStackMachineSpec {
    alpha6::OpenStackMachineSpec {
        provider_id: spec.provider_id.clone(),
        instance_id: spec.instance_id.clone(),
        cloud_name: spec.cloud_name.clone(),
        flavor: spec.flavor.clone(),
        image: spec.image.clone(),
        image_uuid: spec.image_uuid.clone(),
        ssh_key_name: spec.ssh_key_name.clone(),
        networks: spec.networks.clone(),
        ports: Vec::new(),
        subnet: spec.subnet.clone(),
        floating_ip: spec.floating_ip.clone(),
        security_groups: spec.security_groups.clone(),
        trunk: spec.trunk,
        tags: spec.tags.clone(),
        server_metadata: spec.server_metadata.clone(),
        config_drive: spec.config_drive,
        root_volume: spec.root_volume.clone(),
        server_group_id: spec.server_group_id.clone(),
        identity_ref: spec.identity_ref.clone(),
    }
}

fn machine_spec_from_alpha6(spec: alpha6::OpenStackMachineSpec) -> OpenStackMachineSpec {
    OpenStackMachineSpec {
        provider_id: spec.provider_id,
        instance_id: spec.instance_id,
        cloud_name: spec.cloud_name,
        flavor: spec.flavor,
        image: spec.image,
        image_uuid: spec.image_uuid,
        ssh_key_name: spec.ssh_key_name,
        networks: spec.networks,
        subnet: spec.subnet,
        floating_ip: spec.floating_ip,
        security_groups: spec.security_groups,
        trunk: spec.trunk,
        tags: spec.tags,
        server_metadata: spec.server_metadata,
        config_drive: spec.config_drive,
        root_volume: spec.root_volume,
        server_group_id: spec.server_group_id,
        identity_ref: spec.identity_ref,
    }
}

fn machine_spec_up(spec: &OpenStackMachineSpec) -> hub::OpenStackMachineSpec {
    alpha6_conversion::machine_spec_up(&machine_spec_to_alpha6(spec))
}

/// Ports other than plain network attachments are dropped
fn machine_spec_down(spec: &hub::OpenStackMachineSpec) -> OpenStackMachineSpec {
    machine_spec_from_alpha6(alpha6_conversion::machine_spec_down(spec))
}

fn condition_up(condition: &Condition) -> hub::Condition {
    hub::Condition {
        type_: condition.type_.clone(),
        status: condition.status.clone(),
        severity: None,
        last_transition_time: condition.last_transition_time,
        reason: condition.reason.clone(),
        message: condition.message.clone(),
    }
}

fn condition_down(condition: &hub::Condition) -> Condition {
    Condition {
        type_: condition.type_.clone(),
        status: condition.status.clone(),
        last_transition_time: condition.last_transition_time,
        reason: condition.reason.clone(),
        message: condition.message.clone(),
    }
}

fn machine_status_up(status: &OpenStackMachineStatus) -> hub::OpenStackMachineStatus {
    hub::OpenStackMachineStatus {
        ready: status.ready,
        addresses: status.addresses.clone(),
        instance_state: status.instance_state.clone(),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
        conditions: status.conditions.iter().map(condition_up).collect(),
    }
}

fn machine_status_down(status: &hub::OpenStackMachineStatus) -> OpenStackMachineStatus {
    OpenStackMachineStatus {
        ready: status.ready,
        addresses: status.addresses.clone(),
        instance_state: status.instance_state.clone(),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
        conditions: status.conditions.iter().map(condition_down).collect(),
    }
}

fn cluster_spec_to_alpha6(spec: &OpenStackClusterSpec) -> alpha6::OpenStackClusterSpec {
    alpha6::OpenStackClusterSpec {
        cloud_name: spec.cloud_name.clone(),
        node_cidr: spec.node_cidr.clone(),
        router: None,
        network: spec.network.clone(),
        subnet: spec.subnet.clone(),
        network_mtu: 0,
        dns_nameservers: spec.dns_nameservers.clone(),
        external_router_ips: spec.external_router_ips.clone(),
        external_network_id: spec.external_network_id.clone(),
        api_server_load_balancer: spec.api_server_load_balancer.clone(),
        disable_api_server_floating_ip: spec.disable_api_server_floating_ip,
        api_server_floating_ip: spec.api_server_floating_ip.clone(),
        api_server_fixed_ip: spec.api_server_fixed_ip.clone(),
        api_server_port: spec.api_server_port,
        managed_security_groups: spec.managed_security_groups,
        allow_all_in_cluster_traffic: spec.allow_all_in_cluster_traffic,
        disable_port_security: spec.disable_port_security,
        tags: spec.tags.clone(),
        control_plane_endpoint: spec.control_plane_endpoint.clone(),
        control_plane_availability_zones: spec.control_plane_availability_zones.clone(),
        control_plane_omit_availability_zone: spec.control_plane_omit_availability_zone,
        bastion: spec.bastion.as_ref().map(|bastion| alpha6::Bastion {
            enabled: bastion.enabled,
            instance: machine_spec_to_alpha6(&bastion.instance),
            availability_zone: bastion.availability_zone.clone(),
        }),
        identity_ref: spec.identity_ref.clone(),
    }
}

fn cluster_spec_from_alpha6(spec: alpha6::OpenStackClusterSpec) -> OpenStackClusterSpec {
    OpenStackClusterSpec {
        cloud_name: spec.cloud_name,
        node_cidr: spec.node_cidr,
        network: spec.network,
        subnet: spec.subnet,
        dns_nameservers: spec.dns_nameservers,
        external_router_ips: spec.external_router_ips,
        external_network_id: spec.external_network_id,
        api_server_load_balancer: spec.api_server_load_balancer,
        disable_api_server_floating_ip: spec.disable_api_server_floating_ip,
        api_server_floating_ip: spec.api_server_floating_ip,
        api_server_fixed_ip: spec.api_server_fixed_ip,
        api_server_port: spec.api_server_port,
        managed_security_groups: spec.managed_security_groups,
        allow_all_in_cluster_traffic: spec.allow_all_in_cluster_traffic,
        disable_port_security: spec.disable_port_security,
        tags: spec.tags,
        control_plane_endpoint: spec.control_plane_endpoint,
        control_plane_availability_zones: spec.control_plane_availability_zones,
        control_plane_omit_availability_zone: spec.control_plane_omit_availability_zone,
        bastion: spec.bastion.map(|bastion| Bastion {
            enabled: bastion.enabled,
            instance: machine_spec_from_alpha6(bastion.instance),
            availability_zone: bastion.availability_zone,
        }),
        identity_ref: spec.identity_ref,
    }
}

fn cluster_spec_up(spec: &OpenStackClusterSpec) -> hub::OpenStackClusterSpec {
    alpha6_conversion::cluster_spec_up(&cluster_spec_to_alpha6(spec))
}

fn cluster_spec_down(spec: &hub::OpenStackClusterSpec) -> OpenStackClusterSpec {
    cluster_spec_from_alpha6(alpha6_conversion::cluster_spec_down(spec))
}

fn network_status(network: &Network) -> alpha6::NetworkStatus {
    alpha6::NetworkStatus {
        name: network.name.clone(),
        id: network.id.clone(),
        tags: network.tags.clone(),
    }
}

fn network_from_status(network: &alpha6::NetworkStatus) -> Network {
    Network {
        name: network.name.clone(),
        id: network.id.clone(),
        tags: network.tags.clone(),
        ..Default::default()
    }
}

fn cluster_status_to_alpha6(status: &OpenStackClusterStatus) -> alpha6::OpenStackClusterStatus {
    let network = status.network.as_ref();
    alpha6::OpenStackClusterStatus {
        ready: status.ready,
        network: network.map(|network| alpha6::NetworkStatusWithSubnets {
            network: network_status(network),
            subnets: network.subnet.iter().cloned().collect(),
        }),
        external_network: status.external_network.as_ref().map(network_status),
        router: network.and_then(|network| network.router.clone()),
        api_server_load_balancer: network
            .and_then(|network| network.api_server_load_balancer.clone()),
        failure_domains: status.failure_domains.clone(),
        control_plane_security_group: status.control_plane_security_group.clone(),
        worker_security_group: status.worker_security_group.clone(),
        bastion_security_group: status.bastion_security_group.clone(),
        bastion: status.bastion.clone(),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
    }
}

/// Router and load balancer hang off the cluster network, so they are dropped
/// when the hub has no network
fn cluster_status_from_alpha6(status: alpha6::OpenStackClusterStatus) -> OpenStackClusterStatus {
    let router = status.router;
    let api_server_load_balancer = status.api_server_load_balancer;
    OpenStackClusterStatus {
        ready: status.ready,
        network: status.network.map(|network| Network {
            subnet: network.subnets.into_iter().next(),
            router,
            api_server_load_balancer,
            ..network_from_status(&network.network)
        }),
        external_network: status.external_network.as_ref().map(network_from_status),
        failure_domains: status.failure_domains,
        control_plane_security_group: status.control_plane_security_group,
        worker_security_group: status.worker_security_group,
        bastion_security_group: status.bastion_security_group,
        bastion: status.bastion,
        failure_reason: status.failure_reason,
        failure_message: status.failure_message,
    }
}

fn cluster_status_up(status: &OpenStackClusterStatus) -> hub::OpenStackClusterStatus {
    alpha6_conversion::cluster_status_up(&cluster_status_to_alpha6(status))
}

fn cluster_status_down(status: &hub::OpenStackClusterStatus) -> OpenStackClusterStatus {
    cluster_status_from_alpha6(alpha6_conversion::cluster_status_down(status))
}

fn cluster_up(src: &OpenStackCluster) -> Result<hub::OpenStackCluster, ConversionError> {
    Ok(hub::OpenStackCluster {
        metadata: ObjectMeta::default(),
        spec: cluster_spec_up(&src.spec),
        status: src.status.as_ref().map(cluster_status_up),
    })
}

fn cluster_down(src: &hub::OpenStackCluster) -> Result<OpenStackCluster, ConversionError> {
    Ok(OpenStackCluster {
        metadata: ObjectMeta::default(),
        spec: cluster_spec_down(&src.spec),
        status: src.status.as_ref().map(cluster_status_down),
    })
}

fn cluster_template_up(
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

fn cluster_template_down(
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

fn machine_up(src: &OpenStackMachine) -> Result<hub::OpenStackMachine, ConversionError> {
    Ok(hub::OpenStackMachine {
        metadata: ObjectMeta::default(),
        spec: machine_spec_up(&src.spec),
        status: src.status.as_ref().map(machine_status_up),
    })
}

fn machine_down(src: &hub::OpenStackMachine) -> Result<OpenStackMachine, ConversionError> {
    Ok(OpenStackMachine {
        metadata: ObjectMeta::default(),
        spec: machine_spec_down(&src.spec),
        status: src.status.as_ref().map(machine_status_down),
    })
}

fn machine_template_up(
    src: &OpenStackMachineTemplate,
) -> Result<hub::OpenStackMachineTemplate, ConversionError> {
    Ok(hub::OpenStackMachineTemplate {
        metadata: ObjectMeta::default(),
        spec: hub::OpenStackMachineTemplateSpec {
            template: hub::OpenStackMachineTemplateResource {
                spec: machine_spec_up(&src.spec.template.spec),
            },
        },
    })
}

fn machine_template_down(
    src: &hub::OpenStackMachineTemplate,
) -> Result<OpenStackMachineTemplate, ConversionError> {
    Ok(OpenStackMachineTemplate {
        metadata: ObjectMeta::default(),
        spec: OpenStackMachineTemplateSpec {
            template: OpenStackMachineTemplateResource {
                spec: machine_spec_down(&src.spec.template.spec),
            },
        },
    })
}

impl Convertible<hub::OpenStackCluster> for OpenStackCluster {
    fn convert_to(&self) -> Result<hub::OpenStackCluster, ConversionError> {
        convert_and_restore(
            self,
            cluster_up,
            cluster_down,
            &restore::cluster_restorers()?,
            &restore::hub_cluster_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackCluster) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            cluster_down,
            cluster_up,
            &restore::hub_cluster_restorers()?,
            &restore::cluster_restorers()?,
        )
    }
}

impl Convertible<hub::OpenStackClusterTemplate> for OpenStackClusterTemplate {
    fn convert_to(&self) -> Result<hub::OpenStackClusterTemplate, ConversionError> {
        convert_and_restore(
            self,
            cluster_template_up,
            cluster_template_down,
            &restore::cluster_template_restorers()?,
            &restore::hub_cluster_template_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackClusterTemplate) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            cluster_template_down,
            cluster_template_up,
            &restore::hub_cluster_template_restorers()?,
            &restore::cluster_template_restorers()?,
        )
    }
}

impl Convertible<hub::OpenStackMachine> for OpenStackMachine {
    fn convert_to(&self) -> Result<hub::OpenStackMachine, ConversionError> {
        convert_and_restore(
            self,
            machine_up,
            machine_down,
            &restore::machine_restorers()?,
            &restore::hub_machine_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackMachine) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            machine_down,
            machine_up,
            &restore::hub_machine_restorers()?,
            &restore::machine_restorers()?,
        )
    }
}

impl Convertible<hub::OpenStackMachineTemplate> for OpenStackMachineTemplate {
    fn convert_to(&self) -> Result<hub::OpenStackMachineTemplate, ConversionError> {
        convert_and_restore(
            self,
            machine_template_up,
            machine_template_down,
            &restore::machine_template_restorers()?,
            &restore::hub_machine_template_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackMachineTemplate) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            machine_template_down,
            machine_template_up,
            &restore::hub_machine_template_restorers()?,
            &restore::machine_template_restorers()?,
        )
    }
}

#[cfg(test)]
#[path = "conversion_test.rs"]
mod tests;
