//! v1beta2 ↔ v1beta1 conversion
//!
//! Specs map one to one. Status differs in three places:
//!
//! - `initialization.provisioned` carries the hub's `ready`
//! - the hub's conditions and failure fields live under `deprecated.v1beta1`
//! - `conditions` uses the Kubernetes condition shape and has no home on the
//!   hub, so it is derived from the hub conditions and restored from the
//!   snapshot while those are unchanged

use conversion::{ConversionError, Convertible, convert_and_restore};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::openstack_cluster::{
    OpenStackCluster, OpenStackClusterSpec, OpenStackClusterStatus, OpenStackClusterTemplate,
    OpenStackClusterTemplateResource, OpenStackClusterTemplateSpec,
};
use super::openstack_machine::{
    OpenStackMachine, OpenStackMachineSpec, OpenStackMachineStatus, OpenStackMachineTemplate,
    OpenStackMachineTemplateResource, OpenStackMachineTemplateSpec,
};
use super::restore;
use super::types::{Condition, DeprecatedStatus, Initialization, V1beta1Status};
use crate::v1beta1 as hub;

pub(crate) fn cluster_spec_up(spec: &OpenStackClusterSpec) -> hub::OpenStackClusterSpec {
    hub::OpenStackClusterSpec {
        managed_subnets: spec.managed_subnets.clone(),
        router: spec.router.clone(),
        network_mtu: spec.network_mtu,
        disable_port_security: spec.disable_port_security,
        network: spec.network.clone(),
        subnets: spec.subnets.clone(),
        external_router_ips: spec.external_router_ips.clone(),
        external_network: spec.external_network.clone(),
        disable_external_network: spec.disable_external_network,
        api_server_load_balancer: spec.api_server_load_balancer.clone(),
        disable_api_server_floating_ip: spec.disable_api_server_floating_ip,
        api_server_floating_ip: spec.api_server_floating_ip.clone(),
        api_server_fixed_ip: spec.api_server_fixed_ip.clone(),
        api_server_port: spec.api_server_port,
        managed_security_groups: spec.managed_security_groups.clone(),
        bastion: spec.bastion.clone(),
        tags: spec.tags.clone(),
        control_plane_endpoint: spec.control_plane_endpoint.clone(),
        control_plane_availability_zones: spec.control_plane_availability_zones.clone(),
        control_plane_omit_availability_zone: spec.control_plane_omit_availability_zone,
        identity_ref: spec.identity_ref.clone(),
    }
}

pub(crate) fn cluster_spec_down(spec: &hub::OpenStackClusterSpec) -> OpenStackClusterSpec {
    OpenStackClusterSpec {
        managed_subnets: spec.managed_subnets.clone(),
        router: spec.router.clone(),
        network_mtu: spec.network_mtu,
        disable_port_security: spec.disable_port_security,
        network: spec.network.clone(),
        subnets: spec.subnets.clone(),
        external_router_ips: spec.external_router_ips.clone(),
        external_network: spec.external_network.clone(),
        disable_external_network: spec.disable_external_network,
        api_server_load_balancer: spec.api_server_load_balancer.clone(),
        disable_api_server_floating_ip: spec.disable_api_server_floating_ip,
        api_server_floating_ip: spec.api_server_floating_ip.clone(),
        api_server_fixed_ip: spec.api_server_fixed_ip.clone(),
        api_server_port: spec.api_server_port,
        managed_security_groups: spec.managed_security_groups.clone(),
        bastion: spec.bastion.clone(),
        tags: spec.tags.clone(),
        control_plane_endpoint: spec.control_plane_endpoint.clone(),
        control_plane_availability_zones: spec.control_plane_availability_zones.clone(),
        control_plane_omit_availability_zone: spec.control_plane_omit_availability_zone,
        identity_ref: spec.identity_ref.clone(),
    }
}

pub(crate) fn machine_spec_up(spec: &OpenStackMachineSpec) -> hub::OpenStackMachineSpec {
    hub::OpenStackMachineSpec {
        provider_id: spec.provider_id.clone(),
        flavor: spec.flavor.clone(),
        flavor_id: spec.flavor_id.clone(),
        image: spec.image.clone(),
        ssh_key_name: spec.ssh_key_name.clone(),
        ports: spec.ports.clone(),
        security_groups: spec.security_groups.clone(),
        trunk: spec.trunk,
        tags: spec.tags.clone(),
        server_metadata: spec.server_metadata.clone(),
        config_drive: spec.config_drive,
        root_volume: spec.root_volume.clone(),
        server_group: spec.server_group.clone(),
        identity_ref: spec.identity_ref.clone(),
    }
}

pub(crate) fn machine_spec_down(spec: &hub::OpenStackMachineSpec) -> OpenStackMachineSpec {
    OpenStackMachineSpec {
        provider_id: spec.provider_id.clone(),
        flavor: spec.flavor.clone(),
        flavor_id: spec.flavor_id.clone(),
        image: spec.image.clone(),
        ssh_key_name: spec.ssh_key_name.clone(),
        ports: spec.ports.clone(),
        security_groups: spec.security_groups.clone(),
        trunk: spec.trunk,
        tags: spec.tags.clone(),
        server_metadata: spec.server_metadata.clone(),
        config_drive: spec.config_drive,
        root_volume: spec.root_volume.clone(),
        server_group: spec.server_group.clone(),
        identity_ref: spec.identity_ref.clone(),
    }
}

fn provisioned(initialization: Option<&Initialization>) -> bool {
    initialization.and_then(|init| init.provisioned).unwrap_or(false)
}

/// Only a provisioned resource reports initialization
fn initialization(ready: bool) -> Option<Initialization> {
    ready.then(|| Initialization {
        provisioned: Some(true),
    })
}

/// Deprecated status is omitted when there is nothing to report
fn deprecated(
    conditions: &[hub::Condition],
    failure_reason: Option<&String>,
    failure_message: Option<&String>,
) -> Option<DeprecatedStatus> {
    if conditions.is_empty() && failure_reason.is_none() && failure_message.is_none() {
        return None;
    }
    Some(DeprecatedStatus {
        v1beta1: Some(V1beta1Status {
            conditions: conditions.to_vec(),
            failure_reason: failure_reason.cloned(),
            failure_message: failure_message.cloned(),
        }),
    })
}

fn v1beta1_status(deprecated: Option<&DeprecatedStatus>) -> V1beta1Status {
    deprecated
        .and_then(|deprecated| deprecated.v1beta1.clone())
        .unwrap_or_default()
}

/// Severity is dropped; it lives on under `deprecated.v1beta1`
fn condition_down(condition: &hub::Condition) -> Condition {
    Condition {
        type_: condition.type_.clone(),
        status: condition.status.clone(),
        observed_generation: None,
        last_transition_time: condition.last_transition_time,
        reason: condition.reason.clone(),
        message: condition.message.clone(),
    }
}

fn cluster_status_up(status: &OpenStackClusterStatus) -> hub::OpenStackClusterStatus {
    let v1beta1 = v1beta1_status(status.deprecated.as_ref());
    hub::OpenStackClusterStatus {
        ready: provisioned(status.initialization.as_ref()),
        network: status.network.clone(),
        external_network: status.external_network.clone(),
        router: status.router.clone(),
        api_server_load_balancer: status.api_server_load_balancer.clone(),
        failure_domains: status.failure_domains.clone(),
        control_plane_security_group: status.control_plane_security_group.clone(),
        worker_security_group: status.worker_security_group.clone(),
        bastion_security_group: status.bastion_security_group.clone(),
        bastion: status.bastion.clone(),
        failure_reason: v1beta1.failure_reason,
        failure_message: v1beta1.failure_message,
        conditions: v1beta1.conditions,
    }
}

fn cluster_status_down(status: &hub::OpenStackClusterStatus) -> OpenStackClusterStatus {
    OpenStackClusterStatus {
        initialization: initialization(status.ready),
        network: status.network.clone(),
        external_network: status.external_network.clone(),
        router: status.router.clone(),
        api_server_load_balancer: status.api_server_load_balancer.clone(),
        failure_domains: status.failure_domains.clone(),
        control_plane_security_group: status.control_plane_security_group.clone(),
        worker_security_group: status.worker_security_group.clone(),
        bastion_security_group: status.bastion_security_group.clone(),
        bastion: status.bastion.clone(),
        conditions: status.conditions.iter().map(condition_down).collect(),
        deprecated: deprecated(
            &status.conditions,
            status.failure_reason.as_ref(),
            status.failure_message.as_ref(),
        ),
    }
}

fn machine_status_up(status: &OpenStackMachineStatus) -> hub::OpenStackMachineStatus {
    let v1beta1 = v1beta1_status(status.deprecated.as_ref());
    hub::OpenStackMachineStatus {
        ready: provisioned(status.initialization.as_ref()),
        addresses: status.addresses.clone(),
        instance_state: status.instance_state.clone(),
        failure_reason: v1beta1.failure_reason,
        failure_message: v1beta1.failure_message,
        conditions: v1beta1.conditions,
    }
}

fn machine_status_down(status: &hub::OpenStackMachineStatus) -> OpenStackMachineStatus {
    OpenStackMachineStatus {
        initialization: initialization(status.ready),
        addresses: status.addresses.clone(),
        instance_state: status.instance_state.clone(),
        conditions: status.conditions.iter().map(condition_down).collect(),
        deprecated: deprecated(
            &status.conditions,
            status.failure_reason.as_ref(),
            status.failure_message.as_ref(),
        ),
    }
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
            &restore::hub_restorers(),
        )
    }

    fn convert_from(src: &hub::OpenStackCluster) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            cluster_down,
            cluster_up,
            &restore::hub_restorers(),
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
            &restore::template_restorers(),
            &restore::hub_restorers(),
        )
    }

    fn convert_from(src: &hub::OpenStackClusterTemplate) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            cluster_template_down,
            cluster_template_up,
            &restore::hub_restorers(),
            &restore::template_restorers(),
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
            &restore::hub_restorers(),
        )
    }

    fn convert_from(src: &hub::OpenStackMachine) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            machine_down,
            machine_up,
            &restore::hub_restorers(),
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
            &restore::template_restorers(),
            &restore::hub_restorers(),
        )
    }

    fn convert_from(src: &hub::OpenStackMachineTemplate) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            machine_template_down,
            machine_template_up,
            &restore::hub_restorers(),
            &restore::template_restorers(),
        )
    }
}

#[cfg(test)]
#[path = "conversion_test.rs"]
mod tests;
