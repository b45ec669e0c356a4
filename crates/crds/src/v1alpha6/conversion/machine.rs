//! Structural v1alpha6 ↔ v1beta1 mapping for machines and machine templates

use conversion::{ConversionError, to_optional};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::filters::{
    network_filter_up, network_param_down, security_group_param_down, security_group_param_up,
    subnet_filter_up, subnet_param_down, subnet_ref_up,
};
use crate::v1alpha6::openstack_machine::{
    AddressPair, FixedIP, OpenStackMachine, OpenStackMachineSpec, OpenStackMachineTemplate,
    OpenStackMachineTemplateResource, OpenStackMachineTemplateSpec, PortOpts,
};
use crate::v1alpha6::types::{NetworkParam, OpenStackIdentityReference, RootVolume};
use crate::v1beta1 as hub;

pub(crate) fn identity_ref_up(
    identity_ref: Option<&OpenStackIdentityReference>,
    cloud_name: &str,
) -> Option<hub::OpenStackIdentityReference> {
    if identity_ref.is_none() && cloud_name.is_empty() {
        return None;
    }
    Some(hub::OpenStackIdentityReference {
        name: identity_ref.map(|identity| identity.name.clone()).unwrap_or_default(),
        cloud_name: cloud_name.to_string(),
    })
}

/// Returns the legacy reference and cloud name
pub(crate) fn identity_ref_down(
    identity_ref: Option<&hub::OpenStackIdentityReference>,
) -> (Option<OpenStackIdentityReference>, String) {
    let Some(identity) = identity_ref else {
        return (None, String::new());
    };
    let legacy = (!identity.name.is_empty()).then(|| OpenStackIdentityReference {
        kind: "Secret".to_string(),
        name: identity.name.clone(),
    });
    (legacy, identity.cloud_name.clone())
}

/// The image UUID wins over the name when both are set
fn image_up(name: &str, uuid: &str) -> hub::ImageParam {
    if !uuid.is_empty() {
        return hub::ImageParam {
            id: Some(uuid.to_string()),
            filter: None,
        };
    }
    hub::ImageParam {
        id: None,
        filter: to_optional(name.to_string()).map(|name| hub::ImageFilter {
            name: Some(name),
            tags: Vec::new(),
        }),
    }
}

fn image_down(image: &hub::ImageParam) -> (String, String) {
    let name = image
        .filter
        .as_ref()
        .and_then(|filter| filter.name.clone())
        .unwrap_or_default();
    (name, image.id.clone().unwrap_or_default())
}

fn root_volume_up(volume: &RootVolume) -> hub::RootVolume {
    hub::RootVolume {
        size_gib: volume.disk_size,
        volume_type: volume.volume_type.clone(),
        availability_zone: to_optional(volume.availability_zone.clone()),
    }
}

fn root_volume_down(volume: &hub::RootVolume) -> RootVolume {
    RootVolume {
        disk_size: volume.size_gib,
        volume_type: volume.volume_type.clone(),
        availability_zone: volume.availability_zone.clone().unwrap_or_default(),
    }
}

/// A legacy network attachment is a port on that network
pub(crate) fn network_to_port(network: &NetworkParam) -> hub::PortOpts {
    let param = if network.uuid.is_empty() {
        network_filter_up(&network.filter)
    } else {
        Some(hub::NetworkParam {
            id: Some(network.uuid.clone()),
            filter: None,
        })
    };

    let mut fixed_ips: Vec<hub::FixedIP> = network
        .subnets
        .iter()
        .map(|subnet| hub::FixedIP {
            subnet: Some(subnet_ref_up(subnet)),
            ip_address: None,
        })
        .collect();
    if !network.fixed_ip.is_empty() {
        fixed_ips.push(hub::FixedIP {
            subnet: None,
            ip_address: Some(network.fixed_ip.clone()),
        });
    }

    hub::PortOpts {
        network: param,
        fixed_ips,
        ..Default::default()
    }
}

fn port_up(port: &PortOpts) -> hub::PortOpts {
    let mut security_groups: Vec<hub::SecurityGroupParam> = port
        .security_groups
        .iter()
        .map(|id| hub::SecurityGroupParam {
            id: Some(id.clone()),
            filter: None,
        })
        .collect();
    security_groups.extend(port.security_group_filters.iter().map(security_group_param_up));

    hub::PortOpts {
        network: port.network.as_ref().and_then(network_filter_up),
        description: to_optional(port.description.clone()),
        name_suffix: to_optional(port.name_suffix.clone()),
        fixed_ips: port
            .fixed_ips
            .iter()
            .map(|ip| hub::FixedIP {
                subnet: ip.subnet.as_ref().and_then(subnet_filter_up),
                ip_address: to_optional(ip.ip_address.clone()),
            })
            .collect(),
        security_groups,
        tags: port.tags.clone(),
        trunk: port.trunk,
        disable_port_security: port.disable_port_security,
        vnic_type: to_optional(port.vnic_type.clone()),
        mac_address: to_optional(port.mac_address.clone()),
        allowed_address_pairs: port
            .allowed_address_pairs
            .iter()
            .map(|pair| hub::AddressPair {
                ip_address: pair.ip_address.clone(),
                mac_address: to_optional(pair.mac_address.clone()),
            })
            .collect(),
    }
}

fn port_down(port: &hub::PortOpts) -> PortOpts {
    PortOpts {
        network: port.network.as_ref().map(network_param_down),
        name_suffix: port.name_suffix.clone().unwrap_or_default(),
        description: port.description.clone().unwrap_or_default(),
        mac_address: port.mac_address.clone().unwrap_or_default(),
        fixed_ips: port
            .fixed_ips
            .iter()
            .map(|ip| FixedIP {
                subnet: ip.subnet.as_ref().map(subnet_param_down),
                ip_address: ip.ip_address.clone().unwrap_or_default(),
            })
            .collect(),
        security_group_filters: port
            .security_groups
            .iter()
            .map(security_group_param_down)
            .collect(),
        allowed_address_pairs: port
            .allowed_address_pairs
            .iter()
            .map(|pair| AddressPair {
                ip_address: pair.ip_address.clone(),
                mac_address: pair.mac_address.clone().unwrap_or_default(),
            })
            .collect(),
        trunk: port.trunk,
        vnic_type: port.vnic_type.clone().unwrap_or_default(),
        disable_port_security: port.disable_port_security,
        tags: port.tags.clone(),
        ..Default::default()
    }
}

pub(crate) fn machine_spec_up(spec: &OpenStackMachineSpec) -> hub::OpenStackMachineSpec {
    let mut ports: Vec<hub::PortOpts> = spec.networks.iter().map(network_to_port).collect();
    ports.extend(spec.ports.iter().map(port_up));

    hub::OpenStackMachineSpec {
        provider_id: spec.provider_id.clone(),
        flavor: to_optional(spec.flavor.clone()),
        flavor_id: None,
        image: image_up(&spec.image, &spec.image_uuid),
        ssh_key_name: spec.ssh_key_name.clone(),
        ports,
        security_groups: spec.security_groups.iter().map(security_group_param_up).collect(),
        trunk: spec.trunk,
        tags: spec.tags.clone(),
        server_metadata: spec
            .server_metadata
            .iter()
            .map(|(key, value)| hub::ServerMetadata {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
        config_drive: spec.config_drive,
        root_volume: spec.root_volume.as_ref().map(root_volume_up),
        server_group: to_optional(spec.server_group_id.clone()).map(|id| hub::ServerGroupParam {
            id: Some(id),
            filter: None,
        }),
        identity_ref: identity_ref_up(spec.identity_ref.as_ref(), &spec.cloud_name),
    }
}

pub(crate) fn machine_spec_down(spec: &hub::OpenStackMachineSpec) -> OpenStackMachineSpec {
    let (identity_ref, cloud_name) = identity_ref_down(spec.identity_ref.as_ref());
    let (image, image_uuid) = image_down(&spec.image);

    OpenStackMachineSpec {
        provider_id: spec.provider_id.clone(),
        instance_id: None,
        cloud_name,
        flavor: spec.flavor.clone().unwrap_or_default(),
        image,
        image_uuid,
        ssh_key_name: spec.ssh_key_name.clone(),
        networks: Vec::new(),
        ports: spec.ports.iter().map(port_down).collect(),
        subnet: String::new(),
        floating_ip: String::new(),
        security_groups: spec.security_groups.iter().map(security_group_param_down).collect(),
        trunk: spec.trunk,
        tags: spec.tags.clone(),
        server_metadata: spec
            .server_metadata
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect(),
        config_drive: spec.config_drive,
        root_volume: spec.root_volume.as_ref().map(root_volume_down),
        server_group_id: spec
            .server_group
            .as_ref()
            .and_then(|group| group.id.clone())
            .unwrap_or_default(),
        identity_ref,
    }
}

pub(crate) fn machine_up(src: &OpenStackMachine) -> Result<hub::OpenStackMachine, ConversionError> {
    Ok(hub::OpenStackMachine {
        metadata: ObjectMeta::default(),
        spec: machine_spec_up(&src.spec),
        status: src.status.clone(),
    })
}

pub(crate) fn machine_down(
    src: &hub::OpenStackMachine,
) -> Result<OpenStackMachine, ConversionError> {
    Ok(OpenStackMachine {
        metadata: ObjectMeta::default(),
        spec: machine_spec_down(&src.spec),
        status: src.status.clone(),
    })
}

pub(crate) fn machine_template_up(
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

pub(crate) fn machine_template_down(
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
