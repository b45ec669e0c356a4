//! Restorer registries for v1alpha6 ↔ v1beta1
//!
//! Spec-level registries are shared by an object and its template and lifted
//! onto each of them. Status registries work on the object directly. The hub
//! registries that do not depend on how the spoke spells a field are also used
//! by v1alpha5.

use conversion::optional::{restore_bool, restore_int, restore_string};
use conversion::{
    ConversionError, Field, HashedFieldRestorer, RestorerFor, UnconditionalFieldRestorer, field,
};

use crate::v1alpha6::openstack_cluster::{
    OpenStackCluster, OpenStackClusterSpec, OpenStackClusterTemplate,
};
use crate::v1alpha6::openstack_machine::{
    OpenStackMachine, OpenStackMachineSpec, OpenStackMachineTemplate,
};
use crate::v1alpha6::types::{Instance, SecurityGroup};
use crate::v1beta1 as hub;

/// Replace the first element, or clear the list when there is none
fn set_first<T>(list: &mut Vec<T>, first: Option<T>) {
    let Some(first) = first else {
        list.clear();
        return;
    };
    if list.is_empty() {
        list.push(first);
    } else {
        list[0] = first;
    }
}

/// Elements after the first only exist alongside a first element
fn set_rest<T>(list: &mut Vec<T>, rest: Vec<T>) {
    list.truncate(1);
    if !list.is_empty() {
        list.extend(rest);
    }
}

/// Hub cluster spec restorers for everything but `networkMTU`, which each
/// spoke restores in its own way.
///
/// The spoke only carries the first subnet and the first managed subnet. The
/// first element is hash-gated so an edit of it in the spoke wins; the rest
/// cannot be edited there and is always put back behind it.
pub(crate) fn hub_cluster_spec_common_restorers(
) -> Result<RestorerFor<hub::OpenStackClusterSpec>, ConversionError> {
    type Spec = hub::OpenStackClusterSpec;

    let mut restorers = RestorerFor::new();
    restorers.register(
        "managedSubnets",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| spec.managed_subnets.first().cloned(),
            |spec: &mut Spec, first| set_first(&mut spec.managed_subnets, first),
        )),
    )?;
    restorers.register(
        "additionalManagedSubnets",
        UnconditionalFieldRestorer::new(Field::new(
            |spec: &Spec| spec.managed_subnets.iter().skip(1).cloned().collect::<Vec<_>>(),
            |spec: &mut Spec, rest| set_rest(&mut spec.managed_subnets, rest),
        )),
    )?;
    restorers.register("router", HashedFieldRestorer::new(field!(Spec, router)))?;
    restorers.register("network", HashedFieldRestorer::new(field!(Spec, network)))?;
    restorers.register(
        "subnets",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| spec.subnets.first().cloned(),
            |spec: &mut Spec, first| set_first(&mut spec.subnets, first),
        )),
    )?;
    restorers.register(
        "additionalSubnets",
        UnconditionalFieldRestorer::new(Field::new(
            |spec: &Spec| spec.subnets.iter().skip(1).cloned().collect::<Vec<_>>(),
            |spec: &mut Spec, rest| set_rest(&mut spec.subnets, rest),
        )),
    )?;
    restorers.register(
        "externalNetwork",
        HashedFieldRestorer::new(field!(Spec, external_network)),
    )?;
    restorers.register(
        "apiServerLoadBalancer",
        HashedFieldRestorer::new(field!(Spec, api_server_load_balancer)),
    )?;
    restorers.register(
        "managedSecurityGroups",
        HashedFieldRestorer::new(field!(Spec, managed_security_groups)),
    )?;
    restorers.register("bastion", HashedFieldRestorer::new(field!(Spec, bastion)))?;

    restorers.register(
        "disableExternalNetwork",
        UnconditionalFieldRestorer::new(field!(Spec, disable_external_network)),
    )?;
    restorers.register(
        "disableAPIServerFloatingIP",
        UnconditionalFieldRestorer::new(field!(Spec, disable_api_server_floating_ip))
            .with_restore(restore_bool),
    )?;
    restorers.register(
        "apiServerFloatingIP",
        UnconditionalFieldRestorer::new(field!(Spec, api_server_floating_ip))
            .with_restore(restore_string),
    )?;
    restorers.register(
        "apiServerFixedIP",
        UnconditionalFieldRestorer::new(field!(Spec, api_server_fixed_ip))
            .with_restore(restore_string),
    )?;
    restorers.register(
        "apiServerPort",
        UnconditionalFieldRestorer::new(field!(Spec, api_server_port)).with_restore(restore_int),
    )?;
    restorers.register(
        "disablePortSecurity",
        UnconditionalFieldRestorer::new(field!(Spec, disable_port_security))
            .with_restore(restore_bool),
    )?;
    restorers.register(
        "controlPlaneOmitAvailabilityZone",
        UnconditionalFieldRestorer::new(field!(Spec, control_plane_omit_availability_zone))
            .with_restore(restore_bool),
    )?;
    Ok(restorers)
}

fn hub_cluster_spec_restorers(
) -> Result<RestorerFor<hub::OpenStackClusterSpec>, ConversionError> {
    let mut restorers = hub_cluster_spec_common_restorers()?;
    restorers.register(
        "networkMTU",
        UnconditionalFieldRestorer::new(field!(hub::OpenStackClusterSpec, network_mtu))
            .with_restore(restore_int),
    )?;
    Ok(restorers)
}

/// Cloud name and identity reference are one field on the hub, so they are
/// restored together.
fn cluster_spec_restorers() -> Result<RestorerFor<OpenStackClusterSpec>, ConversionError> {
    type Spec = OpenStackClusterSpec;

    let mut restorers = RestorerFor::new();
    restorers.register(
        "identityRef",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.identity_ref.clone(), spec.cloud_name.clone()),
            |spec: &mut Spec, (identity_ref, cloud_name)| {
                spec.identity_ref = identity_ref;
                spec.cloud_name = cloud_name;
            },
        )),
    )?;
    restorers.register(
        "nodeCidr",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.node_cidr.clone(), spec.dns_nameservers.clone()),
            |spec: &mut Spec, (node_cidr, dns_nameservers)| {
                spec.node_cidr = node_cidr;
                spec.dns_nameservers = dns_nameservers;
            },
        )),
    )?;
    restorers.register("network", HashedFieldRestorer::new(field!(Spec, network)))?;
    restorers.register("subnet", HashedFieldRestorer::new(field!(Spec, subnet)))?;
    restorers.register("router", HashedFieldRestorer::new(field!(Spec, router)))?;
    restorers.register(
        "externalRouterIPs",
        HashedFieldRestorer::new(field!(Spec, external_router_ips)),
    )?;
    restorers.register(
        "managedSecurityGroups",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.managed_security_groups, spec.allow_all_in_cluster_traffic),
            |spec: &mut Spec, (managed, allow_all)| {
                spec.managed_security_groups = managed;
                spec.allow_all_in_cluster_traffic = allow_all;
            },
        )),
    )?;
    restorers.register("bastion", HashedFieldRestorer::new(field!(Spec, bastion)))?;
    Ok(restorers)
}

fn hub_machine_spec_restorers(
) -> Result<RestorerFor<hub::OpenStackMachineSpec>, ConversionError> {
    type Spec = hub::OpenStackMachineSpec;

    let mut restorers = RestorerFor::new();
    restorers.register(
        "flavor",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.flavor.clone(), spec.flavor_id.clone()),
            |spec: &mut Spec, (flavor, flavor_id)| {
                spec.flavor = flavor;
                spec.flavor_id = flavor_id;
            },
        )),
    )?;
    restorers.register("image", HashedFieldRestorer::new(field!(Spec, image)))?;
    restorers.register("ports", HashedFieldRestorer::new(field!(Spec, ports)))?;
    restorers.register(
        "serverMetadata",
        HashedFieldRestorer::new(field!(Spec, server_metadata)),
    )?;
    restorers.register("serverGroup", HashedFieldRestorer::new(field!(Spec, server_group)))?;
    restorers.register("rootVolume", HashedFieldRestorer::new(field!(Spec, root_volume)))?;
    Ok(restorers)
}

fn machine_spec_restorers() -> Result<RestorerFor<OpenStackMachineSpec>, ConversionError> {
    type Spec = OpenStackMachineSpec;

    let mut restorers = RestorerFor::new();
    restorers.register(
        "image",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.image.clone(), spec.image_uuid.clone()),
            |spec: &mut Spec, (image, image_uuid)| {
                spec.image = image;
                spec.image_uuid = image_uuid;
            },
        )),
    )?;
    // Legacy networks become the leading ports, so both are restored together
    restorers.register(
        "ports",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.networks.clone(), spec.ports.clone()),
            |spec: &mut Spec, (networks, ports)| {
                spec.networks = networks;
                spec.ports = ports;
            },
        )),
    )?;
    restorers.register(
        "securityGroups",
        HashedFieldRestorer::new(field!(Spec, security_groups)),
    )?;
    restorers.register(
        "identityRef",
        HashedFieldRestorer::new(Field::new(
            |spec: &Spec| (spec.identity_ref.clone(), spec.cloud_name.clone()),
            |spec: &mut Spec, (identity_ref, cloud_name)| {
                spec.identity_ref = identity_ref;
                spec.cloud_name = cloud_name;
            },
        )),
    )?;
    restorers.register("floatingIP", UnconditionalFieldRestorer::new(field!(Spec, floating_ip)))?;
    restorers.register("subnet", UnconditionalFieldRestorer::new(field!(Spec, subnet)))?;
    restorers.register("instanceID", UnconditionalFieldRestorer::new(field!(Spec, instance_id)))?;
    Ok(restorers)
}

pub(crate) fn hub_cluster_spec(cluster: &hub::OpenStackCluster) -> &hub::OpenStackClusterSpec {
    &cluster.spec
}

pub(crate) fn hub_cluster_spec_mut(
    cluster: &mut hub::OpenStackCluster,
) -> &mut hub::OpenStackClusterSpec {
    &mut cluster.spec
}

fn hub_conditions(cluster: &hub::OpenStackCluster) -> Vec<hub::Condition> {
    cluster
        .status
        .as_ref()
        .map(|status| status.conditions.clone())
        .unwrap_or_default()
}

fn set_hub_conditions(cluster: &mut hub::OpenStackCluster, conditions: Vec<hub::Condition>) {
    if conditions.is_empty() && cluster.status.is_none() {
        return;
    }
    cluster.status.get_or_insert_with(Default::default).conditions = conditions;
}

fn hub_failure_domains(cluster: &hub::OpenStackCluster) -> Vec<hub::FailureDomain> {
    cluster
        .status
        .as_ref()
        .map(|status| status.failure_domains.clone())
        .unwrap_or_default()
}

fn set_hub_failure_domains(cluster: &mut hub::OpenStackCluster, domains: Vec<hub::FailureDomain>) {
    if domains.is_empty() && cluster.status.is_none() {
        return;
    }
    cluster.status.get_or_insert_with(Default::default).failure_domains = domains;
}

/// Failure domains round-trip through a map, so only the set of entries is
/// compared
fn sort_failure_domains(domains: &mut Vec<hub::FailureDomain>) {
    domains.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Status restorers shared by every legacy spoke: neither has cluster
/// conditions, and both keep failure domains in a map.
pub(crate) fn hub_cluster_status_restorers(
) -> Result<RestorerFor<hub::OpenStackCluster>, ConversionError> {
    let mut restorers = RestorerFor::new();
    restorers.register(
        "status.conditions",
        UnconditionalFieldRestorer::new(Field::new(hub_conditions, set_hub_conditions)),
    )?;
    restorers.register(
        "status.failureDomains",
        HashedFieldRestorer::new(Field::new(hub_failure_domains, set_hub_failure_domains))
            .with_filter(sort_failure_domains),
    )?;
    Ok(restorers)
}

pub(crate) fn hub_cluster_restorers(
) -> Result<RestorerFor<hub::OpenStackCluster>, ConversionError> {
    let mut restorers =
        hub_cluster_spec_restorers()?.lift("spec", hub_cluster_spec, hub_cluster_spec_mut);
    restorers.extend(hub_cluster_status_restorers()?)?;
    Ok(restorers)
}

fn cluster_spec(cluster: &OpenStackCluster) -> &OpenStackClusterSpec {
    &cluster.spec
}

fn cluster_spec_mut(cluster: &mut OpenStackCluster) -> &mut OpenStackClusterSpec {
    &mut cluster.spec
}

/// Control plane, worker and bastion groups
pub(crate) type SecurityGroups = (
    Option<SecurityGroup>,
    Option<SecurityGroup>,
    Option<SecurityGroup>,
);

fn security_groups(cluster: &OpenStackCluster) -> SecurityGroups {
    match &cluster.status {
        Some(status) => (
            status.control_plane_security_group.clone(),
            status.worker_security_group.clone(),
            status.bastion_security_group.clone(),
        ),
        None => (None, None, None),
    }
}

fn set_security_groups(
    cluster: &mut OpenStackCluster,
    (control_plane, worker, bastion): SecurityGroups,
) {
    if let Some(status) = cluster.status.as_mut() {
        status.control_plane_security_group = control_plane;
        status.worker_security_group = worker;
        status.bastion_security_group = bastion;
    }
}

fn copy_rules(previous: &Option<SecurityGroup>, dst: &mut Option<SecurityGroup>) {
    if let (Some(previous), Some(dst)) = (previous, dst.as_mut()) {
        if previous.id == dst.id {
            dst.rules.clone_from(&previous.rules);
        }
    }
}

/// Rules are only known for groups that still have the same ID
pub(crate) fn restore_security_group_rules(previous: &SecurityGroups, dst: &mut SecurityGroups) {
    copy_rules(&previous.0, &mut dst.0);
    copy_rules(&previous.1, &mut dst.1);
    copy_rules(&previous.2, &mut dst.2);
}

fn bastion_instance(cluster: &OpenStackCluster) -> Option<Instance> {
    cluster.status.as_ref().and_then(|status| status.bastion.clone())
}

fn set_bastion_instance(cluster: &mut OpenStackCluster, bastion: Option<Instance>) {
    if let Some(status) = cluster.status.as_mut() {
        status.bastion = bastion;
    }
}

pub(crate) fn cluster_restorers() -> Result<RestorerFor<OpenStackCluster>, ConversionError> {
    let mut restorers = cluster_spec_restorers()?.lift("spec", cluster_spec, cluster_spec_mut);
    restorers.register(
        "status.securityGroups",
        HashedFieldRestorer::new(Field::new(security_groups, set_security_groups))
            .with_restore(restore_security_group_rules),
    )?;
    restorers.register(
        "status.bastion",
        HashedFieldRestorer::new(Field::new(bastion_instance, set_bastion_instance)),
    )?;
    Ok(restorers)
}

pub(crate) fn hub_cluster_template_spec(
    template: &hub::OpenStackClusterTemplate,
) -> &hub::OpenStackClusterSpec {
    &template.spec.template.spec
}

pub(crate) fn hub_cluster_template_spec_mut(
    template: &mut hub::OpenStackClusterTemplate,
) -> &mut hub::OpenStackClusterSpec {
    &mut template.spec.template.spec
}

pub(crate) fn hub_cluster_template_restorers(
) -> Result<RestorerFor<hub::OpenStackClusterTemplate>, ConversionError> {
    Ok(hub_cluster_spec_restorers()?.lift(
        "spec.template.spec",
        hub_cluster_template_spec,
        hub_cluster_template_spec_mut,
    ))
}

fn cluster_template_spec(template: &OpenStackClusterTemplate) -> &OpenStackClusterSpec {
    &template.spec.template.spec
}

fn cluster_template_spec_mut(template: &mut OpenStackClusterTemplate) -> &mut OpenStackClusterSpec {
    &mut template.spec.template.spec
}

pub(crate) fn cluster_template_restorers(
) -> Result<RestorerFor<OpenStackClusterTemplate>, ConversionError> {
    Ok(cluster_spec_restorers()?.lift(
        "spec.template.spec",
        cluster_template_spec,
        cluster_template_spec_mut,
    ))
}

fn hub_machine_spec(machine: &hub::OpenStackMachine) -> &hub::OpenStackMachineSpec {
    &machine.spec
}

fn hub_machine_spec_mut(machine: &mut hub::OpenStackMachine) -> &mut hub::OpenStackMachineSpec {
    &mut machine.spec
}

/// Also used by v1alpha5, which loses the same machine fields
pub(crate) fn hub_machine_restorers(
) -> Result<RestorerFor<hub::OpenStackMachine>, ConversionError> {
    Ok(hub_machine_spec_restorers()?.lift("spec", hub_machine_spec, hub_machine_spec_mut))
}

fn machine_spec(machine: &OpenStackMachine) -> &OpenStackMachineSpec {
    &machine.spec
}

fn machine_spec_mut(machine: &mut OpenStackMachine) -> &mut OpenStackMachineSpec {
    &mut machine.spec
}

pub(crate) fn machine_restorers() -> Result<RestorerFor<OpenStackMachine>, ConversionError> {
    Ok(machine_spec_restorers()?.lift("spec", machine_spec, machine_spec_mut))
}

fn hub_machine_template_spec(
    template: &hub::OpenStackMachineTemplate,
) -> &hub::OpenStackMachineSpec {
    &template.spec.template.spec
}

fn hub_machine_template_spec_mut(
    template: &mut hub::OpenStackMachineTemplate,
) -> &mut hub::OpenStackMachineSpec {
    &mut template.spec.template.spec
}

pub(crate) fn hub_machine_template_restorers(
) -> Result<RestorerFor<hub::OpenStackMachineTemplate>, ConversionError> {
    Ok(hub_machine_spec_restorers()?.lift(
        "spec.template.spec",
        hub_machine_template_spec,
        hub_machine_template_spec_mut,
    ))
}

fn machine_template_spec(template: &OpenStackMachineTemplate) -> &OpenStackMachineSpec {
    &template.spec.template.spec
}

fn machine_template_spec_mut(template: &mut OpenStackMachineTemplate) -> &mut OpenStackMachineSpec {
    &mut template.spec.template.spec
}

pub(crate) fn machine_template_restorers(
) -> Result<RestorerFor<OpenStackMachineTemplate>, ConversionError> {
    Ok(machine_spec_restorers()?.lift(
        "spec.template.spec",
        machine_template_spec,
        machine_template_spec_mut,
    ))
}
