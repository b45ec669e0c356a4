//! Restorer registries for v1alpha5 ↔ v1beta1
//!
//! The hub side reuses the v1alpha6 registries where v1alpha5 loses the same
//! fields, and adds the fields v1alpha5 has no room for at all: the network
//! MTU and the cluster network status beyond its first subnet.

use conversion::{
    ConversionError, Field, HashedFieldRestorer, RestorerFor, UnconditionalFieldRestorer, field,
};

use super::openstack_cluster::{OpenStackCluster, OpenStackClusterSpec, OpenStackClusterTemplate};
use super::openstack_machine::{OpenStackMachine, OpenStackMachineSpec, OpenStackMachineTemplate};
use super::types::{Instance, Network};
use crate::v1alpha6::conversion::restore::{
    self as alpha6_restore, SecurityGroups, restore_security_group_rules,
};
use crate::v1beta1 as hub;

pub(crate) use alpha6_restore::{hub_machine_restorers, hub_machine_template_restorers};

fn hub_cluster_spec_restorers(
) -> Result<RestorerFor<hub::OpenStackClusterSpec>, ConversionError> {
    let mut restorers = alpha6_restore::hub_cluster_spec_common_restorers()?;
    restorers.register(
        "networkMTU",
        UnconditionalFieldRestorer::new(field!(hub::OpenStackClusterSpec, network_mtu)),
    )?;
    Ok(restorers)
}

/// Cluster network, router and API server load balancer
type HubNetworkStatus = (
    Option<hub::NetworkStatusWithSubnets>,
    Option<hub::Router>,
    Option<hub::LoadBalancer>,
);

fn hub_network_status(cluster: &hub::OpenStackCluster) -> HubNetworkStatus {
    match &cluster.status {
        Some(status) => (
            status.network.clone(),
            status.router.clone(),
            status.api_server_load_balancer.clone(),
        ),
        None => (None, None, None),
    }
}

fn set_hub_network_status(
    cluster: &mut hub::OpenStackCluster,
    (network, router, api_server_load_balancer): HubNetworkStatus,
) {
    if let Some(status) = cluster.status.as_mut() {
        status.network = network;
        status.router = router;
        status.api_server_load_balancer = api_server_load_balancer;
    }
}

pub(crate) fn hub_cluster_restorers(
) -> Result<RestorerFor<hub::OpenStackCluster>, ConversionError> {
    let mut restorers = hub_cluster_spec_restorers()?.lift(
        "spec",
        alpha6_restore::hub_cluster_spec,
        alpha6_restore::hub_cluster_spec_mut,
    );
    restorers.extend(alpha6_restore::hub_cluster_status_restorers()?)?;
    restorers.register(
        "status.network",
        HashedFieldRestorer::new(Field::new(hub_network_status, set_hub_network_status)),
    )?;
    Ok(restorers)
}

pub(crate) fn hub_cluster_template_restorers(
) -> Result<RestorerFor<hub::OpenStackClusterTemplate>, ConversionError> {
    Ok(hub_cluster_spec_restorers()?.lift(
        "spec.template.spec",
        alpha6_restore::hub_cluster_template_spec,
        alpha6_restore::hub_cluster_template_spec_mut,
    ))
}

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

fn cluster_spec(cluster: &OpenStackCluster) -> &OpenStackClusterSpec {
    &cluster.spec
}

fn cluster_spec_mut(cluster: &mut OpenStackCluster) -> &mut OpenStackClusterSpec {
    &mut cluster.spec
}

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

fn bastion_instance(cluster: &OpenStackCluster) -> Option<Instance> {
    cluster.status.as_ref().and_then(|status| status.bastion.clone())
}

fn set_bastion_instance(cluster: &mut OpenStackCluster, bastion: Option<Instance>) {
    if let Some(status) = cluster.status.as_mut() {
        status.bastion = bastion;
    }
}

/// The hub keeps no subnet, router or load balancer for the external network
fn external_network(cluster: &OpenStackCluster) -> Option<Network> {
    cluster
        .status
        .as_ref()
        .and_then(|status| status.external_network.clone())
}

fn set_external_network(cluster: &mut OpenStackCluster, network: Option<Network>) {
    if let Some(status) = cluster.status.as_mut() {
        status.external_network = network;
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
    restorers.register(
        "status.externalNetwork",
        HashedFieldRestorer::new(Field::new(external_network, set_external_network)),
    )?;
    Ok(restorers)
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

/// Networks come back from the hub as ports, which this version drops
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
    restorers.register("networks", HashedFieldRestorer::new(field!(Spec, networks)))?;
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

fn machine_spec(machine: &OpenStackMachine) -> &OpenStackMachineSpec {
    &machine.spec
}

fn machine_spec_mut(machine: &mut OpenStackMachine) -> &mut OpenStackMachineSpec {
    &mut machine.spec
}

pub(crate) fn machine_restorers() -> Result<RestorerFor<OpenStackMachine>, ConversionError> {
    Ok(machine_spec_restorers()?.lift("spec", machine_spec, machine_spec_mut))
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
