//! infrastructure.cluster.x-k8s.io/v1beta1
//!
//! The hub version: every other served version converts through these types,
//! and they are what the API server stores.

pub mod filters;
pub mod openstack_cluster;
pub mod openstack_machine;
pub mod rules;
pub mod types;

pub use filters::*;
pub use openstack_cluster::*;
pub use openstack_machine::*;
pub use rules::{legacy_all_nodes_rules, legacy_calico_rules};
pub use types::*;

use conversion::Hub;

impl Hub for OpenStackCluster {}
impl Hub for OpenStackClusterTemplate {}
impl Hub for OpenStackMachine {}
impl Hub for OpenStackMachineTemplate {}
