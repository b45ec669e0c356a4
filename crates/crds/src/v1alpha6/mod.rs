//! infrastructure.cluster.x-k8s.io/v1alpha6
//!
//! Served but not stored. Converts to and from v1beta1 with full restoration.

pub mod conversion;
pub mod openstack_cluster;
pub mod openstack_machine;
pub mod types;

pub use openstack_cluster::*;
pub use openstack_machine::*;
pub use types::*;
