//! infrastructure.cluster.x-k8s.io/v1beta2
//!
//! Follows the Cluster API v1beta2 contract. Specs are unchanged from v1beta1;
//! readiness moves to `status.initialization`, conditions take the Kubernetes
//! condition shape, and the v1beta1 conditions and failure fields move under
//! `status.deprecated.v1beta1`. Served but not stored.

pub mod conversion;
pub mod openstack_cluster;
pub mod openstack_machine;
mod restore;
pub mod types;

pub use openstack_cluster::*;
pub use openstack_machine::*;
pub use types::*;
