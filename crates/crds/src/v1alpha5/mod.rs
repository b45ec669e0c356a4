//! infrastructure.cluster.x-k8s.io/v1alpha5
//!
//! Deprecated. Served for existing clients only. Converts to and from v1beta1
//! with restoration; only condition severity is lost.

pub mod conversion;
pub mod openstack_cluster;
pub mod openstack_machine;
mod restore;
pub mod types;

pub use openstack_cluster::*;
pub use openstack_machine::*;
pub use types::*;
