//! Cluster API OpenStack Provider CRDs
//!
//! API types for `infrastructure.cluster.x-k8s.io` and the conversions between
//! the served versions:
//!
//! - [`v1beta1`]: hub and storage version
//! - [`v1beta2`]: Cluster API v1beta2 status contract, same specs as the hub
//! - [`v1alpha6`]: legacy filters and references
//! - [`v1alpha5`]: deprecated; condition severity does not survive it
//!
//! Every spoke converts to and from the hub with restoration from the
//! conversion-data annotation.
//!
//! [`scheme::convert`] converts an untyped object to any served version and is
//! what the conversion webhook calls. [`crd::all_crds`] builds the
//! multi-version CRDs.

pub mod crd;
pub mod scheme;
pub mod v1alpha5;
pub mod v1alpha6;
pub mod v1beta1;
pub mod v1beta2;

pub use crd::{WebhookService, all_crds};
pub use scheme::{GROUP, Version, convert};
