//! Restorer registries for v1beta2 ↔ v1beta1
//!
//! The hub can hold everything v1beta2 can except the shape of a few status
//! fields, and templates carry nothing but a spec. Only the v1beta2 status
//! side needs restoring.

use conversion::{ConversionError, Field, HashedFieldRestorer, RestorerFor};

use super::openstack_cluster::OpenStackCluster;
use super::openstack_machine::OpenStackMachine;

pub(crate) fn hub_restorers<T: 'static>() -> RestorerFor<T> {
    RestorerFor::new()
}

pub(crate) fn template_restorers<T: 'static>() -> RestorerFor<T> {
    RestorerFor::new()
}

/// Registers `status.initialization`, `status.conditions` and
/// `status.deprecated` for a kind whose status has those three fields
macro_rules! status_restorers {
    ($ty:ty) => {{
        let mut restorers = RestorerFor::<$ty>::new();
        restorers.register(
            "status.initialization",
            HashedFieldRestorer::new(Field::new(
                |obj: &$ty| obj.status.as_ref().and_then(|status| status.initialization.clone()),
                |obj: &mut $ty, value| {
                    if let Some(status) = obj.status.as_mut() {
                        status.initialization = value;
                    }
                },
            )),
        )?;
        restorers.register(
            "status.conditions",
            HashedFieldRestorer::new(Field::new(
                |obj: &$ty| {
                    obj.status
                        .as_ref()
                        .map(|status| status.conditions.clone())
                        .unwrap_or_default()
                },
                |obj: &mut $ty, value| {
                    if let Some(status) = obj.status.as_mut() {
                        status.conditions = value;
                    }
                },
            )),
        )?;
        restorers.register(
            "status.deprecated",
            HashedFieldRestorer::new(Field::new(
                |obj: &$ty| obj.status.as_ref().and_then(|status| status.deprecated.clone()),
                |obj: &mut $ty, value| {
                    if let Some(status) = obj.status.as_mut() {
                        status.deprecated = value;
                    }
                },
            )),
        )?;
        restorers
    }};
}

pub(crate) fn cluster_restorers() -> Result<RestorerFor<OpenStackCluster>, ConversionError> {
    Ok(status_restorers!(OpenStackCluster))
}

pub(crate) fn machine_restorers() -> Result<RestorerFor<OpenStackMachine>, ConversionError> {
    Ok(status_restorers!(OpenStackMachine))
}
