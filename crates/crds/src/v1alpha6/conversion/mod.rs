//! v1alpha6 ↔ v1beta1 conversion
//!
//! Both directions go through [`convert_and_restore`] so that fields either
//! side cannot express survive a round trip through the other.

mod cluster;
mod filters;
mod machine;
pub(crate) mod restore;

use conversion::{ConversionError, Convertible, convert_and_restore};

use super::{OpenStackCluster, OpenStackClusterTemplate, OpenStackMachine, OpenStackMachineTemplate};
use crate::v1beta1 as hub;

pub(crate) use cluster::{
    cluster_spec_down, cluster_spec_up, cluster_status_down, cluster_status_up,
};
pub(crate) use machine::{machine_spec_down, machine_spec_up};

impl Convertible<hub::OpenStackCluster> for OpenStackCluster {
    fn convert_to(&self) -> Result<hub::OpenStackCluster, ConversionError> {
        convert_and_restore(
            self,
            cluster::cluster_up,
            cluster::cluster_down,
            &restore::cluster_restorers()?,
            &restore::hub_cluster_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackCluster) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            cluster::cluster_down,
            cluster::cluster_up,
            &restore::hub_cluster_restorers()?,
            &restore::cluster_restorers()?,
        )
    }
}

impl Convertible<hub::OpenStackClusterTemplate> for OpenStackClusterTemplate {
    fn convert_to(&self) -> Result<hub::OpenStackClusterTemplate, ConversionError> {
        convert_and_restore(
            self,
            cluster::cluster_template_up,
            cluster::cluster_template_down,
            &restore::cluster_template_restorers()?,
            &restore::hub_cluster_template_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackClusterTemplate) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            cluster::cluster_template_down,
            cluster::cluster_template_up,
            &restore::hub_cluster_template_restorers()?,
            &restore::cluster_template_restorers()?,
        )
    }
}

impl Convertible<hub::OpenStackMachine> for OpenStackMachine {
    fn convert_to(&self) -> Result<hub::OpenStackMachine, ConversionError> {
        convert_and_restore(
            self,
            machine::machine_up,
            machine::machine_down,
            &restore::machine_restorers()?,
            &restore::hub_machine_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackMachine) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            machine::machine_down,
            machine::machine_up,
            &restore::hub_machine_restorers()?,
            &restore::machine_restorers()?,
        )
    }
}

impl Convertible<hub::OpenStackMachineTemplate> for OpenStackMachineTemplate {
    fn convert_to(&self) -> Result<hub::OpenStackMachineTemplate, ConversionError> {
        convert_and_restore(
            self,
            machine::machine_template_up,
            machine::machine_template_down,
            &restore::machine_template_restorers()?,
            &restore::hub_machine_template_restorers()?,
        )
    }

    fn convert_from(src: &hub::OpenStackMachineTemplate) -> Result<Self, ConversionError> {
        convert_and_restore(
            src,
            machine::machine_template_down,
            machine::machine_template_up,
            &restore::hub_machine_template_restorers()?,
            &restore::machine_template_restorers()?,
        )
    }
}

#[cfg(test)]
#[path = "conversion_test.rs"]
mod tests;
