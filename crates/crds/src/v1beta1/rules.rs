//! Security group rules implied by older API versions
//!
//! Before v1beta1 a cluster with managed security groups and
//! `allowAllInClusterTraffic: false` always received the rules Calico needs
//! between nodes. Later versions make them explicit, so conversion has to
//! produce them.

use super::openstack_cluster::{ManagedSecurityGroupName, SecurityGroupRuleSpec};

const DESCRIPTION_PREFIX: &str = "Created by cluster-api-provider-openstack API conversion";

fn calico_rule(
    name: &str,
    protocol: &str,
    port: Option<i32>,
    remote_groups: &[ManagedSecurityGroupName],
) -> SecurityGroupRuleSpec {
    SecurityGroupRuleSpec {
        name: name.to_string(),
        description: Some(format!("{DESCRIPTION_PREFIX} - {name}")),
        direction: "ingress".to_string(),
        ether_type: Some("IPv4".to_string()),
        port_range_min: port,
        port_range_max: port,
        protocol: Some(protocol.to_string()),
        remote_group_id: None,
        remote_ip_prefix: None,
        remote_managed_groups: remote_groups.to_vec(),
    }
}

/// BGP (tcp/179) and IP-in-IP (protocol 4) ingress rules allowing traffic
/// from `remote_groups`
pub fn legacy_calico_rules(
    remote_groups: &[ManagedSecurityGroupName],
) -> Vec<SecurityGroupRuleSpec> {
    vec![
        calico_rule("BGP (calico)", "tcp", Some(179), remote_groups),
        calico_rule("IP-in-IP (calico)", "4", None, remote_groups),
    ]
}

/// Node-to-node rules for a legacy cluster with the given traffic policy
pub fn legacy_all_nodes_rules(allow_all_in_cluster_traffic: bool) -> Vec<SecurityGroupRuleSpec> {
    if allow_all_in_cluster_traffic {
        Vec::new()
    } else {
        legacy_calico_rules(&[
            ManagedSecurityGroupName::Controlplane,
            ManagedSecurityGroupName::Worker,
        ])
    }
}
