use std::collections::BTreeMap;

use conversion::{CONVERSION_DATA_ANNOTATION, read_restore_data};

use super::*;
use crate::v1alpha5::{
    APIServerLoadBalancer, FailureDomainSpec, Instance, LoadBalancer, NetworkFilter, NetworkParam,
    OpenStackIdentityReference, Router, SecurityGroup, Subnet, SubnetFilter, SubnetParam,
};

fn cluster() -> OpenStackCluster {
    let mut cluster = OpenStackCluster::new(
        "legacy",
        OpenStackClusterSpec {
            cloud_name: "openstack".to_string(),
            node_cidr: "10.6.0.0/24".to_string(),
            network: NetworkFilter {
                id: "net-1".to_string(),
                ..Default::default()
            },
            subnet: SubnetFilter {
                name: "nodes".to_string(),
                tags: "k8s,capi".to_string(),
                ..Default::default()
            },
            dns_nameservers: vec!["8.8.8.8".to_string()],
            external_network_id: "ext-net".to_string(),
            api_server_load_balancer: APIServerLoadBalancer {
                enabled: true,
                ..Default::default()
            },
            api_server_port: 6443,
            managed_security_groups: true,
            tags: vec!["legacy".to_string()],
            bastion: Some(Bastion {
                enabled: true,
                instance: OpenStackMachineSpec {
                    flavor: "m1.small".to_string(),
                    image: "ubuntu".to_string(),
                    ssh_key_name: "admin".to_string(),
                    ..Default::default()
                },
                availability_zone: "az-1".to_string(),
            }),
            identity_ref: Some(OpenStackIdentityReference {
                kind: "Secret".to_string(),
                name: "cloud-config".to_string(),
            }),
            ..Default::default()
        },
    );
    cluster.status = Some(OpenStackClusterStatus {
        ready: true,
        network: Some(Network {
            name: "k8s-clusterapi-cluster-default-legacy".to_string(),
            id: "net-1".to_string(),
            subnet: Some(Subnet {
                name: "nodes".to_string(),
                id: "subnet-1".to_string(),
                cidr: "10.6.0.0/24".to_string(),
                tags: Vec::new(),
            }),
            router: Some(Router {
                name: "router".to_string(),
                id: "router-1".to_string(),
                ..Default::default()
            }),
            api_server_load_balancer: Some(LoadBalancer {
                name: "lb".to_string(),
                id: "lb-1".to_string(),
                ip: "10.6.0.10".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        failure_domains: BTreeMap::from([("az-1".to_string(), FailureDomainSpec::default())]),
        worker_security_group: Some(SecurityGroup {
            name: "worker".to_string(),
            id: "sg-worker".to_string(),
            rules: Vec::new(),
        }),
        bastion: Some(Instance {
            id: "bastion-1".to_string(),
            name: "bastion".to_string(),
            state: "ACTIVE".to_string(),
            ..Default::default()
        }),
        ..Default::default()
    });
    cluster
}

fn machine() -> OpenStackMachine {
    OpenStackMachine::new(
        "legacy-machine",
        OpenStackMachineSpec {
            cloud_name: "openstack".to_string(),
            flavor: "m1.large".to_string(),
            image_uuid: "image-uuid".to_string(),
            networks: vec![NetworkParam {
                uuid: "net-1".to_string(),
                subnets: vec![SubnetParam {
                    uuid: "subnet-1".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        },
    )
}

fn hub_cluster() -> hub::OpenStackCluster {
    let mut cluster = hub::OpenStackCluster::new(
        "hub",
        hub::OpenStackClusterSpec {
            managed_subnets: vec![hub::SubnetSpec {
                cidr: "10.6.0.0/24".to_string(),
                dns_nameservers: vec!["8.8.8.8".to_string()],
                allocation_pools: vec![hub::AllocationPool {
                    start: "10.6.0.10".to_string(),
                    end: "10.6.0.100".to_string(),
                }],
            }],
            router: Some(hub::RouterParam {
                id: Some("router-1".to_string()),
                filter: None,
            }),
            network_mtu: Some(1500),
            network: Some(hub::NetworkParam {
                id: Some("net-1".to_string()),
                filter: None,
            }),
            subnets: vec![
                hub::SubnetParam {
                    id: Some("subnet-1".to_string()),
                    filter: None,
                },
                hub::SubnetParam {
                    id: Some("subnet-2".to_string()),
                    filter: None,
                },
            ],
            disable_external_network: Some(true),
            identity_ref: Some(hub::OpenStackIdentityReference {
                name: "cloud-config".to_string(),
                cloud_name: "openstack".to_string(),
            }),
            ..Default::default()
        },
    );
    cluster.status = Some(hub::OpenStackClusterStatus {
        ready: true,
        network: Some(hub::NetworkStatusWithSubnets {
            network: hub::NetworkStatus {
                name: "cluster-net".to_string(),
                id: "net-1".to_string(),
                tags: Vec::new(),
            },
            subnets: vec![
                hub::Subnet {
                    name: "nodes".to_string(),
                    id: "subnet-1".to_string(),
                    cidr: "10.6.0.0/24".to_string(),
                    tags: Vec::new(),
                },
                hub::Subnet {
                    name: "storage".to_string(),
                    id: "subnet-2".to_string(),
                    cidr: "10.7.0.0/24".to_string(),
                    tags: Vec::new(),
                },
            ],
        }),
        router: Some(hub::Router {
            name: "router".to_string(),
            id: "router-1".to_string(),
            ..Default::default()
        }),
        api_server_load_balancer: Some(hub::LoadBalancer {
            name: "lb".to_string(),
            id: "lb-1".to_string(),
            ip: "10.6.0.10".to_string(),
            ..Default::default()
        }),
        conditions: vec![hub::Condition {
            type_: "Ready".to_string(),
            status: "True".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    });
    cluster
}

fn hub_machine() -> hub::OpenStackMachine {
    hub::OpenStackMachine::new(
        "hub-machine",
        hub::OpenStackMachineSpec {
            flavor: Some("m1.large".to_string()),
            image: hub::ImageParam {
                id: Some("image-uuid".to_string()),
                filter: None,
            },
            ports: vec![
                hub::PortOpts {
                    network: Some(hub::NetworkParam {
                        id: Some("net-1".to_string()),
                        filter: None,
                    }),
                    ..Default::default()
                },
                hub::PortOpts {
                    description: Some("storage".to_string()),
                    vnic_type: Some("direct".to_string()),
                    ..Default::default()
                },
            ],
            identity_ref: Some(hub::OpenStackIdentityReference {
                name: "cloud-config".to_string(),
                cloud_name: "openstack".to_string(),
            }),
            ..Default::default()
        },
    )
}

#[test]
fn test_cluster_round_trip_keeps_expressible_fields() {
    let src = cluster();

    let hub = src.convert_to().unwrap();
    let back = OpenStackCluster::convert_from(&hub).unwrap();

    assert_eq!(back.spec, src.spec);
    assert_eq!(back.status, src.status);
}

#[test]
fn test_managed_security_groups_get_legacy_rules() {
    let hub = cluster().convert_to().unwrap();

    let groups = hub.spec.managed_security_groups.unwrap();
    assert_eq!(groups.all_nodes_security_group_rules.len(), 2, "Expected BGP and IP-in-IP rules");
    assert!(!groups.allow_all_in_cluster_traffic);
}

#[test]
fn test_status_network_splits_into_hub_fields() {
    let hub = cluster().convert_to().unwrap();
    let status = hub.status.unwrap();

    let network = status.network.unwrap();
    assert_eq!(network.network.id, "net-1");
    assert_eq!(network.subnets.len(), 1);
    assert_eq!(status.router.map(|router| router.id), Some("router-1".to_string()));
    assert_eq!(status.api_server_load_balancer.map(|lb| lb.id), Some("lb-1".to_string()));
}

#[test]
fn test_condition_severity_is_lost() {
    let mut hub = machine().convert_to().unwrap();
    hub.status = Some(hub::OpenStackMachineStatus {
        ready: true,
        conditions: vec![hub::Condition {
            type_: "InstanceReady".to_string(),
            status: "False".to_string(),
            severity: Some(hub::ConditionSeverity::Error),
            reason: "InstanceCreateFailed".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    });

    let legacy = OpenStackMachine::convert_from(&hub).unwrap();
    let status = legacy.status.as_ref().unwrap();
    assert_eq!(status.conditions[0].reason, "InstanceCreateFailed");

    let again = legacy.convert_to().unwrap();
    assert_eq!(again.status.unwrap().conditions[0].severity, None);
}

#[test]
fn test_machine_networks_become_ports() {
    let hub = machine().convert_to().unwrap();

    assert_eq!(hub.spec.ports.len(), 1);
    assert_eq!(hub.spec.image.id.as_deref(), Some("image-uuid"));
    assert_eq!(
        hub.spec.identity_ref,
        Some(hub::OpenStackIdentityReference {
            name: String::new(),
            cloud_name: "openstack".to_string(),
        })
    );
}

#[test]
fn test_machine_template_conversion() {
    let src = OpenStackMachineTemplate::new(
        "workers",
        OpenStackMachineTemplateSpec {
            template: OpenStackMachineTemplateResource { spec: machine().spec },
        },
    );

    let hub = src.convert_to().unwrap();

    assert_eq!(hub.metadata.name.as_deref(), Some("workers"));
    assert_eq!(hub.spec.template.spec.flavor.as_deref(), Some("m1.large"));
}

#[test]
fn test_list_conversion_from_hub() {
    let hubs = vec![cluster().convert_to().unwrap(), cluster().convert_to().unwrap()];

    let legacy = OpenStackCluster::convert_list_from(&hubs).unwrap();

    assert_eq!(legacy.len(), 2);
    assert_eq!(legacy[0].spec, cluster().spec);
}

#[test]
fn test_hub_cluster_round_trip() {
    let src = hub_cluster();

    let legacy = OpenStackCluster::convert_from(&src).unwrap();
    assert_eq!(legacy.spec.subnet.id, "subnet-1", "v1alpha5 holds a single subnet");
    let back = legacy.convert_to().unwrap();

    assert_eq!(back.spec, src.spec, "Router, MTU and extra subnets must be restored");
    assert_eq!(back.status, src.status, "Extra status subnets must be restored");
}

#[test]
fn test_hub_machine_round_trip() {
    let src = hub_machine();

    let legacy = OpenStackMachine::convert_from(&src).unwrap();
    assert!(legacy.spec.networks.is_empty(), "v1alpha5 cannot express ports");
    let back = legacy.convert_to().unwrap();

    assert_eq!(back.spec, src.spec);
}

#[test]
fn test_legacy_machine_round_trip_restores_networks() {
    let src = machine();

    let hub = src.convert_to().unwrap();
    let back = OpenStackMachine::convert_from(&hub).unwrap();

    assert_eq!(back.spec, src.spec);
}

#[test]
fn test_edited_legacy_subnet_keeps_extra_hub_subnets() {
    let mut legacy = OpenStackCluster::convert_from(&hub_cluster()).unwrap();

    legacy.spec.subnet = SubnetFilter {
        id: "subnet-3".to_string(),
        ..Default::default()
    };
    let back = legacy.convert_to().unwrap();

    let ids: Vec<_> = back.spec.subnets.iter().filter_map(|subnet| subnet.id.as_deref()).collect();
    assert_eq!(ids, vec!["subnet-3", "subnet-2"]);
}

#[test]
fn test_snapshot_of_another_version_is_ignored() {
    let mut src = cluster();
    src.metadata.annotations = Some(BTreeMap::from([
        (
            CONVERSION_DATA_ANNOTATION.to_string(),
            serde_json::json!({
                "object": {
                    "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha6",
                    "kind": "OpenStackCluster",
                    "spec": {"networkMTU": 1400},
                },
            })
            .to_string(),
        ),
        ("team".to_string(), "platform".to_string()),
    ]));

    let hub = src.convert_to().unwrap();

    assert_eq!(hub.spec.network_mtu, None);
    let annotations = hub.metadata.annotations.clone().unwrap_or_default();
    assert_eq!(annotations.get("team").map(String::as_str), Some("platform"));
    let snapshot = read_restore_data::<OpenStackCluster, _>(&hub).unwrap().unwrap();
    assert_eq!(snapshot.object.spec, src.spec, "The snapshot is replaced with the v1alpha5 source");
}

#[test]
fn test_hub_only_mtu_survives_legacy_round_trip() {
    let mut hub = cluster().convert_to().unwrap();
    hub.spec.network_mtu = Some(9000);

    let legacy = OpenStackCluster::convert_from(&hub).unwrap();
    let again = legacy.convert_to().unwrap();

    assert_eq!(again.spec.network_mtu, Some(9000));
}
