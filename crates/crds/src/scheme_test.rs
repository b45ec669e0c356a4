use serde_json::json;

use super::*;

/// The object as it serializes after decoding, with defaults filled in
fn normalized<T: Serialize + DeserializeOwned>(object: Value) -> Value {
    let typed: T = serde_json::from_value(object).unwrap();
    serde_json::to_value(typed).unwrap()
}

fn legacy_cluster() -> Value {
    json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha6",
        "kind": "OpenStackCluster",
        "metadata": {
            "name": "cluster-1",
            "namespace": "default",
            "labels": {"cluster.x-k8s.io/cluster-name": "cluster-1"}
        },
        "spec": {
            "cloudName": "openstack",
            "nodeCidr": "10.6.0.0/24",
            "network": {"name": "private", "tags": "k8s,,capi"},
            "externalNetworkId": "ext-net",
            "managedSecurityGroups": true,
            "allowAllInClusterTraffic": false,
            "apiServerPort": 6443,
            "identityRef": {"kind": "Secret", "name": "cloud-config"}
        }
    })
}

fn hub_machine() -> Value {
    json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
        "kind": "OpenStackMachine",
        "metadata": {"name": "machine-1", "namespace": "default"},
        "spec": {
            "flavorID": "flavor-uuid",
            "image": {"filter": {"name": "ubuntu", "tags": ["capi"]}},
            "ports": [
                {"network": {"id": "net-1"}, "fixedIPs": [{"ipAddress": "10.0.0.5"}]},
                {
                    "network": {"filter": {"name": "storage", "notTagsAny": ["legacy"]}},
                    "vnicType": "direct"
                }
            ],
            "serverMetadata": [
                {"key": "z", "value": "1"},
                {"key": "a", "value": "2"}
            ],
            "identityRef": {"name": "cloud-config", "cloudName": "openstack"}
        }
    })
}

#[test]
fn test_version_parse() {
    assert_eq!(
        "infrastructure.cluster.x-k8s.io/v1beta1".parse::<Version>().unwrap(),
        Version::V1beta1
    );
    assert_eq!(Version::V1alpha6.api_version(), "infrastructure.cluster.x-k8s.io/v1alpha6");
    assert_eq!(
        "infrastructure.cluster.x-k8s.io/v1beta2".parse::<Version>().unwrap(),
        Version::V1beta2
    );
    assert!(matches!(
        "cluster.x-k8s.io/v1beta1".parse::<Version>(),
        Err(ConversionError::UnsupportedVersion(_))
    ));
    assert!(matches!(
        "infrastructure.cluster.x-k8s.io/v1alpha4".parse::<Version>(),
        Err(ConversionError::UnsupportedVersion(_))
    ));
}

#[test]
fn test_same_version_is_returned_unchanged() {
    let object = legacy_cluster();

    let converted = convert(object.clone(), "infrastructure.cluster.x-k8s.io/v1alpha6").unwrap();

    assert_eq!(converted, object);
}

#[test]
fn test_convert_legacy_cluster_to_hub() {
    let converted = convert(legacy_cluster(), "infrastructure.cluster.x-k8s.io/v1beta1").unwrap();

    assert_eq!(converted["apiVersion"], "infrastructure.cluster.x-k8s.io/v1beta1");
    assert_eq!(converted["kind"], "OpenStackCluster");
    assert_eq!(converted["metadata"]["labels"]["cluster.x-k8s.io/cluster-name"], "cluster-1");
    assert_eq!(converted["spec"]["network"]["filter"]["tags"], json!(["k8s", "capi"]));
    assert_eq!(converted["spec"]["externalNetwork"]["id"], "ext-net");
    assert_eq!(converted["spec"]["managedSubnets"][0]["cidr"], "10.6.0.0/24");
    assert_eq!(
        converted["spec"]["managedSecurityGroups"]["allNodesSecurityGroupRules"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );
    assert_eq!(
        converted["spec"]["identityRef"],
        json!({"name": "cloud-config", "cloudName": "openstack"})
    );
    assert!(
        converted["metadata"]["annotations"]
            .get(conversion::CONVERSION_DATA_ANNOTATION)
            .is_some(),
        "Expected a conversion-data snapshot on the hub object"
    );
}

#[test]
fn test_legacy_round_trip_restores_lossy_tags() {
    let hub = convert(legacy_cluster(), "infrastructure.cluster.x-k8s.io/v1beta1").unwrap();

    let back = convert(hub, "infrastructure.cluster.x-k8s.io/v1alpha6").unwrap();

    let expected = normalized::<v1alpha6::OpenStackCluster>(legacy_cluster());
    assert_eq!(back["spec"], expected["spec"]);
    assert_eq!(back["spec"]["network"]["tags"], "k8s,,capi", "Lossy tag string must be restored");
}

#[test]
fn test_hub_machine_round_trip_through_v1alpha6() {
    let legacy = convert(hub_machine(), "infrastructure.cluster.x-k8s.io/v1alpha6").unwrap();
    assert_eq!(legacy["apiVersion"], "infrastructure.cluster.x-k8s.io/v1alpha6");
    assert_eq!(legacy["spec"]["image"], "ubuntu");

    let back = convert(legacy, "infrastructure.cluster.x-k8s.io/v1beta1").unwrap();

    let expected = normalized::<v1beta1::OpenStackMachine>(hub_machine());
    assert_eq!(back["spec"], expected["spec"]);
}

#[test]
fn test_hub_machine_round_trip_through_v1beta2() {
    let newer = convert(hub_machine(), "infrastructure.cluster.x-k8s.io/v1beta2").unwrap();
    assert_eq!(newer["apiVersion"], "infrastructure.cluster.x-k8s.io/v1beta2");
    assert_eq!(newer["spec"]["ports"][1]["vnicType"], "direct");

    let back = convert(newer, "infrastructure.cluster.x-k8s.io/v1beta1").unwrap();

    let expected = normalized::<v1beta1::OpenStackMachine>(hub_machine());
    assert_eq!(back["spec"], expected["spec"]);
}

#[test]
fn test_legacy_cluster_converts_to_v1beta2() {
    let converted = convert(legacy_cluster(), "infrastructure.cluster.x-k8s.io/v1beta2").unwrap();

    assert_eq!(converted["apiVersion"], "infrastructure.cluster.x-k8s.io/v1beta2");
    assert_eq!(converted["kind"], "OpenStackCluster");
    assert_eq!(converted["spec"]["externalNetwork"]["id"], "ext-net");
}

#[test]
fn test_spoke_to_spoke_goes_through_hub() {
    let legacy = json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha5",
        "kind": "OpenStackMachine",
        "metadata": {"name": "machine-1"},
        "spec": {
            "flavor": "m1.large",
            "networks": [{"uuid": "net-1"}]
        }
    });

    let converted = convert(legacy, "infrastructure.cluster.x-k8s.io/v1alpha6").unwrap();

    assert_eq!(converted["apiVersion"], "infrastructure.cluster.x-k8s.io/v1alpha6");
    assert_eq!(converted["spec"]["flavor"], "m1.large");
    assert_eq!(converted["spec"]["ports"][0]["network"]["id"], "net-1");
}

#[test]
fn test_list_items_are_converted_in_order() {
    let list = json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
        "kind": "OpenStackMachineList",
        "metadata": {},
        "items": [
            {
                "metadata": {"name": "first"},
                "spec": {"flavor": "m1.small", "image": {"id": "image-1"}}
            },
            {
                "metadata": {"name": "second"},
                "spec": {"flavor": "m1.large", "image": {"id": "image-1"}}
            }
        ]
    });

    let converted = convert(list, "infrastructure.cluster.x-k8s.io/v1alpha6").unwrap();

    assert_eq!(converted["apiVersion"], "infrastructure.cluster.x-k8s.io/v1alpha6");
    assert_eq!(converted["items"][0]["metadata"]["name"], "first");
    assert_eq!(converted["items"][1]["spec"]["flavor"], "m1.large");
    assert_eq!(converted["items"][1]["kind"], "OpenStackMachine");
}

#[test]
fn test_unsupported_kind() {
    let object = json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha6",
        "kind": "OpenStackFloatingIPPool",
        "metadata": {"name": "pool"},
        "spec": {}
    });

    let err = convert(object, "infrastructure.cluster.x-k8s.io/v1beta1").unwrap_err();

    assert!(matches!(
        err,
        ConversionError::UnsupportedKind(kind) if kind == "OpenStackFloatingIPPool"
    ));
}

#[test]
fn test_missing_api_version_is_invalid() {
    let object = json!({"kind": "OpenStackCluster", "spec": {}});

    let err = convert(object, "infrastructure.cluster.x-k8s.io/v1beta1").unwrap_err();

    assert!(matches!(err, ConversionError::InvalidObject(_)), "got {err:?}");
}

#[test]
fn test_unsupported_desired_version() {
    let err = convert(legacy_cluster(), "infrastructure.cluster.x-k8s.io/v1beta3").unwrap_err();

    assert!(matches!(err, ConversionError::UnsupportedVersion(_)));
}
