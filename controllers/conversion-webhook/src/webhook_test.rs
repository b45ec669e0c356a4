//! Tests for the ConversionReview handler

use serde_json::{Value, json};

use kube::core::conversion::{ConversionRequest, ConversionReview};

use super::{convert_request, object_context, result_label};
use crate::metrics::Metrics;

fn legacy_machine(name: &str) -> Value {
    json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha6",
        "kind": "OpenStackMachine",
        "metadata": {"name": name, "namespace": "default"},
        "spec": {
            "flavor": "m1.large",
            "image": "ubuntu",
            "networks": [{"uuid": "net-1"}]
        }
    })
}

fn request(objects: Vec<Value>, desired_api_version: &str) -> ConversionRequest {
    ConversionRequest {
        types: None,
        uid: "review-uid-1".to_string(),
        desired_api_version: desired_api_version.to_string(),
        objects,
    }
}

#[test]
fn test_convert_v1alpha6_machine_to_hub() {
    let metrics = Metrics::new().unwrap();

    let response = convert_request(
        request(vec![legacy_machine("machine-1")], "infrastructure.cluster.x-k8s.io/v1beta1"),
        &metrics,
    );

    assert!(response.result.is_success());
    assert_eq!(response.result.message, "");
    assert_eq!(response.uid, "review-uid-1");
    assert_eq!(response.converted_objects.len(), 1);

    let converted = &response.converted_objects[0];
    assert_eq!(converted["apiVersion"], "infrastructure.cluster.x-k8s.io/v1beta1");
    assert_eq!(converted["spec"]["flavor"], "m1.large");
    assert_eq!(converted["spec"]["image"]["filter"]["name"], "ubuntu");
    assert_eq!(converted["spec"]["ports"][0]["network"]["id"], "net-1");
}

#[test]
fn test_objects_keep_request_order() {
    let metrics = Metrics::new().unwrap();

    let response = convert_request(
        request(
            vec![legacy_machine("first"), legacy_machine("second"), legacy_machine("third")],
            "infrastructure.cluster.x-k8s.io/v1beta1",
        ),
        &metrics,
    );

    let names: Vec<_> = response
        .converted_objects
        .iter()
        .map(|object| object["metadata"]["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("first"), json!("second"), json!("third")]);
}

#[test]
fn test_failure_returns_no_partial_objects() {
    let metrics = Metrics::new().unwrap();
    let unknown = json!({
        "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha6",
        "kind": "OpenStackFloatingIPPool",
        "metadata": {"name": "pool", "namespace": "default"},
        "spec": {}
    });

    let response = convert_request(
        request(vec![legacy_machine("ok"), unknown], "infrastructure.cluster.x-k8s.io/v1beta1"),
        &metrics,
    );

    assert!(response.result.is_failure());
    assert_eq!(response.result.reason, "ConversionFailed");
    assert_eq!(response.uid, "review-uid-1");
    assert!(response.converted_objects.is_empty());
    let message = response.result.message;
    assert!(message.contains("OpenStackFloatingIPPool"), "{message}");
    assert!(message.contains("default/pool"), "{message}");
}

#[test]
fn test_unsupported_desired_version_fails() {
    let metrics = Metrics::new().unwrap();

    let response = convert_request(
        request(vec![legacy_machine("machine-1")], "infrastructure.cluster.x-k8s.io/v1alpha4"),
        &metrics,
    );

    assert!(response.result.is_failure());
    assert_eq!(result_label(&response.result), "Failure");
    assert!(response.converted_objects.is_empty());
}

#[test]
fn test_empty_request_succeeds() {
    let metrics = Metrics::new().unwrap();

    let response =
        convert_request(request(Vec::new(), "infrastructure.cluster.x-k8s.io/v1beta1"), &metrics);

    assert_eq!(result_label(&response.result), "Success");
    assert!(response.converted_objects.is_empty());
}

#[test]
fn test_converted_objects_are_counted_by_kind() {
    let metrics = Metrics::new().unwrap();

    convert_request(
        request(
            vec![legacy_machine("a"), legacy_machine("b")],
            "infrastructure.cluster.x-k8s.io/v1beta1",
        ),
        &metrics,
    );

    let text = metrics.encode().unwrap();
    assert!(text.contains("capo_converted_objects_total{kind=\"OpenStackMachine\"} 2"), "{text}");
}

#[test]
fn test_object_context() {
    assert_eq!(object_context(&legacy_machine("m")), " (default/m)");
    assert_eq!(object_context(&json!({"metadata": {"name": "m"}})), " (m)");
    assert_eq!(object_context(&json!({})), "");
}

#[test]
fn test_review_deserializes_from_api_server_json() {
    let review: ConversionReview = serde_json::from_value(json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "ConversionReview",
        "request": {
            "uid": "abc",
            "desiredAPIVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
            "objects": []
        }
    }))
    .unwrap();

    let request = ConversionRequest::from_review(review).unwrap();
    assert_eq!(request.uid, "abc");
    assert_eq!(request.desired_api_version, "infrastructure.cluster.x-k8s.io/v1beta1");
}

#[test]
fn test_response_review_matches_api_server_shape() {
    let metrics = Metrics::new().unwrap();

    let response = convert_request(
        request(vec![legacy_machine("machine-1")], "infrastructure.cluster.x-k8s.io/v1beta1"),
        &metrics,
    );
    let review = serde_json::to_value(response.into_review()).unwrap();

    assert_eq!(review["apiVersion"], "apiextensions.k8s.io/v1");
    assert_eq!(review["kind"], "ConversionReview");
    assert_eq!(review["response"]["uid"], "review-uid-1");
    assert_eq!(review["response"]["result"]["status"], "Success");
    assert_eq!(review["response"]["convertedObjects"][0]["kind"], "OpenStackMachine");
}
