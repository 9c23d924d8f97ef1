//! End-to-end admission tests: AdmissionReview fixtures are decoded the
//! way the API server delivers them and run through the validating
//! handler against a Cluster resource.

use kube::core::admission::{AdmissionRequest, AdmissionReview};
use kube::core::DynamicObject;
use serde_json::{json, Value};

use aws_infra_admission::crd::cluster::{Cluster, ClusterSpec};
use aws_infra_admission::webhook;

/// Decode an AdmissionReview payload and extract its request.
fn request_from(review: Value) -> AdmissionRequest<DynamicObject> {
    let review: AdmissionReview<DynamicObject> = serde_json::from_value(review).unwrap();
    review.try_into().unwrap()
}

fn review(operation: &str, kind: &str, object: Value, old_object: Value) -> Value {
    json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-4ca8-af17-39a8a3b65bba",
            "kind": {
                "group": "extensions.gardener.cloud",
                "version": "v1alpha1",
                "kind": kind
            },
            "resource": {
                "group": "extensions.gardener.cloud",
                "version": "v1alpha1",
                "resource": format!("{}s", kind.to_lowercase())
            },
            "name": "test",
            "namespace": "shoot--garden--test",
            "operation": operation,
            "userInfo": {"username": "system:serviceaccount:kube-system:api"},
            "object": object,
            "oldObject": old_object
        }
    })
}

fn cluster() -> Cluster {
    Cluster::new(
        "shoot--garden--test",
        ClusterSpec {
            shoot: json!({
                "spec": {
                    "provider": {"type": "aws"},
                    "kubernetes": {"version": "1.30.4"},
                    "networking": {
                        "nodes": "10.0.0.0/8",
                        "pods": "100.64.0.0/16",
                        "services": "100.65.0.0/16"
                    }
                }
            }),
        },
    )
}

fn infrastructure(networks: Value) -> Value {
    json!({
        "apiVersion": "extensions.gardener.cloud/v1alpha1",
        "kind": "Infrastructure",
        "metadata": {"name": "test", "namespace": "shoot--garden--test"},
        "spec": {
            "type": "aws",
            "region": "eu-west-1",
            "providerConfig": {"networks": networks}
        }
    })
}

fn valid_networks() -> Value {
    json!({
        "vpc": {"cidr": "10.0.0.0/16"},
        "zones": [{
            "name": "eu-west-1a",
            "internal": "10.0.0.0/24",
            "public": "10.0.1.0/24",
            "workers": "10.0.2.0/24"
        }]
    })
}

#[test]
fn accepts_valid_infrastructure_create() {
    let req = request_from(review(
        "CREATE",
        "Infrastructure",
        infrastructure(valid_networks()),
        Value::Null,
    ));
    let resp = webhook::validate(&req, &cluster());
    assert!(resp.allowed, "expected allow, got: {}", resp.result.message);
}

#[test]
fn rejects_non_canonical_zone_cidr() {
    let mut networks = valid_networks();
    networks["zones"][0]["internal"] = json!("10.0.0.1/24");
    let req = request_from(review(
        "CREATE",
        "Infrastructure",
        infrastructure(networks),
        Value::Null,
    ));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    assert!(resp.result.message.contains("networks.zones[0].internal"));
    assert!(resp.result.message.contains("canonical"));
}

#[test]
fn rejects_vpc_with_both_id_and_cidr() {
    let mut networks = valid_networks();
    networks["vpc"] = json!({"id": "vpc-1234", "cidr": "10.0.0.0/16"});
    let req = request_from(review(
        "CREATE",
        "Infrastructure",
        infrastructure(networks),
        Value::Null,
    ));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    assert!(resp.result.message.contains("networks.vpc"));
}

#[test]
fn rejects_update_that_changes_networks() {
    let mut changed = valid_networks();
    changed["zones"][0]["workers"] = json!("10.0.3.0/24");
    let req = request_from(review(
        "UPDATE",
        "Infrastructure",
        infrastructure(changed),
        infrastructure(valid_networks()),
    ));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    assert!(resp.result.message.contains("immutable"));
}

#[test]
fn accepts_update_with_identical_networks() {
    let req = request_from(review(
        "UPDATE",
        "Infrastructure",
        infrastructure(valid_networks()),
        infrastructure(valid_networks()),
    ));
    let resp = webhook::validate(&req, &cluster());
    assert!(resp.allowed, "expected allow, got: {}", resp.result.message);
}

#[test]
fn rejects_infrastructure_without_provider_config() {
    let object = json!({
        "apiVersion": "extensions.gardener.cloud/v1alpha1",
        "kind": "Infrastructure",
        "metadata": {"name": "test", "namespace": "shoot--garden--test"},
        "spec": {"type": "aws", "region": "eu-west-1"}
    });
    let req = request_from(review("CREATE", "Infrastructure", object, Value::Null));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    assert!(resp.result.message.contains("spec.providerConfig"));
}

#[test]
fn rejects_io1_worker_pool_without_iops() {
    let object = json!({
        "apiVersion": "extensions.gardener.cloud/v1alpha1",
        "kind": "Worker",
        "metadata": {"name": "test", "namespace": "shoot--garden--test"},
        "spec": {
            "type": "aws",
            "region": "eu-west-1",
            "pools": [{
                "name": "cpu-worker",
                "machineType": "m5.large",
                "volume": {"type": "io1", "size": "50Gi"},
                "providerConfig": {}
            }]
        }
    });
    let req = request_from(review("CREATE", "Worker", object, Value::Null));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    assert!(resp.result.message.contains("volume.iops"));
}

#[test]
fn accepts_worker_pool_with_provisioned_iops() {
    let object = json!({
        "apiVersion": "extensions.gardener.cloud/v1alpha1",
        "kind": "Worker",
        "metadata": {"name": "test", "namespace": "shoot--garden--test"},
        "spec": {
            "type": "aws",
            "region": "eu-west-1",
            "pools": [{
                "name": "cpu-worker",
                "machineType": "m5.large",
                "volume": {"type": "io1", "size": "50Gi"},
                "providerConfig": {"volume": {"iops": 2000}}
            }]
        }
    });
    let req = request_from(review("CREATE", "Worker", object, Value::Null));
    let resp = webhook::validate(&req, &cluster());
    assert!(resp.allowed, "expected allow, got: {}", resp.result.message);
}

#[test]
fn rejects_unexpected_kind() {
    let object = json!({
        "apiVersion": "extensions.gardener.cloud/v1alpha1",
        "kind": "Gadget",
        "metadata": {"name": "test"},
        "spec": {}
    });
    let req = request_from(review("CREATE", "Gadget", object, Value::Null));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    assert!(resp.result.message.contains("Gadget"));
}

#[test]
fn admits_delete_without_validation() {
    let review = json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-4ca8-af17-39a8a3b65bba",
            "kind": {
                "group": "extensions.gardener.cloud",
                "version": "v1alpha1",
                "kind": "Infrastructure"
            },
            "resource": {
                "group": "extensions.gardener.cloud",
                "version": "v1alpha1",
                "resource": "infrastructures"
            },
            "name": "test",
            "namespace": "shoot--garden--test",
            "operation": "DELETE",
            "userInfo": {"username": "system:serviceaccount:kube-system:api"},
            "oldObject": infrastructure(valid_networks())
        }
    });
    let resp = webhook::validate(&request_from(review), &cluster());
    assert!(resp.allowed);
}

#[test]
fn denial_reports_every_violation_at_once() {
    let networks = json!({
        "vpc": {},
        "zones": [{
            "name": "eu-west-1a",
            "internal": "10.0.0.1/24",
            "public": "10.0.1.0/24",
            "workers": "10.0.1.0/24"
        }]
    });
    let req = request_from(review(
        "CREATE",
        "Infrastructure",
        infrastructure(networks),
        Value::Null,
    ));
    let resp = webhook::validate(&req, &cluster());
    assert!(!resp.allowed);
    let message = &resp.result.message;
    assert!(message.contains("networks.zones[0].internal"));
    assert!(message.contains("networks.vpc"));
    assert!(message.contains("must not overlap"));
}
