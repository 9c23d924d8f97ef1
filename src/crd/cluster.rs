use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cluster is the seed-side resource bundling the manifests of the shoot
/// it belongs to. The shoot manifest is carried as raw JSON, synced
/// verbatim from the garden cluster.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "extensions.gardener.cloud",
    version = "v1alpha1",
    kind = "Cluster"
)]
pub struct ClusterSpec {
    #[serde(default)]
    pub shoot: serde_json::Value,
}

// The shoot shape below is the subset this crate reads: provider type,
// kubernetes version, and the ambient networking CIDRs.

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Shoot {
    #[serde(default)]
    pub spec: ShootSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShootSpec {
    #[serde(default)]
    pub provider: ShootProvider,
    #[serde(default)]
    pub kubernetes: ShootKubernetes,
    #[serde(default)]
    pub networking: ShootNetworking,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShootProvider {
    #[serde(default, rename = "type")]
    pub provider_type: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShootKubernetes {
    #[serde(default)]
    pub version: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShootNetworking {
    #[serde(default)]
    pub nodes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
}

/// Decode the shoot manifest embedded in a Cluster resource.
pub fn shoot_from_cluster(cluster: &Cluster) -> Result<Shoot> {
    if cluster.spec.shoot.is_null() {
        return Err(Error::MissingShoot);
    }
    Ok(serde_json::from_value(cluster.spec.shoot.clone())?)
}
