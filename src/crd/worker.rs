use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Worker is the seed-side request to provision worker machine pools for
/// a shoot cluster.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "extensions.gardener.cloud",
    version = "v1alpha1",
    kind = "Worker",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSpec {
    /// Provider type, e.g. "aws".
    #[serde(rename = "type")]
    pub provider_type: String,
    pub region: String,
    #[serde(default)]
    pub pools: Vec<WorkerPool>,
}

/// WorkerPool is one homogeneous group of worker machines.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerPool {
    pub name: String,
    pub machine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
    /// Provider-specific pool configuration, decoded by the provider's
    /// webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}

/// Volume describes the data volume attached to each machine of a pool.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Volume {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    pub size: String,
}
