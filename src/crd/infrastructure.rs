use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Infrastructure is the seed-side request to provision provider
/// infrastructure for a shoot cluster.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "extensions.gardener.cloud",
    version = "v1alpha1",
    kind = "Infrastructure",
    shortname = "infra",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSpec {
    /// Provider type, e.g. "aws".
    #[serde(rename = "type")]
    pub provider_type: String,
    pub region: String,
    /// Provider-specific configuration; opaque to the API server and
    /// decoded by the provider's webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::CustomResourceExt;

    #[test]
    fn test_infrastructure_crd_generates_valid_schema() {
        let crd = Infrastructure::crd();
        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("infrastructures.extensions.gardener.cloud")
        );
        assert_eq!(crd.spec.group, "extensions.gardener.cloud");
        assert_eq!(crd.spec.names.kind, "Infrastructure");
        assert_eq!(crd.spec.scope, "Namespaced");
    }
}
