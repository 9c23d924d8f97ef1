//! Provider-specific configuration shapes decoded from the raw
//! `providerConfig` payloads of Infrastructure and Worker resources.

use serde::{Deserialize, Serialize};

/// InfrastructureConfig describes the desired AWS network topology for a
/// shoot cluster.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfrastructureConfig {
    pub networks: Networks,
}

/// Networks holds the VPC descriptor and the per-zone address blocks.
/// Immutable after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Networks {
    pub vpc: VpcConfig,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// Zone declares the three address blocks of one availability zone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub internal: String,
    pub public: String,
    pub workers: String,
}

/// VpcConfig is the wire shape of the VPC descriptor: either the id of an
/// externally-owned VPC or the CIDR of one to be created. Both fields are
/// optional here because both or neither can arrive over the wire; use
/// [`VpcConfig::descriptor`] to resolve the choice.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VpcConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
}

/// The resolved id-or-cidr choice of a [`VpcConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VpcDescriptor<'a> {
    Id(&'a str),
    Cidr(&'a str),
}

impl VpcConfig {
    /// Resolve the discriminated choice; `None` when both or neither
    /// field is set.
    pub fn descriptor(&self) -> Option<VpcDescriptor<'_>> {
        match (self.id.as_deref(), self.cidr.as_deref()) {
            (Some(id), None) => Some(VpcDescriptor::Id(id)),
            (None, Some(cidr)) => Some(VpcDescriptor::Cidr(cidr)),
            _ => None,
        }
    }
}

/// WorkerConfig carries per-pool provider settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeConfig>,
}

/// VolumeConfig tunes the data volume attached to worker machines.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
}
