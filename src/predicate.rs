//! Predicates gating reconciliation on the state of the shoot cluster.
//!
//! Each predicate is a pure function over the seed-side Cluster resource;
//! decode failures make a predicate return false rather than propagate.

use crate::crd::cluster::{shoot_from_cluster, Cluster};

/// Annotation set on the Cluster once the CSI migration controller has
/// completed its work for the shoot.
pub const ANNOTATION_CONTROLLER_FINISHED: &str =
    "csi-migration.extensions.gardener.cloud/controller-finished";

/// True when the cluster's shoot declares the given provider type.
pub fn shoot_provider_type(cluster: &Cluster, provider_type: &str) -> bool {
    shoot_from_cluster(cluster)
        .map(|shoot| shoot.spec.provider.provider_type == provider_type)
        .unwrap_or(false)
}

/// True when the shoot's kubernetes version is at least `min_version`.
pub fn shoot_kubernetes_version_at_least(cluster: &Cluster, min_version: &str) -> bool {
    let Ok(shoot) = shoot_from_cluster(cluster) else {
        return false;
    };
    match (
        parse_version(&shoot.spec.kubernetes.version),
        parse_version(min_version),
    ) {
        (Some(actual), Some(min)) => actual >= min,
        _ => false,
    }
}

/// True while the CSI migration controller has not yet marked the
/// cluster as finished.
pub fn migration_controller_unfinished(cluster: &Cluster) -> bool {
    !cluster
        .metadata
        .annotations
        .as_ref()
        .map_or(false, |a| a.contains_key(ANNOTATION_CONTROLLER_FINISHED))
}

/// Parse a kubernetes version like "1.18", "v1.30.4" into comparable
/// components; the patch component defaults to zero.
fn parse_version(s: &str) -> Option<(u64, u64, u64)> {
    let s = s.strip_prefix('v').unwrap_or(s);
    let mut parts = s.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}
