//! Validating admission handler for provider extension resources.
//!
//! Maps an admission request onto the pure validation functions: decodes
//! the typed resource and its provider config, reads the ambient CIDRs
//! from the cluster's shoot, and denies with the full accumulated error
//! list. Serving (HTTP, TLS) is owned by the embedding webhook server.

use kube::core::admission::{AdmissionRequest, AdmissionResponse};
use kube::core::DynamicObject;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::crd::cluster::{shoot_from_cluster, Cluster, Shoot};
use crate::crd::infrastructure::Infrastructure;
use crate::crd::worker::Worker;
use crate::error::{Error, Result};
use crate::field::{self, ErrorList, FieldError, Path};
use crate::provider::{InfrastructureConfig, WorkerConfig};
use crate::validation;

/// An extension resource this webhook validates, resolved once from the
/// request's group-version-kind.
pub enum ExtensionObject {
    Infrastructure(Box<Infrastructure>),
    Worker(Box<Worker>),
}

impl ExtensionObject {
    fn from_dynamic(kind: &str, obj: &DynamicObject) -> Result<Self> {
        match kind {
            "Infrastructure" => Ok(Self::Infrastructure(Box::new(parse(obj)?))),
            "Worker" => Ok(Self::Worker(Box::new(parse(obj)?))),
            other => Err(Error::UnexpectedKind(other.to_string())),
        }
    }
}

fn parse<K: DeserializeOwned>(obj: &DynamicObject) -> Result<K> {
    Ok(serde_json::from_value(serde_json::to_value(obj)?)?)
}

/// Validate an admission request against the cluster's shoot networking.
/// Admits iff the accumulated error list is empty.
pub fn validate(req: &AdmissionRequest<DynamicObject>, cluster: &Cluster) -> AdmissionResponse {
    // DELETE and CONNECT carry no new object; nothing to validate.
    let Some(new_obj) = req.object.as_ref() else {
        return AdmissionResponse::from(req);
    };

    let shoot = match shoot_from_cluster(cluster) {
        Ok(shoot) => shoot,
        Err(e) => {
            warn!(%e, "could not read shoot from cluster resource");
            return AdmissionResponse::invalid(format!("could not read shoot from cluster: {e}"));
        }
    };

    let kind = req.kind.kind.as_str();
    let new = match ExtensionObject::from_dynamic(kind, new_obj) {
        Ok(obj) => obj,
        Err(e) => {
            warn!(%e, kind, "could not decode admission object");
            return AdmissionResponse::invalid(format!("could not decode object: {e}"));
        }
    };
    let old = match req.old_object.as_ref() {
        Some(obj) => match ExtensionObject::from_dynamic(kind, obj) {
            Ok(obj) => Some(obj),
            Err(e) => {
                warn!(%e, kind, "could not decode old admission object");
                return AdmissionResponse::invalid(format!("could not decode old object: {e}"));
            }
        },
        None => None,
    };

    let errs = match (&new, &old) {
        (ExtensionObject::Infrastructure(new), None) => {
            validate_infrastructure(None, new, &shoot)
        }
        (ExtensionObject::Infrastructure(new), Some(ExtensionObject::Infrastructure(old))) => {
            validate_infrastructure(Some(old.as_ref()), new, &shoot)
        }
        // Worker updates re-run the full create validation.
        (ExtensionObject::Worker(new), _) => validate_worker(new),
        (ExtensionObject::Infrastructure(_), Some(ExtensionObject::Worker(_))) => {
            return AdmissionResponse::invalid("old and new objects disagree on kind");
        }
    };

    if errs.is_empty() {
        AdmissionResponse::from(req)
    } else {
        let reason = field::join(&errs);
        warn!(kind, name = %req.name, %reason, "denying admission");
        AdmissionResponse::from(req).deny(reason)
    }
}

fn validate_infrastructure(
    old: Option<&Infrastructure>,
    new: &Infrastructure,
    shoot: &Shoot,
) -> ErrorList {
    let new_config = match infrastructure_config_of(new) {
        Ok(config) => config,
        Err(errs) => return errs,
    };

    let networking = &shoot.spec.networking;
    let nodes = networking.nodes.as_str();
    let pods = networking.pods.as_deref();
    let services = networking.services.as_deref();

    match old {
        None => validation::validate_infrastructure_config(&new_config, nodes, pods, services),
        Some(old) => {
            let old_config = match infrastructure_config_of(old) {
                Ok(config) => config,
                Err(errs) => return errs,
            };
            validation::validate_infrastructure_config_update(
                &old_config,
                &new_config,
                nodes,
                pods,
                services,
            )
        }
    }
}

fn infrastructure_config_of(
    infra: &Infrastructure,
) -> std::result::Result<InfrastructureConfig, ErrorList> {
    let config_path = Path::new("spec").child("providerConfig");
    let Some(raw) = infra.spec.provider_config.as_ref() else {
        return Err(vec![FieldError::required(
            config_path,
            "no infrastructure config provided",
        )]);
    };
    serde_json::from_value(raw.clone()).map_err(|e| {
        vec![FieldError::internal_error(
            config_path,
            format!("could not decode provider config: {e}"),
        )]
    })
}

fn validate_worker(worker: &Worker) -> ErrorList {
    let mut all_errs = ErrorList::new();
    let pools_path = Path::new("spec").child("pools");

    for (i, pool) in worker.spec.pools.iter().enumerate() {
        // Pools without provider config have nothing provider-specific
        // to check.
        let Some(raw) = pool.provider_config.as_ref() else {
            continue;
        };

        let volume_path = pools_path.index(i).child("volume");
        let Some(volume) = pool.volume.as_ref() else {
            all_errs.push(FieldError::required(volume_path, "volume is required"));
            return all_errs;
        };
        let Some(volume_type) = volume.volume_type.as_deref() else {
            all_errs.push(FieldError::required(
                volume_path.child("type"),
                "volume type is required",
            ));
            return all_errs;
        };

        let config: WorkerConfig = match serde_json::from_value(raw.clone()) {
            Ok(config) => config,
            Err(e) => {
                return vec![FieldError::internal_error(
                    pools_path.index(i).child("providerConfig"),
                    format!("could not decode provider config: {e}"),
                )];
            }
        };
        all_errs.extend(validation::validate_worker_config(&config, volume_type));
    }

    all_errs
}
