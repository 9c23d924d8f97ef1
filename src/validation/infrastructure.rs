//! Network topology validation for InfrastructureConfig.

use crate::cidr::{self, Cidr};
use crate::field::{ErrorList, FieldError, Path};
use crate::provider::{InfrastructureConfig, VpcDescriptor};

/// Validate an InfrastructureConfig against the shoot's ambient networks.
///
/// `nodes_cidr` is the shoot's node address space; `pods_cidr` and
/// `services_cidr` are optional. None of the CIDR strings are assumed to
/// be pre-validated. The returned list is empty iff the configuration is
/// fully consistent; error order is the order checks are performed.
pub fn validate_infrastructure_config(
    config: &InfrastructureConfig,
    nodes_cidr: &str,
    pods_cidr: Option<&str>,
    services_cidr: Option<&str>,
) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let nodes = Cidr::new(nodes_cidr, Path::new("spec.networking.nodes"));
    let pods = pods_cidr.map(|c| Cidr::new(c, Path::new("spec.networking.pods")));
    let services = services_cidr.map(|c| Cidr::new(c, Path::new("spec.networking.services")));

    let networks_path = Path::new("networks");
    let zones_path = networks_path.child("zones");
    if config.networks.zones.is_empty() {
        all_errs.push(FieldError::required(
            zones_path.clone(),
            "must specify at least the networks for one zone",
        ));
    }

    let mut cidrs = Vec::with_capacity(config.networks.zones.len() * 3);
    let mut worker_cidrs = Vec::with_capacity(config.networks.zones.len());

    for (i, zone) in config.networks.zones.iter().enumerate() {
        let internal_path = zones_path.index(i).child("internal");
        all_errs.extend(cidr::validate_canonical(&internal_path, &zone.internal));
        cidrs.push(Cidr::new(&zone.internal, internal_path));

        let public_path = zones_path.index(i).child("public");
        all_errs.extend(cidr::validate_canonical(&public_path, &zone.public));
        cidrs.push(Cidr::new(&zone.public, public_path));

        let workers_path = zones_path.index(i).child("workers");
        all_errs.extend(cidr::validate_canonical(&workers_path, &zone.workers));
        cidrs.push(Cidr::new(&zone.workers, workers_path.clone()));
        worker_cidrs.push(Cidr::new(&zone.workers, workers_path));
    }

    all_errs.extend(cidr::validate_parse_all(&cidrs));

    // Every worker network must live inside the node address space.
    all_errs.extend(nodes.validate_subset(&worker_cidrs));

    let vpc_path = networks_path.child("vpc");
    match config.networks.vpc.descriptor() {
        None => {
            all_errs.push(FieldError::invalid(
                vpc_path,
                serde_json::to_string(&config.networks.vpc).unwrap_or_default(),
                "must specify either a vpc id or a cidr",
            ));
        }
        Some(VpcDescriptor::Id(_)) => {}
        Some(VpcDescriptor::Cidr(value)) => {
            let cidr_path = vpc_path.child("cidr");
            all_errs.extend(cidr::validate_canonical(&cidr_path, value));
            let vpc_cidr = Cidr::new(value, cidr_path);
            all_errs.extend(vpc_cidr.validate_parse());
            all_errs.extend(vpc_cidr.validate_covers([&nodes]));
            all_errs.extend(vpc_cidr.validate_covers(&cidrs));
            all_errs.extend(vpc_cidr.validate_disjoint(pods.iter().chain(services.iter())));
        }
    }

    // Zone networks must not overlap each other, nor the pod/service ranges.
    all_errs.extend(cidr::validate_no_overlap(&cidrs));
    for ambient in pods.iter().chain(services.iter()) {
        all_errs.extend(cidr::validate_disjoint_from(ambient, &cidrs));
    }

    all_errs
}

/// Validate an update to an InfrastructureConfig. The network topology is
/// immutable after creation; any difference yields a single error on the
/// `networks` path before `new` is re-validated in full.
pub fn validate_infrastructure_config_update(
    old: &InfrastructureConfig,
    new: &InfrastructureConfig,
    nodes_cidr: &str,
    pods_cidr: Option<&str>,
    services_cidr: Option<&str>,
) -> ErrorList {
    let mut all_errs = ErrorList::new();

    if old.networks != new.networks {
        all_errs.push(FieldError::invalid(
            Path::new("networks"),
            serde_json::to_string(&new.networks).unwrap_or_default(),
            "field is immutable",
        ));
    }

    all_errs.extend(validate_infrastructure_config(
        new,
        nodes_cidr,
        pods_cidr,
        services_cidr,
    ));
    all_errs
}
