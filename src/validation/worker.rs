//! Volume validation for WorkerConfig.

use crate::field::{ErrorList, FieldError, Path};
use crate::provider::WorkerConfig;

/// Volume type requiring provisioned IOPS.
pub const VOLUME_TYPE_IO1: &str = "io1";

/// Validate a pool's WorkerConfig against its declared volume type.
pub fn validate_worker_config(config: &WorkerConfig, volume_type: &str) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let iops_path = Path::new("volume").child("iops");
    match config.volume.as_ref().and_then(|v| v.iops) {
        None if volume_type == VOLUME_TYPE_IO1 => {
            all_errs.push(FieldError::required(
                iops_path,
                "iops must be set for io1 volumes",
            ));
        }
        Some(iops) if iops <= 0 => {
            all_errs.push(FieldError::invalid(
                iops_path,
                iops.to_string(),
                "iops must be a positive value",
            ));
        }
        _ => {}
    }

    all_errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ErrorType;
    use crate::provider::VolumeConfig;

    fn config(iops: Option<i64>) -> WorkerConfig {
        WorkerConfig {
            volume: Some(VolumeConfig { iops }),
        }
    }

    #[test]
    fn test_io1_requires_iops() {
        let errs = validate_worker_config(&WorkerConfig::default(), "io1");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].error_type, ErrorType::Required);
        assert_eq!(errs[0].field.to_string(), "volume.iops");
    }

    #[test]
    fn test_gp2_does_not_require_iops() {
        assert!(validate_worker_config(&WorkerConfig::default(), "gp2").is_empty());
    }

    #[test]
    fn test_iops_must_be_positive() {
        let errs = validate_worker_config(&config(Some(0)), "io1");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].error_type, ErrorType::Invalid);
        assert!(validate_worker_config(&config(Some(1000)), "io1").is_empty());
    }
}
