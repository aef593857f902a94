use domain_carbon::CarbonError;
use thiserror::Error;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Failure to turn an embedded price document into an index.
///
/// Cloned out of the build-once cell so every caller sees the same failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Document deserialized but carries no products
    #[error("{service} price document for {region} has no products")]
    Empty { service: String, region: String },

    /// Document is not valid price-list JSON
    #[error("{service} price document for {region} is corrupt: {details}")]
    Corrupt {
        service: String,
        region: String,
        details: String,
    },
}

/// Errors that can occur in the pricing domain
#[derive(Debug, Error)]
pub enum PricingError {
    /// Malformed descriptor or tag value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Descriptor region differs from the compiled catalog
    #[error("Region {requested} is not served by this build (compiled for {compiled})")]
    RegionMismatch { requested: String, compiled: String },

    /// Batch scope over the limit
    #[error("Batch of {size} resources exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Resource type is not recognized
    #[error("Unsupported resource type: {0}")]
    Unsupported(String),

    /// Embedded price catalog could not be built
    #[error("Pricing catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    /// Embedded carbon tables could not be loaded
    #[error("Carbon data unavailable: {0}")]
    Carbon(#[from] CarbonError),
}

impl From<validator::ValidationErrors> for PricingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        PricingError::InvalidInput(errors.to_string())
    }
}

impl From<PricingError> for tonic::Status {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidInput(msg) => tonic::Status::invalid_argument(msg),
            e @ PricingError::BatchTooLarge { .. } => tonic::Status::invalid_argument(e.to_string()),
            e @ PricingError::RegionMismatch { .. } => {
                tonic::Status::failed_precondition(e.to_string())
            }
            PricingError::Unsupported(msg) => tonic::Status::unimplemented(msg),
            PricingError::Catalog(e) => tonic::Status::internal(e.to_string()),
            PricingError::Carbon(e) => tonic::Status::internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PricingError::InvalidInput("bad".into()), Code::InvalidArgument),
            (PricingError::BatchTooLarge { size: 101, max: 100 }, Code::InvalidArgument),
            (
                PricingError::RegionMismatch {
                    requested: "eu-west-1".into(),
                    compiled: "us-east-1".into(),
                },
                Code::FailedPrecondition,
            ),
            (PricingError::Unsupported("aws:foo".into()), Code::Unimplemented),
            (
                PricingError::Catalog(CatalogError::Empty {
                    service: "ec2".into(),
                    region: "us-east-1".into(),
                }),
                Code::Internal,
            ),
            (
                PricingError::Carbon(CarbonError::CorruptData("truncated".into())),
                Code::Internal,
            ),
        ];
        for (err, code) in cases {
            let status: tonic::Status = err.into();
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn test_region_mismatch_message_names_both_regions() {
        let err = PricingError::RegionMismatch {
            requested: "eu-west-1".into(),
            compiled: "us-east-1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("eu-west-1") && msg.contains("us-east-1"));
    }
}
