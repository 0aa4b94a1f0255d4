pub mod ads;
pub mod cart;
pub mod catalog;
pub mod currency;
pub mod notification;
pub mod payment;
pub mod recommendation;
pub mod shipping;

pub use ads::{AdProvider, MAX_ADS_TO_SERVE};
pub use cart::CartStore;
pub use catalog::ProductCatalog;
pub use currency::CurrencyConverter;
pub use notification::{LogNotifier, Notifier};
pub use payment::{CardPaymentProcessor, CardType, PaymentProcessor};
pub use recommendation::{CatalogRecommender, RecommendationService, MAX_RECOMMENDATIONS};
pub use shipping::{FlatRateShipping, ShippingService};

use emporium_shared::MoneyError;
use std::fmt;

/// Failure reported by (or while talking to) a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("{service} unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Money arithmetic failed: {0}")]
    Money(#[from] MoneyError),
}

/// Coarse classification used by callers to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request data.
    InvalidInput,
    /// The collaborator could not be reached or failed internally.
    CollaboratorUnavailable,
    /// The collaborator understood the request and refused it.
    BusinessRejection,
    /// Broken invariant inside this process, e.g. mixing currencies.
    Internal,
    /// A step after the charge failed; the order itself went through.
    PartialPostCommitFailure,
}

impl CoreError {
    pub fn unavailable(service: &'static str, reason: impl fmt::Display) -> Self {
        CoreError::Unavailable {
            service,
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ValidationError(_) => ErrorKind::InvalidInput,
            CoreError::Unavailable { .. } => ErrorKind::CollaboratorUnavailable,
            CoreError::ProductNotFound(_)
            | CoreError::UnsupportedCurrency(_)
            | CoreError::PaymentDeclined(_) => ErrorKind::BusinessRejection,
            CoreError::Money(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::CollaboratorUnavailable => "collaborator_unavailable",
            ErrorKind::BusinessRejection => "business_rejection",
            ErrorKind::Internal => "internal",
            ErrorKind::PartialPostCommitFailure => "partial_post_commit_failure",
        };
        f.write_str(name)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
