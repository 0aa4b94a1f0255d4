use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use emporium_catalog::CatalogError;
use emporium_core::{CoreError, ErrorKind};
use emporium_order::CheckoutError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    Rejected(String),
    Unavailable(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::InvalidInput => AppError::ValidationError(message),
            ErrorKind::BusinessRejection => AppError::Rejected(message),
            ErrorKind::CollaboratorUnavailable => AppError::Unavailable(message),
            ErrorKind::Internal | ErrorKind::PartialPostCommitFailure => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Rejected(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Unavailable(msg) => {
                tracing::warn!("Collaborator unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                AppError::NotFoundError(format!("Product not found: {}", id))
            }
            other => AppError::from_kind(other.kind(), other.to_string()),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        AppError::from_kind(err.kind(), err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io { .. } => AppError::Unavailable(err.to_string()),
            other => AppError::Rejected(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_order::CheckoutStage;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_core_error_status() {
        assert_eq!(
            status(CoreError::ValidationError("bad".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(CoreError::ProductNotFound("X".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(CoreError::UnsupportedCurrency("XYZ".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(CoreError::unavailable("cart", "down").into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_checkout_product_not_found_is_rejection() {
        let err = CheckoutError {
            stage: CheckoutStage::Pricing,
            source: CoreError::ProductNotFound("X".into()),
        };
        assert_eq!(status(err.into()), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_catalog_error_status() {
        let io = CatalogError::Io {
            path: "products.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(status(io.into()), StatusCode::SERVICE_UNAVAILABLE);

        let invalid = CatalogError::InvalidProduct {
            id: "A".into(),
            reason: "negative price".into(),
        };
        assert_eq!(status(invalid.into()), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
