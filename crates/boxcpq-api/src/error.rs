use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boxcpq_core::CpqError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
            details: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CpqError> for ApiError {
    fn from(err: CpqError) -> Self {
        let details = err.root_cause().to_string();
        if err.is_validation() {
            Self::unprocessable("Invalid request").with_details(details)
        } else if err.is_configuration() {
            Self::unavailable("Cost coefficients unavailable").with_details(details)
        } else {
            Self::internal("Internal error").with_details(details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_root_cause() {
        let validation = ApiError::from(CpqError::calculation(CpqError::InvalidQuantity { value: 0 }));
        assert_eq!(validation.status, StatusCode::UNPROCESSABLE_ENTITY);

        let missing = ApiError::from(CpqError::calculation(CpqError::ConfigMissing {
            key: "custo_fita_m".to_string(),
        }));
        assert_eq!(missing.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            missing.details.as_deref(),
            Some("Missing required configuration: custo_fita_m")
        );

        let other = ApiError::from(CpqError::Serialization("bad".to_string()));
        assert_eq!(other.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
