use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use flipkit_engine::{
    traits::{ExchangeRateError, OrderApiError, UserApiError, VendorApiError},
    PaymentFlowError,
};
use thiserror::Error;

use crate::integrations::{GoogleApiError, PaystackApiError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Payload deserialization error")]
    CouldNotDeserializePayload,
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The payment gateway declined the transaction. {0}")]
    PaymentDeclined(String),
    #[error("The payment gateway could not be reached. {0}")]
    GatewayUnreachable(String),
    #[error("Payment verification failed. {0}")]
    PaymentMismatch(String),
    #[error("The record already exists. {0}")]
    Conflict(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CouldNotDeserializePayload => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::PaymentDeclined(_) => StatusCode::BAD_REQUEST,
            Self::PaymentMismatch(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::ProfileIncomplete(_) => StatusCode::UNAUTHORIZED,
                AuthError::PoorlyFormattedToken(_) => StatusCode::BAD_REQUEST,
                AuthError::CouldNotIssueToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::GatewayUnreachable(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No bearer token was provided.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
    #[error("Access token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
    #[error("Could not issue access token. {0}")]
    CouldNotIssueToken(String),
    #[error("The identity provider did not supply the required profile fields. {0}")]
    ProfileIncomplete(String),
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::OrderAlreadyExists(reference) => {
                Self::Conflict(format!("An order with reference [{reference}] already exists"))
            },
            OrderApiError::OrderNotFound(reference) => Self::NoRecordFound(format!("Order [{reference}]")),
            OrderApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<PaymentFlowError> for ServerError {
    fn from(e: PaymentFlowError) -> Self {
        match e {
            PaymentFlowError::OrderError(e) => e.into(),
            PaymentFlowError::EmailMismatch => Self::PaymentMismatch(e.to_string()),
            PaymentFlowError::AmountMismatch { .. } => Self::PaymentMismatch(e.to_string()),
        }
    }
}

impl From<VendorApiError> for ServerError {
    fn from(e: VendorApiError) -> Self {
        match e {
            VendorApiError::VendorNotFound(id) => Self::NoRecordFound(format!("Vendor [{id}]")),
            VendorApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<UserApiError> for ServerError {
    fn from(e: UserApiError) -> Self {
        match e {
            UserApiError::MissingEmail => Self::AuthenticationError(AuthError::ProfileIncomplete(e.to_string())),
            UserApiError::UserNotFound(id) => Self::NoRecordFound(format!("User [{id}]")),
            UserApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<ExchangeRateError> for ServerError {
    fn from(e: ExchangeRateError) -> Self {
        match e {
            ExchangeRateError::RateDoesNotExist(currency) => Self::NoRecordFound(format!("Exchange rate {currency}")),
            ExchangeRateError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<PaystackApiError> for ServerError {
    fn from(e: PaystackApiError) -> Self {
        match e {
            PaystackApiError::Initialization(e) => Self::InitializeError(e),
            PaystackApiError::Declined(e) => Self::PaymentDeclined(e),
            PaystackApiError::ResponseError(e) => Self::GatewayUnreachable(e),
            PaystackApiError::JsonError(e) => Self::GatewayUnreachable(e),
            PaystackApiError::InvalidResponse(e) => Self::GatewayUnreachable(e),
        }
    }
}

impl From<GoogleApiError> for ServerError {
    fn from(e: GoogleApiError) -> Self {
        match e {
            GoogleApiError::ResponseError(e) => Self::GatewayUnreachable(e),
            GoogleApiError::ExchangeFailed(e) => Self::AuthenticationError(AuthError::ValidationError(e)),
            GoogleApiError::JsonError(e) => Self::GatewayUnreachable(e),
        }
    }
}
