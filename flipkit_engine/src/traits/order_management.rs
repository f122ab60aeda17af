use thiserror::Error;

use crate::db_types::{NewOrder, Order, PaymentRef, VerifiedPayment};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert order, since one already exists with reference {0}")]
    OrderAlreadyExists(PaymentRef),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(PaymentRef),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

/// Order store primitives.
///
/// The reconciliation flow in [`crate::OrderFlowApi`] composes these calls; backends only need to provide honest
/// storage semantics. The one non-negotiable requirement is that `payment_reference` carries a unique constraint,
/// and that both insert methods report a violation of it as [`OrderApiError::OrderAlreadyExists`]. That error is
/// an expected outcome under concurrent verification calls, not a fault.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Insert a new order in PENDING status.
    async fn insert_pending_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;

    /// Insert a new order directly in PAID status, attaching the gateway response and paid-at timestamp. Used when
    /// a verification arrives before any pending record exists.
    async fn insert_paid_order(&self, order: NewOrder, payment: &VerifiedPayment) -> Result<Order, OrderApiError>;

    /// Fetch the order with the given payment reference, if any.
    async fn fetch_order_by_reference(&self, reference: &PaymentRef) -> Result<Option<Order>, OrderApiError>;

    /// Transition the order with the given reference to PAID, attaching the gateway response text and the paid-at
    /// timestamp. Returns [`OrderApiError::OrderNotFound`] if no such order exists.
    async fn mark_order_paid(&self, reference: &PaymentRef, payment: &VerifiedPayment) -> Result<Order, OrderApiError>;

    /// All orders for the given email (normalised), newest first.
    async fn fetch_orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError>;
}
