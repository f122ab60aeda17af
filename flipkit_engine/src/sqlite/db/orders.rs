use chrono::{DateTime, Utc};
use log::debug;
use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, PaymentRef, PaymentStatus, VerifiedPayment},
    traits::OrderApiError,
};

/// Inserts a new PENDING order. A duplicate payment reference maps to [`OrderApiError::OrderAlreadyExists`].
pub async fn insert_pending_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderApiError> {
    let order = insert_order(order, PaymentStatus::Pending, None, None, conn).await?;
    debug!("📝️ Pending order [{}] inserted with id {}", order.payment_reference, order.id);
    Ok(order)
}

/// Inserts a new order directly in PAID status, carrying the gateway response and paid-at timestamp. Used when a
/// verification call arrives before any pending record exists for the reference.
pub async fn insert_paid_order(
    order: NewOrder,
    payment: &VerifiedPayment,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let order =
        insert_order(order, PaymentStatus::Paid, payment.gateway_response.as_deref(), Some(payment.paid_at), conn)
            .await?;
    debug!("📝️ Order [{}] inserted as paid with id {}", order.payment_reference, order.id);
    Ok(order)
}

/// Inserts an order using the given connection. This is not atomic. You can embed this call inside a transaction
/// if you need to ensure atomicity, and pass `&mut *tx` as the connection argument.
async fn insert_order(
    order: NewOrder,
    status: PaymentStatus,
    gateway_response: Option<&str>,
    paid_at: Option<DateTime<Utc>>,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let reference = order.payment_reference.clone();
    let result = sqlx::query_as(
        r#"
            INSERT INTO orders (
                email,
                username,
                amount,
                currency,
                payment_reference,
                payment_status,
                gateway_response,
                paid_at,
                metadata
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(order.email)
    .bind(order.username)
    .bind(order.amount)
    .bind(order.currency)
    .bind(order.payment_reference)
    .bind(status)
    .bind(gateway_response)
    .bind(paid_at)
    .bind(order.metadata.map(Json))
    .fetch_one(conn)
    .await;
    result.map_err(|e| match e {
        sqlx::Error::Database(de) if de.is_unique_violation() => OrderApiError::OrderAlreadyExists(reference),
        e => OrderApiError::from(e),
    })
}

/// Returns the order carrying the given payment reference, if any.
pub async fn fetch_order_by_reference(
    reference: &PaymentRef,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE payment_reference = $1")
        .bind(reference.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Marks the order with the given reference as PAID, attaching the gateway response text and paid-at timestamp.
pub async fn mark_order_paid(
    reference: &PaymentRef,
    payment: &VerifiedPayment,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let result: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET
                payment_status = 'PAID',
                gateway_response = $2,
                paid_at = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE payment_reference = $1
            RETURNING *;
        "#,
    )
    .bind(reference.as_str())
    .bind(payment.gateway_response.as_deref())
    .bind(payment.paid_at)
    .fetch_optional(conn)
    .await?;
    result.ok_or_else(|| OrderApiError::OrderNotFound(reference.clone()))
}

/// All orders for the given (normalised) email, newest first.
pub async fn fetch_orders_for_email(email: &str, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE email = $1 ORDER BY created_at DESC")
        .bind(email)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}
