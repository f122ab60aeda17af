use std::fmt::Debug;

use fk_common::{helpers::normalize_email, Kobo};
use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    db_types::{NewOrder, Order, PaymentRef, PaymentStatus, VerifiedPayment},
    traits::{OrderApiError, OrderManagement},
};

/// The client-submitted side of a verification call: what the customer claims to have paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentClaim {
    pub reference: PaymentRef,
    pub email: String,
    /// The claimed amount, in kobo.
    pub amount: Kobo,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum PaymentFlowError {
    #[error(transparent)]
    OrderError(#[from] OrderApiError),
    #[error("The gateway-reported payer email does not match the submitted email")]
    EmailMismatch,
    #[error("Amount mismatch: expected {expected}, gateway reported {reported}")]
    AmountMismatch { expected: Kobo, reported: Kobo },
}

/// `OrderFlowApi` is the primary API for the payment reconciliation and checkout flows.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    /// Match a gateway-confirmed payment against the claim the client submitted, and record the order as paid
    /// exactly once.
    ///
    /// The gateway lookup has already happened; `payment` only exists if the gateway reported success. This method
    /// performs the cross-checks and the idempotent upsert:
    /// * the gateway-reported payer email must equal the submitted email, case-insensitively;
    /// * the gateway-reported amount must equal the submitted amount exactly (both are kobo; no tolerance);
    /// * an order that is already PAID is returned unchanged (a duplicate submission is a success, not an error);
    /// * a PENDING order is transitioned to PAID;
    /// * if no order exists yet, one is created directly in PAID status.
    ///
    /// Two verification calls racing for the same reference can both see "not found" and both attempt the insert.
    /// The unique constraint on the payment reference is the safety net: the loser's
    /// [`OrderApiError::OrderAlreadyExists`] is treated as "someone else already recorded it" and the call falls
    /// back to the update-or-return-existing path.
    ///
    /// No write happens on any cross-check failure.
    pub async fn reconcile_payment(
        &self,
        claim: &PaymentClaim,
        payment: &VerifiedPayment,
    ) -> Result<Order, PaymentFlowError> {
        if !payment.email.eq_ignore_ascii_case(claim.email.trim()) {
            warn!("🔁️ Email mismatch on payment [{}]. Rejecting verification.", claim.reference);
            return Err(PaymentFlowError::EmailMismatch);
        }
        if payment.amount != claim.amount {
            warn!(
                "🔁️ Amount mismatch on payment [{}]: expected {}, gateway reported {}",
                claim.reference, claim.amount, payment.amount
            );
            return Err(PaymentFlowError::AmountMismatch { expected: claim.amount, reported: payment.amount });
        }
        match self.db.fetch_order_by_reference(&claim.reference).await? {
            Some(order) if order.payment_status == PaymentStatus::Paid => {
                warn!("🔁️ Duplicate payment submission for [{}]. Returning the stored order.", claim.reference);
                Ok(order)
            },
            Some(_) => {
                let order = self.db.mark_order_paid(&claim.reference, payment).await?;
                debug!("🔁️ Pending order [{}] reconciled and marked as paid", claim.reference);
                Ok(order)
            },
            None => self.insert_or_recover(claim, payment).await,
        }
    }

    /// The "no order yet" leg of reconciliation. An `OrderAlreadyExists` from the insert means a concurrent call
    /// won the race after our read, so re-read and settle the surviving row instead.
    async fn insert_or_recover(
        &self,
        claim: &PaymentClaim,
        payment: &VerifiedPayment,
    ) -> Result<Order, PaymentFlowError> {
        let mut order = NewOrder::new(claim.email.clone(), claim.amount, claim.reference.clone());
        if let Some(username) = &claim.username {
            order = order.with_username(username.clone());
        }
        match self.db.insert_paid_order(order, payment).await {
            Ok(order) => {
                debug!("🔁️ Order [{}] created directly as paid", claim.reference);
                Ok(order)
            },
            Err(OrderApiError::OrderAlreadyExists(reference)) => {
                info!("🔁️ Lost the creation race for [{reference}]. Settling against the surviving record.");
                let existing = self
                    .db
                    .fetch_order_by_reference(&reference)
                    .await?
                    .ok_or(OrderApiError::OrderNotFound(reference.clone()))?;
                if existing.payment_status == PaymentStatus::Paid {
                    Ok(existing)
                } else {
                    Ok(self.db.mark_order_paid(&reference, payment).await?)
                }
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Reserve an order reference before payment begins (checkout start).
    ///
    /// If the order carries a caller-supplied reference that already exists, the backend's
    /// [`OrderApiError::OrderAlreadyExists`] surfaces unchanged; the caller maps it to a conflict.
    pub async fn create_pending_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let order = self.db.insert_pending_order(order).await?;
        debug!("🔁️ Pending order [{}] created for {}", order.payment_reference, order.email);
        Ok(order)
    }

    /// All orders belonging to the given email, newest first.
    pub async fn orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError> {
        self.db.fetch_orders_for_email(&normalize_email(email)).await
    }

}
