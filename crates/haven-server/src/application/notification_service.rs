//! Notification Application Service
//!
//! Builds rent-paid notices off the payment's denormalized contact fields
//! and hands them to the notifier. Runs as the `notify.rent_paid` job.

use std::sync::Arc;
use uuid::Uuid;

use haven::domain::DomainError;
use haven::ports::{Notifier, PaymentRepository, RentPaidNotice};

pub struct NotificationService<Pay: PaymentRepository> {
    payments: Arc<Pay>,
    notifier: Arc<dyn Notifier>,
}

impl<Pay: PaymentRepository> NotificationService<Pay> {
    pub fn new(payments: Arc<Pay>, notifier: Arc<dyn Notifier>) -> Self {
        Self { payments, notifier }
    }

    /// Job handler for `notify.rent_paid`.
    pub async fn rent_paid(&self, payment_id: Uuid) -> Result<(), DomainError> {
        let payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("PaymentTransaction", payment_id))?;

        self.notifier
            .rent_paid(&RentPaidNotice {
                tenant_name: payment.tenant_name,
                tenant_phone: payment.tenant_phone,
                landlord_name: payment.landlord_name,
                landlord_phone: payment.landlord_phone,
                landlord_email: payment.landlord_email,
                amount_kobo: payment.amount_kobo,
                currency: payment.currency,
            })
            .await
    }
}
