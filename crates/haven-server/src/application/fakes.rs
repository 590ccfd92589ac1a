//! In-memory trait implementations for service tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use haven::domain::*;
use haven::ports::*;

// --- Repositories ---

#[derive(Default)]
pub struct FakeProfileRepository {
    users: Mutex<HashMap<Uuid, User>>,
    profiles: Mutex<HashMap<Uuid, UserProfile>>,
}

impl FakeProfileRepository {
    pub fn insert_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    pub fn insert_profile(&self, profile: UserProfile) {
        self.profiles.lock().unwrap().insert(profile.id, profile);
    }
}

#[async_trait]
impl ProfileRepository for FakeProfileRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn find_profile(&self, profile_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.lock().unwrap().get(&profile_id).cloned())
    }

    async fn find_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile, DomainError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.id, profile.clone());
        Ok(profile.clone())
    }

    async fn set_account_resolution(
        &self,
        profile_id: Uuid,
        provider: PaymentProvider,
        account_name: Option<String>,
        status: VerificationStatus,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(p) = profiles.get_mut(&profile_id) {
            match provider {
                PaymentProvider::Paystack => {
                    p.paystack_account_name = account_name;
                    p.paystack_account_status = status;
                }
                PaymentProvider::Flutterwave => {
                    p.flutterwave_account_name = account_name;
                    p.flutterwave_account_status = status;
                }
                PaymentProvider::NoneYet => {}
            }
        }
        Ok(())
    }

    async fn set_recipient_code(
        &self,
        profile_id: Uuid,
        recipient_code: String,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(p) = profiles.get_mut(&profile_id) {
            if p.paystack_recipient_code.is_none() {
                p.paystack_recipient_code = Some(recipient_code);
            }
        }
        Ok(())
    }

    async fn mark_bvn_verified(
        &self,
        profile_id: Uuid,
        provider: IdentityProvider,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(p) = profiles.get_mut(&profile_id) {
            p.bvn_status = VerificationStatus::Verified;
            p.bvn_provider = provider;
            p.bvn_error = None;
        }
        Ok(())
    }

    async fn mark_bvn_failed(&self, profile_id: Uuid, reason: String) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(p) = profiles.get_mut(&profile_id) {
            p.bvn_status = VerificationStatus::Failed;
            p.bvn_error = Some(reason);
        }
        Ok(())
    }

    async fn mark_nin_verified(
        &self,
        profile_id: Uuid,
        provider: IdentityProvider,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(p) = profiles.get_mut(&profile_id) {
            p.nin_status = VerificationStatus::Verified;
            p.nin_provider = provider;
            p.nin_error = None;
        }
        Ok(())
    }

    async fn mark_nin_failed(&self, profile_id: Uuid, reason: String) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(p) = profiles.get_mut(&profile_id) {
            p.nin_status = VerificationStatus::Failed;
            p.nin_error = Some(reason);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePropertyRepository {
    properties: Mutex<HashMap<Uuid, Property>>,
    images: Mutex<HashMap<Uuid, PropertyImage>>,
    listings: Mutex<HashMap<Uuid, RentalListing>>,
}

#[async_trait]
impl PropertyRepository for FakePropertyRepository {
    async fn find_by_id(&self, property_id: Uuid) -> Result<Option<Property>, DomainError> {
        Ok(self.properties.lock().unwrap().get(&property_id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, DomainError> {
        Ok(self
            .properties
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn save(&self, property: &Property) -> Result<Property, DomainError> {
        self.properties
            .lock()
            .unwrap()
            .insert(property.id, property.clone());
        Ok(property.clone())
    }

    async fn delete(&self, property_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.properties.lock().unwrap().remove(&property_id).is_some())
    }

    async fn find_image(&self, image_id: Uuid) -> Result<Option<PropertyImage>, DomainError> {
        Ok(self.images.lock().unwrap().get(&image_id).cloned())
    }

    async fn save_image(&self, image: &PropertyImage) -> Result<PropertyImage, DomainError> {
        self.images.lock().unwrap().insert(image.id, image.clone());
        Ok(image.clone())
    }

    async fn find_image_by_hash(
        &self,
        property_id: Uuid,
        content_hash: &str,
        exclude_image_id: Uuid,
    ) -> Result<Option<PropertyImage>, DomainError> {
        Ok(self
            .images
            .lock()
            .unwrap()
            .values()
            .find(|i| {
                i.property_id == property_id
                    && i.content_hash.as_deref() == Some(content_hash)
                    && i.id != exclude_image_id
            })
            .cloned())
    }

    async fn set_image_hash(
        &self,
        image_id: Uuid,
        content_hash: &str,
    ) -> Result<(), DomainError> {
        if let Some(i) = self.images.lock().unwrap().get_mut(&image_id) {
            i.content_hash = Some(content_hash.to_string());
        }
        Ok(())
    }

    async fn delete_image(&self, image_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.images.lock().unwrap().remove(&image_id).is_some())
    }

    async fn find_listing(&self, listing_id: Uuid) -> Result<Option<RentalListing>, DomainError> {
        Ok(self.listings.lock().unwrap().get(&listing_id).cloned())
    }

    async fn list_published_listings(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RentalListing>, DomainError> {
        let mut all: Vec<_> = self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.published)
            .cloned()
            .collect();
        all.sort_by_key(|l| std::cmp::Reverse(l.created_at));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn save_listing(&self, listing: &RentalListing) -> Result<RentalListing, DomainError> {
        self.listings
            .lock()
            .unwrap()
            .insert(listing.id, listing.clone());
        Ok(listing.clone())
    }
}

#[derive(Default)]
pub struct FakeTenantRepository {
    tenants: Mutex<HashMap<Uuid, Tenant>>,
    ledger: Mutex<Vec<RentLedgerEntry>>,
}

impl FakeTenantRepository {
    pub fn ledger_entries(&self) -> Vec<RentLedgerEntry> {
        self.ledger.lock().unwrap().clone()
    }
}

#[async_trait]
impl TenantRepository for FakeTenantRepository {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.lock().unwrap().get(&tenant_id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Tenant>, DomainError> {
        Ok(self
            .tenants
            .lock()
            .unwrap()
            .values()
            .find(|t| t.matched_user_id == Some(user_id))
            .cloned())
    }

    async fn list_by_landlord(&self, landlord_id: Uuid) -> Result<Vec<Tenant>, DomainError> {
        Ok(self
            .tenants
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.landlord_id == landlord_id)
            .cloned()
            .collect())
    }

    async fn save(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        self.tenants.lock().unwrap().insert(tenant.id, tenant.clone());
        Ok(tenant.clone())
    }

    async fn set_active(&self, tenant_id: Uuid, is_active: bool) -> Result<(), DomainError> {
        if let Some(t) = self.tenants.lock().unwrap().get_mut(&tenant_id) {
            t.is_active = is_active;
        }
        Ok(())
    }

    async fn append_ledger(
        &self,
        entry: &RentLedgerEntry,
    ) -> Result<RentLedgerEntry, DomainError> {
        self.ledger.lock().unwrap().push(entry.clone());
        Ok(entry.clone())
    }

    async fn ledger_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<RentLedgerEntry>, DomainError> {
        Ok(self
            .ledger
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakePaymentRepository {
    payments: Mutex<HashMap<Uuid, PaymentTransaction>>,
    payouts: Mutex<HashMap<Uuid, LandlordPayout>>,
}

impl FakePaymentRepository {
    pub fn payout_rows(&self) -> Vec<LandlordPayout> {
        self.payouts.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl PaymentRepository for FakePaymentRepository {
    async fn find_by_id(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PaymentTransaction>, DomainError> {
        Ok(self.payments.lock().unwrap().get(&payment_id).cloned())
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<PaymentTransaction>, DomainError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .find(|p| p.provider_reference.as_deref() == Some(reference))
            .cloned())
    }

    async fn save(
        &self,
        payment: &PaymentTransaction,
    ) -> Result<PaymentTransaction, DomainError> {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.id, payment.clone());
        Ok(payment.clone())
    }

    async fn set_reference(&self, payment_id: Uuid, reference: &str) -> Result<(), DomainError> {
        if let Some(p) = self.payments.lock().unwrap().get_mut(&payment_id) {
            p.provider_reference = Some(reference.to_string());
        }
        Ok(())
    }

    async fn update_status_provider(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
        provider: PaymentProvider,
    ) -> Result<(), DomainError> {
        if let Some(p) = self.payments.lock().unwrap().get_mut(&payment_id) {
            p.status = status;
            p.provider = provider;
        }
        Ok(())
    }

    async fn find_payout_by_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<LandlordPayout>, DomainError> {
        Ok(self
            .payouts
            .lock()
            .unwrap()
            .values()
            .find(|p| p.payment_id == payment_id)
            .cloned())
    }

    async fn create_or_get_payout(
        &self,
        payout: &LandlordPayout,
    ) -> Result<LandlordPayout, DomainError> {
        let mut payouts = self.payouts.lock().unwrap();
        if let Some(existing) = payouts.values().find(|p| p.payment_id == payout.payment_id) {
            return Ok(existing.clone());
        }
        payouts.insert(payout.id, payout.clone());
        Ok(payout.clone())
    }

    async fn update_payout_status(
        &self,
        payout_id: Uuid,
        status: PayoutStatus,
    ) -> Result<(), DomainError> {
        if let Some(p) = self.payouts.lock().unwrap().get_mut(&payout_id) {
            p.status = status;
        }
        Ok(())
    }

    async fn set_payout_reference(
        &self,
        payout_id: Uuid,
        provider_reference: &str,
    ) -> Result<(), DomainError> {
        if let Some(p) = self.payouts.lock().unwrap().get_mut(&payout_id) {
            p.provider_reference = Some(provider_reference.to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeReceiptRepository {
    receipts: Mutex<HashMap<Uuid, RentReceipt>>,
}

impl FakeReceiptRepository {
    pub fn rows(&self) -> Vec<RentReceipt> {
        self.receipts.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl ReceiptRepository for FakeReceiptRepository {
    async fn find_by_id(&self, receipt_id: Uuid) -> Result<Option<RentReceipt>, DomainError> {
        Ok(self.receipts.lock().unwrap().get(&receipt_id).cloned())
    }

    async fn find_by_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<RentReceipt>, DomainError> {
        Ok(self
            .receipts
            .lock()
            .unwrap()
            .values()
            .find(|r| r.payment_id == payment_id)
            .cloned())
    }

    async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<RentReceipt>, DomainError> {
        Ok(self
            .receipts
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn create_or_get(&self, receipt: &RentReceipt) -> Result<RentReceipt, DomainError> {
        let mut receipts = self.receipts.lock().unwrap();
        if let Some(existing) = receipts
            .values()
            .find(|r| r.payment_id == receipt.payment_id)
        {
            return Ok(existing.clone());
        }
        receipts.insert(receipt.id, receipt.clone());
        Ok(receipt.clone())
    }

    async fn set_pdf_status(
        &self,
        receipt_id: Uuid,
        status: PdfStatus,
    ) -> Result<(), DomainError> {
        if let Some(r) = self.receipts.lock().unwrap().get_mut(&receipt_id) {
            r.pdf_status = status;
        }
        Ok(())
    }

    async fn set_barcode_reference(
        &self,
        receipt_id: Uuid,
        barcode_reference: &str,
    ) -> Result<(), DomainError> {
        if let Some(r) = self.receipts.lock().unwrap().get_mut(&receipt_id) {
            r.barcode_reference = Some(barcode_reference.to_string());
        }
        Ok(())
    }

    async fn store_artifact(
        &self,
        receipt_id: Uuid,
        storage_public_id: &str,
        pdf_url: &str,
    ) -> Result<(), DomainError> {
        if let Some(r) = self.receipts.lock().unwrap().get_mut(&receipt_id) {
            r.storage_public_id = Some(storage_public_id.to_string());
            r.pdf_url = Some(pdf_url.to_string());
            r.pdf_status = PdfStatus::Ready;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeConversationRepository {
    conversations: Mutex<HashMap<Uuid, Conversation>>,
    messages: Mutex<Vec<ConversationMessage>>,
    history: Mutex<Vec<ViewingHistoryEntry>>,
}

impl FakeConversationRepository {
    pub fn history_rows(&self) -> Vec<ViewingHistoryEntry> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationRepository for FakeConversationRepository {
    async fn find_by_id(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, DomainError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .get(&conversation_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>, DomainError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.tenant_id == user_id || c.landlord_id == user_id)
            .cloned()
            .collect())
    }

    async fn save(&self, conversation: &Conversation) -> Result<Conversation, DomainError> {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id, conversation.clone());
        Ok(conversation.clone())
    }

    async fn save_message(
        &self,
        message: &ConversationMessage,
    ) -> Result<ConversationMessage, DomainError> {
        if let Some(c) = self
            .conversations
            .lock()
            .unwrap()
            .get_mut(&message.conversation_id)
        {
            c.last_activity_at = Utc::now();
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(message.clone())
    }

    async fn list_messages(
        &self,
        conversation_id: Uuid,
    ) -> Result<Vec<ConversationMessage>, DomainError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn set_viewing(
        &self,
        conversation_id: Uuid,
        status: ViewingStatus,
        viewing_date: Option<DateTime<Utc>>,
        set_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        if let Some(c) = self.conversations.lock().unwrap().get_mut(&conversation_id) {
            c.viewing_status = status;
            c.viewing_date = viewing_date;
            c.viewing_set_by = set_by;
            c.last_activity_at = Utc::now();
        }
        Ok(())
    }

    async fn find_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Conversation>, DomainError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_stale(cutoff))
            .cloned()
            .collect())
    }

    async fn log_viewing_change(
        &self,
        entry: &ViewingHistoryEntry,
    ) -> Result<ViewingHistoryEntry, DomainError> {
        self.history.lock().unwrap().push(entry.clone());
        Ok(entry.clone())
    }
}

#[derive(Default)]
pub struct FakeBankRepository {
    banks: Mutex<HashMap<String, Bank>>,
}

#[async_trait]
impl BankRepository for FakeBankRepository {
    async fn upsert(&self, bank: &Bank) -> Result<Bank, DomainError> {
        let mut banks = self.banks.lock().unwrap();
        let merged = match banks.get(&bank.canonical_name) {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.name = bank.name.clone();
                merged.paystack_code = bank
                    .paystack_code
                    .clone()
                    .or(existing.paystack_code.clone());
                merged.flutterwave_code = bank
                    .flutterwave_code
                    .clone()
                    .or(existing.flutterwave_code.clone());
                merged
            }
            None => bank.clone(),
        };
        banks.insert(merged.canonical_name.clone(), merged.clone());
        Ok(merged)
    }

    async fn find_by_canonical(
        &self,
        canonical_name: &str,
    ) -> Result<Option<Bank>, DomainError> {
        Ok(self.banks.lock().unwrap().get(canonical_name).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Bank>, DomainError> {
        let mut all: Vec<_> = self.banks.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.banks.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct FakeIdempotencyRepository {
    records: Mutex<HashMap<(String, Uuid), IdempotencyRecord>>,
}

#[async_trait]
impl IdempotencyRepository for FakeIdempotencyRepository {
    async fn create_or_get(
        &self,
        record: &IdempotencyRecord,
    ) -> Result<(IdempotencyRecord, bool), DomainError> {
        let mut records = self.records.lock().unwrap();
        let key = (record.key.clone(), record.user_id);
        if let Some(existing) = records.get(&key) {
            return Ok((existing.clone(), false));
        }
        records.insert(key, record.clone());
        Ok((record.clone(), true))
    }

    async fn find(
        &self,
        key: &str,
        user_id: Uuid,
    ) -> Result<Option<IdempotencyRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&(key.to_string(), user_id))
            .cloned())
    }

    async fn store_response(
        &self,
        key: &str,
        user_id: Uuid,
        response: &serde_json::Value,
    ) -> Result<(), DomainError> {
        if let Some(r) = self
            .records
            .lock()
            .unwrap()
            .get_mut(&(key.to_string(), user_id))
        {
            r.response = Some(response.clone());
        }
        Ok(())
    }

    async fn delete(&self, key: &str, user_id: Uuid) -> Result<(), DomainError> {
        self.records
            .lock()
            .unwrap()
            .remove(&(key.to_string(), user_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeJobRepository {
    jobs: Mutex<Vec<Job>>,
}

impl FakeJobRepository {
    pub fn queued_kinds(&self) -> Vec<JobKind> {
        self.jobs.lock().unwrap().iter().map(|j| j.kind).collect()
    }

    pub fn rows(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobRepository for FakeJobRepository {
    async fn enqueue(&self, job: &Job) -> Result<bool, DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(key) = &job.dedup_key {
            let live = jobs.iter().any(|j| {
                j.dedup_key.as_ref() == Some(key)
                    && matches!(j.status, JobStatus::Queued | JobStatus::Running)
            });
            if live {
                return Ok(false);
            }
        }
        jobs.push(job.clone());
        Ok(true)
    }

    async fn claim_due(&self, limit: i64) -> Result<Vec<Job>, DomainError> {
        let now = Utc::now();
        let mut jobs = self.jobs.lock().unwrap();
        let mut claimed = Vec::new();
        for job in jobs.iter_mut() {
            if claimed.len() as i64 >= limit {
                break;
            }
            if job.status == JobStatus::Queued && job.run_at <= now {
                job.status = JobStatus::Running;
                job.attempts += 1;
                claimed.push(job.clone());
            }
        }
        Ok(claimed)
    }

    async fn mark_succeeded(&self, job_id: Uuid) -> Result<(), DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(j) = jobs.iter_mut().find(|j| j.id == job_id) {
            j.status = JobStatus::Succeeded;
            j.last_error = None;
        }
        Ok(())
    }

    async fn reschedule(
        &self,
        job_id: Uuid,
        run_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(j) = jobs.iter_mut().find(|j| j.id == job_id) {
            j.status = JobStatus::Queued;
            j.run_at = run_at;
            j.last_error = Some(error.to_string());
        }
        Ok(())
    }

    async fn mark_dead(&self, job_id: Uuid, error: &str) -> Result<(), DomainError> {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(j) = jobs.iter_mut().find(|j| j.id == job_id) {
            j.status = JobStatus::Dead;
            j.last_error = Some(error.to_string());
        }
        Ok(())
    }
}

// --- Service ports ---

#[derive(Default)]
pub struct FakeGateway {
    initialize_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    transfer_calls: AtomicUsize,
    recipient_calls: AtomicUsize,
    verify_result: Mutex<Option<PaymentVerification>>,
    initialize_fails: Mutex<bool>,
    transfer_fails_transient: Mutex<bool>,
    resolve_name: Mutex<Option<String>>,
    banks: Mutex<Vec<GatewayBank>>,
}

impl FakeGateway {
    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn transfer_calls(&self) -> usize {
        self.transfer_calls.load(Ordering::SeqCst)
    }

    pub fn recipient_calls(&self) -> usize {
        self.recipient_calls.load(Ordering::SeqCst)
    }

    pub fn set_verify_success(&self, amount_kobo: i64) {
        *self.verify_result.lock().unwrap() = Some(PaymentVerification {
            success: true,
            amount_kobo,
            currency: "NGN".into(),
            provider_reference: None,
        });
    }

    pub fn set_verify_failed(&self) {
        *self.verify_result.lock().unwrap() = Some(PaymentVerification::failed());
    }

    pub fn set_initialize_failure(&self, fails: bool) {
        *self.initialize_fails.lock().unwrap() = fails;
    }

    pub fn set_transfer_transient_failure(&self, fails: bool) {
        *self.transfer_fails_transient.lock().unwrap() = fails;
    }

    pub fn set_resolve_name(&self, name: &str) {
        *self.resolve_name.lock().unwrap() = Some(name.to_string());
    }

    pub fn set_banks(&self, banks: Vec<GatewayBank>) {
        *self.banks.lock().unwrap() = banks;
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Paystack
    }

    async fn initialize_payment(
        &self,
        _email: &str,
        _amount_kobo: i64,
        reference: &str,
    ) -> Result<InitializedPayment, DomainError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if *self.initialize_fails.lock().unwrap() {
            return Err(DomainError::provider_unreachable("gateway down"));
        }
        Ok(InitializedPayment {
            authorization_url: format!("https://pay.example.com/{reference}"),
            reference: reference.to_string(),
        })
    }

    async fn verify_payment(
        &self,
        _reference: &str,
    ) -> Result<PaymentVerification, DomainError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .verify_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(PaymentVerification::failed))
    }

    async fn resolve_account(
        &self,
        account_number: &str,
        _bank_code: &str,
    ) -> Result<ResolvedAccount, DomainError> {
        match self.resolve_name.lock().unwrap().clone() {
            Some(name) => Ok(ResolvedAccount {
                account_number: account_number.to_string(),
                account_name: name,
            }),
            None => Err(DomainError::provider_rejected("could not resolve account")),
        }
    }

    async fn create_transfer_recipient(
        &self,
        _name: &str,
        _account_number: &str,
        _bank_code: &str,
    ) -> Result<String, DomainError> {
        self.recipient_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("RCP_{}", self.recipient_calls.load(Ordering::SeqCst)))
    }

    async fn transfer(
        &self,
        _amount_kobo: i64,
        _destination: &PayoutDestination,
        reference: &str,
        _reason: &str,
    ) -> Result<TransferReceipt, DomainError> {
        self.transfer_calls.fetch_add(1, Ordering::SeqCst);
        if *self.transfer_fails_transient.lock().unwrap() {
            return Err(DomainError::provider_unreachable("gateway timeout"));
        }
        Ok(TransferReceipt {
            reference: reference.to_string(),
            status: "success".into(),
        })
    }

    async fn list_banks(&self) -> Result<Vec<GatewayBank>, DomainError> {
        Ok(self.banks.lock().unwrap().clone())
    }
}

pub struct FakeVerifier {
    provider: IdentityProvider,
    result: Mutex<Result<VerifiedIdentity, DomainError>>,
    calls: AtomicUsize,
}

impl FakeVerifier {
    pub fn verified(provider: IdentityProvider, first_name: &str, last_name: &str) -> Self {
        Self {
            provider,
            result: Mutex::new(Ok(VerifiedIdentity {
                verified: true,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(provider: IdentityProvider) -> Self {
        Self {
            provider,
            result: Mutex::new(Ok(VerifiedIdentity {
                verified: false,
                first_name: String::new(),
                last_name: String::new(),
            })),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable(provider: IdentityProvider) -> Self {
        Self {
            provider,
            result: Mutex::new(Err(DomainError::provider_unreachable("kyc down"))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self) -> Result<VerifiedIdentity, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.result.lock().unwrap() {
            Ok(v) => Ok(v.clone()),
            Err(DomainError::ExternalService { message, retryable }) => {
                Err(DomainError::ExternalService {
                    message: message.clone(),
                    retryable: *retryable,
                })
            }
            Err(_) => Err(DomainError::provider_unreachable("kyc down")),
        }
    }
}

#[async_trait]
impl IdentityVerifier for FakeVerifier {
    fn provider(&self) -> IdentityProvider {
        self.provider
    }

    async fn verify_bvn(&self, _bvn: &str) -> Result<VerifiedIdentity, DomainError> {
        self.answer()
    }

    async fn verify_nin(&self, _nin: &str) -> Result<VerifiedIdentity, DomainError> {
        self.answer()
    }
}

#[derive(Default)]
pub struct FakeDocumentStore {
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
    deleted: Mutex<Vec<String>>,
    fetchable: Mutex<HashMap<String, Vec<u8>>>,
    upload_fails: Mutex<bool>,
}

impl FakeDocumentStore {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn set_upload_fails(&self, fails: bool) {
        *self.upload_fails.lock().unwrap() = fails;
    }

    pub fn set_fetchable(&self, url: &str, bytes: Vec<u8>) {
        self.fetchable
            .lock()
            .unwrap()
            .insert(url.to_string(), bytes);
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn upload_pdf(
        &self,
        bytes: &[u8],
        public_id: &str,
    ) -> Result<StoredDocument, DomainError> {
        if *self.upload_fails.lock().unwrap() {
            return Err(DomainError::provider_unreachable("store down"));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((public_id.to_string(), bytes.to_vec()));
        Ok(StoredDocument {
            public_id: public_id.to_string(),
            url: format!("https://media.example.com/{public_id}"),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        self.fetchable
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::provider_unreachable("object missing"))
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    notices: Mutex<Vec<RentPaidNotice>>,
}

impl FakeNotifier {
    pub fn sent(&self) -> Vec<RentPaidNotice> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn rent_paid(&self, notice: &RentPaidNotice) -> Result<(), DomainError> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}
