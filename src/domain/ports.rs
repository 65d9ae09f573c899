use super::bank::BankDetail;
use super::component::{Component, ComponentId};
use super::pay_run::{PayRun, PayRunId, PayRunStatus, Period};
use super::payee::{Payee, PayeeId};
use super::payment::Payment;
use super::register::PayRecordRegister;
use crate::error::Result;
use async_trait::async_trait;

/// Read-only master data for payees.
#[async_trait]
pub trait PayeeStore: Send + Sync {
    async fn get(&self, payee_id: PayeeId) -> Result<Option<Payee>>;
    async fn all(&self) -> Result<Vec<Payee>>;
}

#[async_trait]
pub trait BankDetailStore: Send + Sync {
    async fn get(&self, payee_id: PayeeId) -> Result<Option<BankDetail>>;
    /// The payee's bank detail, only if they have acknowledged it.
    async fn acknowledged_for(&self, payee_id: PayeeId) -> Result<Option<BankDetail>>;
    async fn store(&self, detail: BankDetail) -> Result<()>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn for_payee(&self, payee_id: PayeeId) -> Result<Option<Payment>>;
    async fn store(&self, payment: Payment) -> Result<()>;
}

/// Read-only component configuration.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    async fn get(&self, component_id: ComponentId) -> Result<Option<Component>>;
    async fn all(&self) -> Result<Vec<Component>>;
}

#[async_trait]
pub trait PayRunStore: Send + Sync {
    /// Creates a run in `Due` state, allocating the next id. Ids are
    /// monotonic, so the largest id identifies the latest run.
    async fn create(&self, period: Period, created_by: &str) -> Result<PayRun>;
    async fn get(&self, run_id: PayRunId) -> Result<Option<PayRun>>;
    /// The most recently created run, by id.
    async fn latest(&self) -> Result<Option<PayRun>>;
    /// Compare-and-swap on the status field. Returns false without mutating
    /// anything when the current status is not `from`; this is the mutual
    /// exclusion between admin actions and the background worker.
    async fn transition(
        &self,
        run_id: PayRunId,
        from: PayRunStatus,
        to: PayRunStatus,
    ) -> Result<bool>;
    async fn set_error_log(&self, run_id: PayRunId, error_log: String) -> Result<()>;
}

#[async_trait]
pub trait RegisterStore: Send + Sync {
    /// Inserts a record, enforcing the unique (payee, pay run) key.
    async fn insert(&self, record: PayRecordRegister) -> Result<()>;
    /// Overwrites an existing record, used by the ledger-edit flow.
    async fn update(&self, record: PayRecordRegister) -> Result<()>;
    async fn exists(&self, payee_id: PayeeId, run_id: PayRunId) -> Result<bool>;
    async fn get(&self, payee_id: PayeeId, run_id: PayRunId) -> Result<Option<PayRecordRegister>>;
    async fn for_run(&self, run_id: PayRunId) -> Result<Vec<PayRecordRegister>>;
}

pub type PayeeStoreBox = Box<dyn PayeeStore>;
pub type BankDetailStoreBox = Box<dyn BankDetailStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type ComponentStoreBox = Box<dyn ComponentStore>;
pub type PayRunStoreBox = Box<dyn PayRunStore>;
pub type RegisterStoreBox = Box<dyn RegisterStore>;
