use crate::domain::bank::BankDetail;
use crate::domain::component::{Component, ComponentId};
use crate::domain::pay_run::{PayRun, PayRunId, PayRunStatus, Period};
use crate::domain::payee::{Payee, PayeeId};
use crate::domain::payment::Payment;
use crate::domain::ports::{
    BankDetailStore, ComponentStore, PayRunStore, PayeeStore, PaymentStore, RegisterStore,
};
use crate::domain::register::PayRecordRegister;
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory payee master data, standing in for the external HR data store.
#[derive(Default, Clone)]
pub struct InMemoryPayeeStore {
    payees: Arc<RwLock<HashMap<PayeeId, Payee>>>,
}

impl InMemoryPayeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a payee record. Master data is read-only from the engine's
    /// perspective, so seeding is not part of the `PayeeStore` port.
    pub async fn seed(&self, payee: Payee) {
        self.payees.write().await.insert(payee.id, payee);
    }
}

#[async_trait]
impl PayeeStore for InMemoryPayeeStore {
    async fn get(&self, payee_id: PayeeId) -> Result<Option<Payee>> {
        Ok(self.payees.read().await.get(&payee_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Payee>> {
        let mut payees: Vec<Payee> = self.payees.read().await.values().cloned().collect();
        payees.sort_by_key(|p| p.id);
        Ok(payees)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryBankDetailStore {
    details: Arc<RwLock<HashMap<PayeeId, BankDetail>>>,
}

impl InMemoryBankDetailStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BankDetailStore for InMemoryBankDetailStore {
    async fn get(&self, payee_id: PayeeId) -> Result<Option<BankDetail>> {
        Ok(self.details.read().await.get(&payee_id).cloned())
    }

    async fn acknowledged_for(&self, payee_id: PayeeId) -> Result<Option<BankDetail>> {
        Ok(self
            .details
            .read()
            .await
            .get(&payee_id)
            .filter(|detail| detail.acknowledged)
            .cloned())
    }

    async fn store(&self, detail: BankDetail) -> Result<()> {
        self.details.write().await.insert(detail.payee, detail);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<PayeeId, Payment>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn for_payee(&self, payee_id: PayeeId) -> Result<Option<Payment>> {
        Ok(self.payments.read().await.get(&payee_id).cloned())
    }

    async fn store(&self, payment: Payment) -> Result<()> {
        // One active payment per payee: a new one replaces the old.
        self.payments.write().await.insert(payment.payee, payment);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryComponentStore {
    components: Arc<RwLock<HashMap<ComponentId, Component>>>,
}

impl InMemoryComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, component: Component) {
        self.components
            .write()
            .await
            .insert(component.id, component);
    }
}

#[async_trait]
impl ComponentStore for InMemoryComponentStore {
    async fn get(&self, component_id: ComponentId) -> Result<Option<Component>> {
        Ok(self.components.read().await.get(&component_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Component>> {
        let mut components: Vec<Component> =
            self.components.read().await.values().cloned().collect();
        components.sort_by_key(|c| c.id);
        Ok(components)
    }
}

/// Pay runs in creation order. Ids are allocated monotonically under the
/// write lock, so `latest` is an indexed lookup rather than a guess about
/// insertion order.
#[derive(Default, Clone)]
pub struct InMemoryPayRunStore {
    runs: Arc<RwLock<Vec<PayRun>>>,
}

impl InMemoryPayRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayRunStore for InMemoryPayRunStore {
    async fn create(&self, period: Period, created_by: &str) -> Result<PayRun> {
        let mut runs = self.runs.write().await;
        let run = PayRun {
            id: runs.len() as PayRunId + 1,
            period,
            status: PayRunStatus::Due,
            created_by: created_by.to_string(),
            error_log: None,
        };
        runs.push(run.clone());
        Ok(run)
    }

    async fn get(&self, run_id: PayRunId) -> Result<Option<PayRun>> {
        Ok(self
            .runs
            .read()
            .await
            .iter()
            .find(|run| run.id == run_id)
            .cloned())
    }

    async fn latest(&self) -> Result<Option<PayRun>> {
        Ok(self
            .runs
            .read()
            .await
            .iter()
            .max_by_key(|run| run.id)
            .cloned())
    }

    async fn transition(
        &self,
        run_id: PayRunId,
        from: PayRunStatus,
        to: PayRunStatus,
    ) -> Result<bool> {
        let mut runs = self.runs.write().await;
        let run = runs
            .iter_mut()
            .find(|run| run.id == run_id)
            .ok_or_else(|| PayrollError::NotFound(format!("PayRun {run_id}")))?;
        if run.status != from {
            return Ok(false);
        }
        run.status = to;
        Ok(true)
    }

    async fn set_error_log(&self, run_id: PayRunId, error_log: String) -> Result<()> {
        let mut runs = self.runs.write().await;
        let run = runs
            .iter_mut()
            .find(|run| run.id == run_id)
            .ok_or_else(|| PayrollError::NotFound(format!("PayRun {run_id}")))?;
        run.error_log = Some(error_log);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryRegisterStore {
    records: Arc<RwLock<HashMap<(PayeeId, PayRunId), PayRecordRegister>>>,
}

impl InMemoryRegisterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegisterStore for InMemoryRegisterStore {
    async fn insert(&self, record: PayRecordRegister) -> Result<()> {
        let mut records = self.records.write().await;
        let key = (record.payee, record.pay_run);
        if records.contains_key(&key) {
            return Err(PayrollError::Validation(format!(
                "Register row already exists for payee {} in pay run {}",
                record.payee, record.pay_run
            )));
        }
        records.insert(key, record);
        Ok(())
    }

    async fn update(&self, record: PayRecordRegister) -> Result<()> {
        let mut records = self.records.write().await;
        let key = (record.payee, record.pay_run);
        if !records.contains_key(&key) {
            return Err(PayrollError::NotFound(format!(
                "Register row for payee {} in pay run {}",
                record.payee, record.pay_run
            )));
        }
        records.insert(key, record);
        Ok(())
    }

    async fn exists(&self, payee_id: PayeeId, run_id: PayRunId) -> Result<bool> {
        Ok(self
            .records
            .read()
            .await
            .contains_key(&(payee_id, run_id)))
    }

    async fn get(&self, payee_id: PayeeId, run_id: PayRunId) -> Result<Option<PayRecordRegister>> {
        Ok(self.records.read().await.get(&(payee_id, run_id)).cloned())
    }

    async fn for_run(&self, run_id: PayRunId) -> Result<Vec<PayRecordRegister>> {
        let records = self.records.read().await;
        let mut rows: Vec<PayRecordRegister> = records
            .values()
            .filter(|record| record.pay_run == run_id)
            .cloned()
            .collect();
        rows.sort_by_key(|record| record.payee);
        Ok(rows)
    }
}
