use crate::domain::bank::BankDetail;
use crate::domain::component::{AppliedComponent, ComponentId};
use crate::domain::pay_run::{
    PayRun, PayRunId, PayRunStatus, Period, RUN_IN_PROGRESS_MESSAGE, RUN_SUCCESS_LOG, RunGate,
};
use crate::domain::payee::{self, Payee, PayeeId};
use crate::domain::ports::{
    BankDetailStoreBox, ComponentStoreBox, PayRunStoreBox, PayeeStoreBox, PaymentStoreBox,
    RegisterStoreBox,
};
use crate::domain::register::PayRecordRegister;
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// Outcome of the "run" admin action for a run that passed its guards.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RunOutcome {
    /// The run qualifies; the caller should hand `pay_run` to [`PayRunEngine::execute`].
    Started { pay_run: PayRunId, message: String },
    /// A worker is already processing this run.
    InProgress { message: String },
    /// No active payee has acknowledged bank details; the run was rejected
    /// instead of started.
    NoEligiblePayees { message: String },
}

/// Orchestrates the pay-run lifecycle: creation, the run/approve/reject
/// admin actions, the background worker sweep, and post-hoc ledger edits.
///
/// It owns the storage ports and processes payees sequentially; storage
/// operations are awaited per record so partial failure leaves partial
/// results plus a diagnostic log rather than a rollback.
pub struct PayRunEngine {
    payees: PayeeStoreBox,
    bank_details: BankDetailStoreBox,
    payments: PaymentStoreBox,
    components: ComponentStoreBox,
    pay_runs: PayRunStoreBox,
    registers: RegisterStoreBox,
}

impl PayRunEngine {
    pub fn new(
        payees: PayeeStoreBox,
        bank_details: BankDetailStoreBox,
        payments: PaymentStoreBox,
        components: ComponentStoreBox,
        pay_runs: PayRunStoreBox,
        registers: RegisterStoreBox,
    ) -> Self {
        Self {
            payees,
            bank_details,
            payments,
            components,
            pay_runs,
            registers,
        }
    }

    /// Creates the next pay run. Refused while a live run exists; after an
    /// approved run the new run covers the next period, after a rejected run
    /// it retakes the same period, and the supplied period is used only for
    /// the very first run.
    pub async fn create_pay_run(&self, period: Period, created_by: &str) -> Result<PayRun> {
        let period = match self.pay_runs.latest().await? {
            Some(latest) if latest.status.is_live() => {
                return Err(PayrollError::Action(format!(
                    "A pay run already exists with the status '{}'. Please \
                     finish the existing pay run before creating a new one.",
                    latest.status
                )));
            }
            Some(latest) if latest.status == PayRunStatus::Approved => latest.period.next(),
            Some(latest) => latest.period,
            None => period,
        };

        let run = self.pay_runs.create(period, created_by).await?;
        info!(pay_run = run.id, period = %run.period, "Pay run created");
        Ok(run)
    }

    /// The "run" admin action. Verifies the selection, gates on the run's
    /// state, and checks that at least one active payee has acknowledged
    /// bank details; with none the run is rejected on the spot.
    pub async fn start_run(&self, selection: &[PayRunId]) -> Result<RunOutcome> {
        let run = self.select_latest(selection).await?;

        match run.gate_run()? {
            RunGate::AlreadyInProgress => {
                return Ok(RunOutcome::InProgress {
                    message: RUN_IN_PROGRESS_MESSAGE.to_string(),
                });
            }
            RunGate::Ready => {}
        }

        if !self.any_payee_with_acknowledged_bank().await? {
            self.pay_runs
                .transition(run.id, PayRunStatus::Due, PayRunStatus::Rejected)
                .await?;
            warn!(pay_run = run.id, "No eligible payees; pay run rejected");
            return Ok(RunOutcome::NoEligiblePayees {
                message: "No active payees found with acknowledged bank \
                          details. Please check and try again."
                    .to_string(),
            });
        }

        Ok(RunOutcome::Started {
            pay_run: run.id,
            message: "Your pay run has been successfully started and is \
                      currently being processed."
                .to_string(),
        })
    }

    /// The background worker. Exits silently (logging only) when the run no
    /// longer qualifies; the `Due → InProgress` compare-and-swap is the sole
    /// re-entrancy guard, taken before any heavy work.
    pub async fn execute(&self, pay_run_id: PayRunId) -> Result<()> {
        info!(pay_run = pay_run_id, "Starting pay run processing");

        let Some(run) = self.pay_runs.get(pay_run_id).await? else {
            error!(pay_run = pay_run_id, "PayRun does not exist");
            return Ok(());
        };
        if !self
            .pay_runs
            .transition(run.id, PayRunStatus::Due, PayRunStatus::InProgress)
            .await?
        {
            warn!(
                pay_run = run.id,
                status = %run.status,
                "PayRun is not in Due status, skipping"
            );
            return Ok(());
        }

        let eligible = payee::eligible(self.payees.all().await?);
        if eligible.is_empty() {
            self.pay_runs
                .set_error_log(
                    run.id,
                    "No active payees found with acknowledged bank details. \
                     Please check and try again."
                        .to_string(),
                )
                .await?;
            self.pay_runs
                .transition(run.id, PayRunStatus::InProgress, PayRunStatus::Rejected)
                .await?;
            warn!(pay_run = run.id, "No eligible payees; pay run rejected");
            return Ok(());
        }

        let mut error_log: Vec<String> = Vec::new();
        for payee in &eligible {
            debug!(pay_run = run.id, payee = payee.id, "Processing payee");
            if let Err(e) = self.process_payee(&run, payee).await {
                match e {
                    PayrollError::Action(reason) => error_log.push(reason),
                    other => {
                        // Unexpected failures are logged, not fatal: the
                        // sweep is best effort.
                        error!(pay_run = run.id, payee = payee.id, error = %other,
                               "Unexpected error processing payee");
                        error_log.push(format!("{} - {}", payee.full_name, other));
                    }
                }
            }
        }

        let log = if error_log.is_empty() {
            RUN_SUCCESS_LOG.to_string()
        } else {
            error_log.join("\n")
        };
        self.pay_runs.set_error_log(run.id, log).await?;

        self.pay_runs
            .transition(run.id, PayRunStatus::InProgress, PayRunStatus::Completed)
            .await?;
        info!(pay_run = run.id, "Pay run processing completed");
        Ok(())
    }

    async fn process_payee(&self, run: &PayRun, payee: &Payee) -> Result<()> {
        let Some(bank_detail) = self.bank_details.acknowledged_for(payee.id).await? else {
            return Err(PayrollError::Action(format!(
                "{} - Missing acknowledged bank details",
                payee.full_name
            )));
        };
        let Some(payment) = self.payments.for_payee(payee.id).await? else {
            return Err(PayrollError::Action(format!(
                "{} - No payment data available",
                payee.full_name
            )));
        };

        // Idempotent under repetition: a payee already recorded in this run
        // is skipped, never duplicated.
        if self.registers.exists(payee.id, run.id).await? {
            debug!(pay_run = run.id, payee = payee.id, "Register row exists, skipping");
            return Ok(());
        }

        let record = PayRecordRegister::compute(run.id, payee, &bank_detail, &payment);
        self.registers.insert(record).await?;
        info!(pay_run = run.id, payee = %payee.full_name, "Register row created");
        Ok(())
    }

    /// The "approve" admin action; permitted only from `Completed`.
    pub async fn approve(&self, selection: &[PayRunId]) -> Result<String> {
        let run = self.select_latest(selection).await?;
        run.gate_approve()?;

        if !self
            .pay_runs
            .transition(run.id, PayRunStatus::Completed, PayRunStatus::Approved)
            .await?
        {
            return Err(PayrollError::Action(
                "The pay run status has changed. Please refresh and try again.".to_string(),
            ));
        }
        info!(pay_run = run.id, "Pay run approved");
        Ok("Pay records have been approved successfully.".to_string())
    }

    /// The "reject" admin action; permitted from every state except `Rejected`.
    pub async fn reject(&self, selection: &[PayRunId]) -> Result<String> {
        let run = self.select_latest(selection).await?;
        run.gate_reject()?;

        if !self
            .pay_runs
            .transition(run.id, run.status, PayRunStatus::Rejected)
            .await?
        {
            return Err(PayrollError::Action(
                "The pay run status has changed. Please refresh and try again.".to_string(),
            ));
        }
        info!(pay_run = run.id, "Pay run rejected");
        Ok("The pay run entry has been rejected.".to_string())
    }

    /// Saves the component-value set of one ledger record and recomputes its
    /// gross and net pay. An approved run's records are immutable.
    pub async fn attach_component_values(
        &self,
        pay_run_id: PayRunId,
        payee_id: PayeeId,
        values: &[(ComponentId, Decimal)],
    ) -> Result<PayRecordRegister> {
        let run = self
            .pay_runs
            .get(pay_run_id)
            .await?
            .ok_or_else(|| PayrollError::NotFound(format!("PayRun {pay_run_id}")))?;
        if run.status == PayRunStatus::Approved {
            return Err(PayrollError::Action(
                "Pay records cannot be modified after the pay run has been approved.".to_string(),
            ));
        }

        let mut record = self
            .registers
            .get(payee_id, pay_run_id)
            .await?
            .ok_or_else(|| {
                PayrollError::NotFound(format!(
                    "Register row for payee {payee_id} in pay run {pay_run_id}"
                ))
            })?;

        let mut applied = Vec::with_capacity(values.len());
        for (component_id, value) in values {
            let component = self
                .components
                .get(*component_id)
                .await?
                .ok_or_else(|| PayrollError::NotFound(format!("Component {component_id}")))?;
            applied.push(AppliedComponent {
                component,
                value: *value,
            });
        }

        record.apply_components(applied);
        self.registers.update(record.clone()).await?;
        info!(
            pay_run = pay_run_id,
            payee = payee_id,
            gross = %record.gross_amount,
            net = %record.net_income,
            "Register row recomputed"
        );
        Ok(record)
    }

    /// Persists a bank-detail edit, clearing the acknowledgement when any
    /// banking field differs from the previously stored row.
    pub async fn update_bank_detail(&self, detail: BankDetail) -> Result<BankDetail> {
        let previous = self.bank_details.get(detail.payee).await?;
        let reconciled = detail.reconcile(previous.as_ref());
        self.bank_details.store(reconciled.clone()).await?;
        Ok(reconciled)
    }

    /// Records the payee's confirmation of their stored bank details.
    pub async fn acknowledge_bank_detail(&self, payee_id: PayeeId) -> Result<()> {
        let mut detail = self
            .bank_details
            .get(payee_id)
            .await?
            .ok_or_else(|| PayrollError::NotFound(format!("Bank details for payee {payee_id}")))?;
        detail.acknowledge();
        self.bank_details.store(detail).await
    }

    pub async fn pay_run(&self, pay_run_id: PayRunId) -> Result<Option<PayRun>> {
        self.pay_runs.get(pay_run_id).await
    }

    pub async fn registers_for(&self, pay_run_id: PayRunId) -> Result<Vec<PayRecordRegister>> {
        self.registers.for_run(pay_run_id).await
    }

    /// Resolves an admin selection: exactly one run, and it must be the most
    /// recently created one. Anything else fails without touching state.
    async fn select_latest(&self, selection: &[PayRunId]) -> Result<PayRun> {
        if selection.is_empty() {
            return Err(PayrollError::Action(
                "No pay run selected. Please select a pay run entry to proceed.".to_string(),
            ));
        }
        if selection.len() > 1 {
            return Err(PayrollError::Action(
                "Please select only one pay run entry at a time. Multiple \
                 selections are not allowed to ensure accurate processing."
                    .to_string(),
            ));
        }

        let latest = self
            .pay_runs
            .latest()
            .await?
            .ok_or_else(|| PayrollError::NotFound("No pay runs exist".to_string()))?;
        if selection[0] != latest.id {
            return Err(PayrollError::Action(
                "To proceed, please select the most recent pay run entry.".to_string(),
            ));
        }
        Ok(latest)
    }

    async fn any_payee_with_acknowledged_bank(&self) -> Result<bool> {
        for payee in payee::eligible(self.payees.all().await?) {
            if self.bank_details.acknowledged_for(payee.id).await?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
