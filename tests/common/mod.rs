#![allow(dead_code)]

use payrun::application::engine::PayRunEngine;
use payrun::domain::bank::BankDetail;
use payrun::domain::payee::{Lifecycle, Payee, PayeeId, PayeeStatus, TdsRate};
use payrun::domain::payment::Payment;
use payrun::domain::ports::{BankDetailStore, PaymentStore};
use payrun::infrastructure::in_memory::{
    InMemoryBankDetailStore, InMemoryComponentStore, InMemoryPayRunStore, InMemoryPayeeStore,
    InMemoryPaymentStore, InMemoryRegisterStore,
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// An engine wired to in-memory stores, with handles kept for seeding.
pub struct TestWorld {
    pub engine: PayRunEngine,
    pub payees: InMemoryPayeeStore,
    pub bank_details: InMemoryBankDetailStore,
    pub payments: InMemoryPaymentStore,
    pub components: InMemoryComponentStore,
    pub pay_runs: InMemoryPayRunStore,
    pub registers: InMemoryRegisterStore,
}

pub fn world() -> TestWorld {
    let payees = InMemoryPayeeStore::new();
    let bank_details = InMemoryBankDetailStore::new();
    let payments = InMemoryPaymentStore::new();
    let components = InMemoryComponentStore::new();
    let pay_runs = InMemoryPayRunStore::new();
    let registers = InMemoryRegisterStore::new();
    let engine = PayRunEngine::new(
        Box::new(payees.clone()),
        Box::new(bank_details.clone()),
        Box::new(payments.clone()),
        Box::new(components.clone()),
        Box::new(pay_runs.clone()),
        Box::new(registers.clone()),
    );
    TestWorld {
        engine,
        payees,
        bank_details,
        payments,
        components,
        pay_runs,
        registers,
    }
}

pub fn payee(id: PayeeId, name: &str, tds_percentage: Option<Decimal>) -> Payee {
    Payee {
        id,
        full_name: name.to_string(),
        email: format!("payee{id}@example.com"),
        status: PayeeStatus::Active,
        lifecycle: Lifecycle::Active,
        tds_rate: tds_percentage.map(|pct| TdsRate::new("Standard", pct).unwrap()),
    }
}

pub fn bank_detail(payee: PayeeId, acknowledged: bool) -> BankDetail {
    BankDetail {
        payee,
        bank_name: "State Bank".to_string(),
        account_number: format!("00011122{payee}"),
        account_holder_name: format!("Holder {payee}"),
        account_type: "savings".to_string(),
        ifsc_code: "SBIN0001".to_string(),
        micr_code: "400002003".to_string(),
        swift_code: "SBININBB".to_string(),
        branch_address: "MG Road".to_string(),
        acknowledged,
    }
}

impl TestWorld {
    /// Seeds a payee that satisfies every run precondition.
    pub async fn seed_payable(&self, id: PayeeId, name: &str, amount: Decimal, tds: Decimal) {
        self.payees.seed(payee(id, name, Some(tds))).await;
        self.bank_details
            .store(bank_detail(id, true))
            .await
            .unwrap();
        self.payments
            .store(Payment::new(id, amount, None).unwrap())
            .await
            .unwrap();
    }
}

/// Writes the three CLI fixture files into `dir`.
pub fn write_fixtures(dir: &Path, acknowledged: bool) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(File::create(dir.join("payees.csv"))?);
    wtr.write_record([
        "id",
        "full_name",
        "email",
        "status",
        "lifecycle",
        "tds_name",
        "tds_percentage",
    ])?;
    wtr.write_record([
        "1",
        "Asha Rao",
        "asha@example.com",
        "active",
        "active",
        "Standard",
        "10.00",
    ])?;
    wtr.write_record([
        "2",
        "Vikram Iyer",
        "vikram@example.com",
        "removed",
        "active",
        "",
        "",
    ])?;
    wtr.flush()?;

    let mut wtr = csv::Writer::from_writer(File::create(dir.join("bank_details.csv"))?);
    wtr.write_record([
        "payee",
        "bank_name",
        "account_number",
        "account_holder_name",
        "account_type",
        "ifsc_code",
        "micr_code",
        "swift_code",
        "branch_address",
        "acknowledged",
    ])?;
    wtr.write_record([
        "1",
        "State Bank",
        "000111221",
        "Asha Rao",
        "savings",
        "SBIN0001",
        "400002003",
        "SBININBB",
        "MG Road",
        if acknowledged { "true" } else { "false" },
    ])?;
    wtr.flush()?;

    let mut wtr = csv::Writer::from_writer(File::create(dir.join("payments.csv"))?);
    wtr.write_record(["payee", "amount", "label"])?;
    wtr.write_record(["1", "50000.00", "Base salary"])?;
    wtr.flush()?;

    Ok(())
}
