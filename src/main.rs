use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use payrun::application::engine::{PayRunEngine, RunOutcome};
use payrun::domain::pay_run::Period;
use payrun::error::PayrollError;
use payrun::domain::ports::{
    BankDetailStore, BankDetailStoreBox, ComponentStoreBox, PayRunStoreBox, PayeeStoreBox,
    PaymentStore, PaymentStoreBox, RegisterStoreBox,
};
use payrun::infrastructure::in_memory::{
    InMemoryBankDetailStore, InMemoryComponentStore, InMemoryPayRunStore, InMemoryPayeeStore,
    InMemoryPaymentStore, InMemoryRegisterStore,
};
use payrun::interfaces::csv::readers::{
    BankDetailReader, ComponentReader, PayeeReader, PaymentReader,
};
use payrun::interfaces::csv::register_writer::{self, RegisterWriter};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payee master data CSV file
    #[arg(long)]
    payees: PathBuf,

    /// Bank details CSV file
    #[arg(long)]
    bank_details: PathBuf,

    /// Payment configuration CSV file
    #[arg(long)]
    payments: PathBuf,

    /// Component configuration CSV file
    #[arg(long)]
    components: Option<PathBuf>,

    /// Payroll month (1-12)
    #[arg(long)]
    month: u8,

    /// Payroll year
    #[arg(long)]
    year: u16,

    /// Name recorded as the run's creator
    #[arg(long, default_value = "admin")]
    created_by: String,

    /// Output format for the pay register
    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the register.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let payees = InMemoryPayeeStore::new();
    let bank_details = InMemoryBankDetailStore::new();
    let payments = InMemoryPaymentStore::new();
    let components = InMemoryComponentStore::new();

    let file = File::open(&cli.payees).into_diagnostic()?;
    for result in PayeeReader::new(file).payees() {
        match result {
            Ok(payee) => payees.seed(payee).await,
            Err(e) => eprintln!("Error reading payee: {}", e),
        }
    }

    let file = File::open(&cli.bank_details).into_diagnostic()?;
    for result in BankDetailReader::new(file).bank_details() {
        match result {
            Ok(detail) => bank_details.store(detail).await.into_diagnostic()?,
            Err(e) => eprintln!("Error reading bank detail: {}", e),
        }
    }

    let file = File::open(&cli.payments).into_diagnostic()?;
    for result in PaymentReader::new(file).payments() {
        match result {
            Ok(payment) => payments.store(payment).await.into_diagnostic()?,
            Err(e) => eprintln!("Error reading payment: {}", e),
        }
    }

    if let Some(path) = &cli.components {
        let file = File::open(path).into_diagnostic()?;
        for result in ComponentReader::new(file).components() {
            match result {
                Ok(component) => components.seed(component).await,
                Err(e) => eprintln!("Error reading component: {}", e),
            }
        }
    }

    let payee_store: PayeeStoreBox = Box::new(payees);
    let bank_store: BankDetailStoreBox = Box::new(bank_details);
    let payment_store: PaymentStoreBox = Box::new(payments);
    let component_store: ComponentStoreBox = Box::new(components);
    let pay_run_store: PayRunStoreBox = Box::new(InMemoryPayRunStore::new());
    let register_store: RegisterStoreBox = Box::new(InMemoryRegisterStore::new());

    let engine = PayRunEngine::new(
        payee_store,
        bank_store,
        payment_store,
        component_store,
        pay_run_store,
        register_store,
    );

    let period = Period::new(cli.month, cli.year).into_diagnostic()?;
    let run = engine
        .create_pay_run(period, &cli.created_by)
        .await
        .into_diagnostic()?;

    match engine.start_run(&[run.id]).await.into_diagnostic()? {
        RunOutcome::Started { pay_run, message } => {
            info!("{message}");
            engine.execute(pay_run).await.into_diagnostic()?;
        }
        RunOutcome::InProgress { message } | RunOutcome::NoEligiblePayees { message } => {
            eprintln!("{}", message);
        }
    }

    let run = engine
        .pay_run(run.id)
        .await
        .into_diagnostic()?
        .ok_or_else(|| PayrollError::NotFound(format!("PayRun {}", run.id)))
        .into_diagnostic()?;
    eprintln!("Pay run {} for {}: {}", run.id, run.period, run.status);
    if let Some(log) = &run.error_log {
        eprintln!("{}", log);
    }

    let records = engine.registers_for(run.id).await.into_diagnostic()?;
    match cli.format {
        OutputFormat::Csv => {
            let stdout = io::stdout();
            let mut writer = RegisterWriter::new(stdout.lock());
            writer.write_records(&records).into_diagnostic()?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&register_writer::rows(&records))
                .into_diagnostic()?;
            println!("{}", json);
        }
    }

    Ok(())
}
