use crate::domain::bank::BankDetail;
use crate::domain::component::Component;
use crate::domain::payee::{Lifecycle, Payee, PayeeId, PayeeStatus, TdsRate};
use crate::domain::payment::Payment;
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

#[derive(Debug, Deserialize)]
struct PayeeRow {
    id: PayeeId,
    full_name: String,
    email: String,
    status: PayeeStatus,
    lifecycle: Lifecycle,
    tds_name: Option<String>,
    tds_percentage: Option<Decimal>,
}

impl PayeeRow {
    fn into_payee(self) -> Result<Payee> {
        let tds_rate = self
            .tds_percentage
            .map(|percentage| {
                TdsRate::new(
                    self.tds_name.clone().unwrap_or_else(|| "TDS".to_string()),
                    percentage,
                )
            })
            .transpose()?;
        Ok(Payee {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            status: self.status,
            lifecycle: self.lifecycle,
            tds_rate,
        })
    }
}

/// Reads payee master data from a CSV source.
pub struct PayeeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PayeeReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: csv_reader(source),
        }
    }

    pub fn payees(self) -> impl Iterator<Item = Result<Payee>> {
        self.reader.into_deserialize().map(|row| {
            row.map_err(PayrollError::from)
                .and_then(PayeeRow::into_payee)
        })
    }
}

/// Reads bank details from a CSV source.
pub struct BankDetailReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BankDetailReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: csv_reader(source),
        }
    }

    pub fn bank_details(self) -> impl Iterator<Item = Result<BankDetail>> {
        self.reader
            .into_deserialize()
            .map(|row| row.map_err(PayrollError::from))
    }
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    payee: PayeeId,
    amount: Decimal,
    label: Option<String>,
}

/// Reads payment configuration from a CSV source.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: csv_reader(source),
        }
    }

    pub fn payments(self) -> impl Iterator<Item = Result<Payment>> {
        self.reader.into_deserialize().map(|row| {
            row.map_err(PayrollError::from)
                .and_then(|row: PaymentRow| Payment::new(row.payee, row.amount, row.label))
        })
    }
}

/// Reads component configuration from a CSV source.
pub struct ComponentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ComponentReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: csv_reader(source),
        }
    }

    pub fn components(self) -> impl Iterator<Item = Result<Component>> {
        self.reader
            .into_deserialize()
            .map(|row| row.map_err(PayrollError::from))
    }
}
