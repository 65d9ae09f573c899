use crate::domain::register::PayRecordRegister;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One flattened output row per ledger record, with monetary fields rounded
/// to currency precision. The ledger itself keeps the exact values.
#[derive(Debug, Serialize)]
pub struct RegisterRow {
    pay_run: u32,
    payee: u32,
    payee_name: String,
    bank_name: String,
    account_number: String,
    account_holder_name: String,
    account_type: String,
    ifsc_code: String,
    micr_code: String,
    swift_code: String,
    branch_address: String,
    amount: Decimal,
    tds_percentage: Decimal,
    gross_amount: Decimal,
    net_income: Decimal,
}

impl From<&PayRecordRegister> for RegisterRow {
    fn from(record: &PayRecordRegister) -> Self {
        Self {
            pay_run: record.pay_run,
            payee: record.payee,
            payee_name: record.payee_name.clone(),
            bank_name: record.bank.bank_name.clone(),
            account_number: record.bank.account_number.clone(),
            account_holder_name: record.bank.account_holder_name.clone(),
            account_type: record.bank.account_type.clone(),
            ifsc_code: record.bank.ifsc_code.clone(),
            micr_code: record.bank.micr_code.clone(),
            swift_code: record.bank.swift_code.clone(),
            branch_address: record.bank.branch_address.clone(),
            amount: record.amount.round_dp(2),
            tds_percentage: record.tds_percentage,
            gross_amount: record.gross_amount.round_dp(2),
            net_income: record.net_income.round_dp(2),
        }
    }
}

/// Flattens ledger records into output rows, for either output format.
pub fn rows(records: &[PayRecordRegister]) -> Vec<RegisterRow> {
    records.iter().map(RegisterRow::from).collect()
}

/// Writes the pay register to a CSV sink.
pub struct RegisterWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RegisterWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records(&mut self, records: &[PayRecordRegister]) -> Result<()> {
        for record in records {
            self.writer.serialize(RegisterRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bank::BankSnapshot;
    use rust_decimal_macros::dec;

    fn record() -> PayRecordRegister {
        PayRecordRegister {
            pay_run: 1,
            payee: 7,
            payee_name: "Asha Rao".to_string(),
            bank: BankSnapshot {
                bank_name: "State Bank".to_string(),
                account_number: "000111222".to_string(),
                account_holder_name: "Asha Rao".to_string(),
                account_type: "savings".to_string(),
                ifsc_code: "SBIN0001".to_string(),
                micr_code: "400002003".to_string(),
                swift_code: "SBININBB".to_string(),
                branch_address: "MG Road".to_string(),
            },
            amount: dec!(50000.00),
            tds_percentage: dec!(10.00),
            gross_amount: dec!(50000.00),
            net_income: dec!(45000.00),
            components: Vec::new(),
        }
    }

    #[test]
    fn test_rows_round_to_currency_precision() {
        let mut exact = record();
        exact.net_income = dec!(45000.0000);
        exact.gross_amount = dec!(50000.000);

        let rows = rows(&[exact]);
        assert_eq!(rows[0].net_income.to_string(), "45000.00");
        assert_eq!(rows[0].gross_amount.to_string(), "50000.00");
    }

    #[test]
    fn test_writer_emits_header_and_rows() {
        let mut buffer = Vec::new();
        RegisterWriter::new(&mut buffer)
            .write_records(&[record()])
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "pay_run,payee,payee_name,bank_name,account_number,account_holder_name,\
             account_type,ifsc_code,micr_code,swift_code,branch_address,amount,\
             tds_percentage,gross_amount,net_income"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,7,Asha Rao,State Bank,000111222,Asha Rao,savings,SBIN0001,\
             400002003,SBININBB,MG Road,50000.00,10.00,50000.00,45000.00"
        );
    }
}
