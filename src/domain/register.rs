use super::bank::{BankDetail, BankSnapshot};
use super::component::{self, AppliedComponent};
use super::pay_run::PayRunId;
use super::payee::{Payee, PayeeId};
use super::payment::Payment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The per-payee, per-run ledger record: a snapshot of the bank details and
/// pay computation at the moment the run processed the payee.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PayRecordRegister {
    pub pay_run: PayRunId,
    pub payee: PayeeId,
    pub payee_name: String,
    pub bank: BankSnapshot,
    /// The base payment amount the gross was derived from.
    pub amount: Decimal,
    pub tds_percentage: Decimal,
    pub gross_amount: Decimal,
    pub net_income: Decimal,
    pub components: Vec<AppliedComponent>,
}

impl PayRecordRegister {
    /// Computes the record for an automated run pass. No components are
    /// attached at this point, so gross pay equals the base amount.
    pub fn compute(
        pay_run: PayRunId,
        payee: &Payee,
        bank_detail: &BankDetail,
        payment: &Payment,
    ) -> Self {
        let tds_percentage = payee.tds_percentage();
        let gross_amount = payment.amount;
        Self {
            pay_run,
            payee: payee.id,
            payee_name: payee.full_name.clone(),
            bank: BankSnapshot::from(bank_detail),
            amount: payment.amount,
            tds_percentage,
            gross_amount,
            net_income: net_income(gross_amount, tds_percentage),
            components: Vec::new(),
        }
    }

    /// Replaces the applied component set and recomputes gross and net from
    /// the base amount. Invoked every time the component values attached to
    /// this record are saved.
    pub fn apply_components(&mut self, components: Vec<AppliedComponent>) {
        self.components = components;
        self.gross_amount = component::gross_pay(self.amount, &self.components);
        self.net_income = net_income(self.gross_amount, self.tds_percentage);
    }
}

/// The amount withheld at source for a gross pay.
pub fn tds_amount(gross: Decimal, percentage: Decimal) -> Decimal {
    gross * percentage / Decimal::ONE_HUNDRED
}

/// Gross pay less the TDS withholding.
pub fn net_income(gross: Decimal, percentage: Decimal) -> Decimal {
    gross - tds_amount(gross, percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::{Component, ComponentOperation};
    use crate::domain::payee::{Lifecycle, PayeeStatus, TdsRate};
    use rust_decimal_macros::dec;

    fn payee() -> Payee {
        Payee {
            id: 7,
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            status: PayeeStatus::Active,
            lifecycle: Lifecycle::Active,
            tds_rate: Some(TdsRate::new("Standard", dec!(10.00)).unwrap()),
        }
    }

    fn bank_detail() -> BankDetail {
        BankDetail {
            payee: 7,
            bank_name: "State Bank".to_string(),
            account_number: "000111222".to_string(),
            account_holder_name: "Asha Rao".to_string(),
            account_type: "savings".to_string(),
            ifsc_code: "SBIN0001".to_string(),
            micr_code: "400002003".to_string(),
            swift_code: "SBININBB".to_string(),
            branch_address: "MG Road".to_string(),
            acknowledged: true,
        }
    }

    #[test]
    fn test_tds_arithmetic_is_exact() {
        assert_eq!(tds_amount(dec!(50000.00), dec!(10.00)), dec!(5000.00));
        assert_eq!(net_income(dec!(50000.00), dec!(10.00)), dec!(45000.00));
        // Awkward percentages must not drift.
        assert_eq!(tds_amount(dec!(33333.33), dec!(7.5)), dec!(2499.99975));
        assert_eq!(net_income(dec!(33333.33), dec!(7.5)), dec!(30833.33025));
    }

    #[test]
    fn test_compute_snapshots_payee_and_bank() {
        let payment = Payment::new(7, dec!(50000.00), None).unwrap();
        let record = PayRecordRegister::compute(1, &payee(), &bank_detail(), &payment);

        assert_eq!(record.pay_run, 1);
        assert_eq!(record.payee, 7);
        assert_eq!(record.payee_name, "Asha Rao");
        assert_eq!(record.bank.account_number, "000111222");
        assert_eq!(record.amount, dec!(50000.00));
        assert_eq!(record.tds_percentage, dec!(10.00));
        assert_eq!(record.gross_amount, dec!(50000.00));
        assert_eq!(record.net_income, dec!(45000.00));
        assert!(record.components.is_empty());
    }

    #[test]
    fn test_compute_without_tds_rate() {
        let mut payee = payee();
        payee.tds_rate = None;
        let payment = Payment::new(7, dec!(50000.00), None).unwrap();

        let record = PayRecordRegister::compute(1, &payee, &bank_detail(), &payment);
        assert_eq!(record.tds_percentage, Decimal::ZERO);
        assert_eq!(record.net_income, dec!(50000.00));
    }

    #[test]
    fn test_apply_components_recomputes_gross_and_net() {
        let payment = Payment::new(7, dec!(50000.00), None).unwrap();
        let mut record = PayRecordRegister::compute(1, &payee(), &bank_detail(), &payment);

        record.apply_components(vec![
            AppliedComponent {
                component: Component {
                    id: 1,
                    name: "House Rent Allowance".to_string(),
                    operation: ComponentOperation::Sum,
                },
                value: dec!(10000.00),
            },
            AppliedComponent {
                component: Component {
                    id: 2,
                    name: "Provident Fund".to_string(),
                    operation: ComponentOperation::Subtract,
                },
                value: dec!(1800.00),
            },
        ]);

        assert_eq!(record.gross_amount, dec!(58200.00));
        assert_eq!(record.net_income, dec!(52380.00));
        // Base amount stays untouched, so a later edit recomputes from it.
        assert_eq!(record.amount, dec!(50000.00));
    }

    #[test]
    fn test_apply_components_replaces_previous_set() {
        let payment = Payment::new(7, dec!(50000.00), None).unwrap();
        let mut record = PayRecordRegister::compute(1, &payee(), &bank_detail(), &payment);

        let bonus = AppliedComponent {
            component: Component {
                id: 1,
                name: "Bonus".to_string(),
                operation: ComponentOperation::Sum,
            },
            value: dec!(5000.00),
        };
        record.apply_components(vec![bonus.clone()]);
        record.apply_components(vec![bonus]);

        // Saving the same set twice must not double-apply.
        assert_eq!(record.gross_amount, dec!(55000.00));
        assert_eq!(record.net_income, dec!(49500.00));
    }
}
