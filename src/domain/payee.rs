use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type PayeeId = u32;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PayeeStatus {
    Active,
    Removed,
    Disengaged,
}

/// Tagged record lifecycle, replacing an `is_deleted` flag so that query
/// sites cannot forget to filter deleted rows.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted,
}

/// A named withholding rate assigned to a payee.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TdsRate {
    pub name: String,
    pub percentage: Decimal,
}

impl TdsRate {
    pub fn new(name: impl Into<String>, percentage: Decimal) -> Result<Self> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(PayrollError::Validation(
                "TDS percentage must be between 0 and 100".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            percentage,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payee {
    pub id: PayeeId,
    pub full_name: String,
    pub email: String,
    pub status: PayeeStatus,
    pub lifecycle: Lifecycle,
    pub tds_rate: Option<TdsRate>,
}

impl Payee {
    /// A payee qualifies for a pay run only while active and not deleted.
    pub fn is_payable(&self) -> bool {
        self.status == PayeeStatus::Active && self.lifecycle == Lifecycle::Active
    }

    /// The withholding percentage, zero when no TDS rate is assigned.
    pub fn tds_percentage(&self) -> Decimal {
        self.tds_rate
            .as_ref()
            .map(|rate| rate.percentage)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Selects the payees eligible for a pay run.
pub fn eligible(payees: impl IntoIterator<Item = Payee>) -> Vec<Payee> {
    payees.into_iter().filter(Payee::is_payable).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payee(id: PayeeId, status: PayeeStatus, lifecycle: Lifecycle) -> Payee {
        Payee {
            id,
            full_name: format!("Payee {id}"),
            email: format!("payee{id}@example.com"),
            status,
            lifecycle,
            tds_rate: None,
        }
    }

    #[test]
    fn test_eligible_filters_status_and_lifecycle() {
        let payees = vec![
            payee(1, PayeeStatus::Active, Lifecycle::Active),
            payee(2, PayeeStatus::Removed, Lifecycle::Active),
            payee(3, PayeeStatus::Disengaged, Lifecycle::Active),
            payee(4, PayeeStatus::Active, Lifecycle::Deleted),
        ];

        let eligible = eligible(payees);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, 1);
    }

    #[test]
    fn test_tds_percentage_defaults_to_zero() {
        let p = payee(1, PayeeStatus::Active, Lifecycle::Active);
        assert_eq!(p.tds_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_tds_percentage_from_assigned_rate() {
        let mut p = payee(1, PayeeStatus::Active, Lifecycle::Active);
        p.tds_rate = Some(TdsRate::new("Standard", dec!(10.00)).unwrap());
        assert_eq!(p.tds_percentage(), dec!(10.00));
    }

    #[test]
    fn test_tds_rate_rejects_out_of_range() {
        assert!(matches!(
            TdsRate::new("Bad", dec!(100.01)),
            Err(PayrollError::Validation(_))
        ));
        assert!(matches!(
            TdsRate::new("Bad", dec!(-1)),
            Err(PayrollError::Validation(_))
        ));
        assert!(TdsRate::new("Edge", dec!(100)).is_ok());
        assert!(TdsRate::new("Edge", dec!(0)).is_ok());
    }
}
