use super::payee::PayeeId;
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payee's configured base salary. One active payment per payee.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub payee: PayeeId,
    pub amount: Decimal,
    pub label: Option<String>,
}

impl Payment {
    pub fn new(payee: PayeeId, amount: Decimal, label: Option<String>) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(PayrollError::Validation(
                "Payment amount must be positive".to_string(),
            ));
        }
        Ok(Self {
            payee,
            amount,
            label,
        })
    }
}
