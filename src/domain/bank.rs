use super::payee::PayeeId;
use serde::{Deserialize, Serialize};

/// A payee's banking record together with their acknowledgement that the
/// stored details are correct.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BankDetail {
    pub payee: PayeeId,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub account_type: String,
    pub ifsc_code: String,
    pub micr_code: String,
    pub swift_code: String,
    pub branch_address: String,
    pub acknowledged: bool,
}

impl BankDetail {
    /// Marks the details as confirmed by the payee.
    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }

    /// Reconciles an incoming update against the previously persisted row.
    /// Any change to a banking field invalidates the acknowledgement, so the
    /// payee must confirm the edited details again before the next run.
    pub fn reconcile(mut self, previous: Option<&BankDetail>) -> BankDetail {
        match previous {
            Some(prev) if !self.same_banking_fields(prev) => {
                self.acknowledged = false;
            }
            Some(prev) => {
                self.acknowledged = prev.acknowledged;
            }
            None => {
                self.acknowledged = false;
            }
        }
        self
    }

    fn same_banking_fields(&self, other: &BankDetail) -> bool {
        self.bank_name == other.bank_name
            && self.account_number == other.account_number
            && self.account_holder_name == other.account_holder_name
            && self.account_type == other.account_type
            && self.ifsc_code == other.ifsc_code
            && self.micr_code == other.micr_code
            && self.swift_code == other.swift_code
            && self.branch_address == other.branch_address
    }
}

/// The banking fields copied onto a ledger record at run time, so that later
/// edits to the live `BankDetail` cannot rewrite history.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BankSnapshot {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub account_type: String,
    pub ifsc_code: String,
    pub micr_code: String,
    pub swift_code: String,
    pub branch_address: String,
}

impl From<&BankDetail> for BankSnapshot {
    fn from(detail: &BankDetail) -> Self {
        Self {
            bank_name: detail.bank_name.clone(),
            account_number: detail.account_number.clone(),
            account_holder_name: detail.account_holder_name.clone(),
            account_type: detail.account_type.clone(),
            ifsc_code: detail.ifsc_code.clone(),
            micr_code: detail.micr_code.clone(),
            swift_code: detail.swift_code.clone(),
            branch_address: detail.branch_address.clone(),
        }
    }
}
