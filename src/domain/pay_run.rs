use crate::error::{PayrollError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type PayRunId = u32;

/// Canonical error-log line written when every payee processed cleanly.
pub const RUN_SUCCESS_LOG: &str = "PayRecordRegister created successfully for every payee.";

/// Informational message for a run action targeting a run that is already
/// being processed. Not an error: the work is underway.
pub const RUN_IN_PROGRESS_MESSAGE: &str = "We're currently syncing your pay records. \
     Please hold on while we update your information.";

/// The payroll period a run covers.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Period {
    pub month: u8,
    pub year: u16,
}

impl Period {
    pub fn new(month: u8, year: u16) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PayrollError::Validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { month, year })
    }

    /// The following period, rolling the year over after December.
    pub fn next(&self) -> Period {
        if self.month == 12 {
            Period {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Period {
                month: self.month + 1,
                year: self.year,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PayRunStatus {
    Due,
    InProgress,
    Completed,
    Approved,
    Rejected,
}

impl PayRunStatus {
    /// A live run blocks the creation of the next one.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Due | Self::InProgress | Self::Completed)
    }
}

impl fmt::Display for PayRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Due => "Due",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        };
        write!(f, "{label}")
    }
}

/// Outcome of the run gate for a run that did not fail a guard.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RunGate {
    /// The run is `Due` and may be started.
    Ready,
    /// The run is already being processed; informational, not an error.
    AlreadyInProgress,
}

/// One payroll processing cycle.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PayRun {
    pub id: PayRunId,
    pub period: Period,
    pub status: PayRunStatus,
    pub created_by: String,
    pub error_log: Option<String>,
}

impl PayRun {
    /// Gate for the "run" action. Only a `Due` run may be started; every
    /// other state answers with a state-specific message.
    pub fn gate_run(&self) -> Result<RunGate> {
        match self.status {
            PayRunStatus::Due => Ok(RunGate::Ready),
            PayRunStatus::InProgress => Ok(RunGate::AlreadyInProgress),
            PayRunStatus::Approved => Err(PayrollError::Action(
                "The selected pay run has already been approved.".to_string(),
            )),
            PayRunStatus::Completed => Err(PayrollError::Action(
                "The pay run has been completed. To proceed, please choose \
                 either 'Approve' or 'Reject'."
                    .to_string(),
            )),
            PayRunStatus::Rejected => Err(PayrollError::Action(
                "The pay records have been rejected. Please initiate a new \
                 pay run to proceed."
                    .to_string(),
            )),
        }
    }

    /// Gate for the "approve" action: only a completed run can be approved.
    pub fn gate_approve(&self) -> Result<()> {
        match self.status {
            PayRunStatus::Completed => Ok(()),
            _ => Err(PayrollError::Action(
                "Entries can only be approved if their status is 'Completed'.".to_string(),
            )),
        }
    }

    /// Gate for the "reject" action.
    pub fn gate_reject(&self) -> Result<()> {
        match self.status {
            PayRunStatus::Completed
            | PayRunStatus::Approved
            | PayRunStatus::InProgress
            | PayRunStatus::Due => Ok(()),
            PayRunStatus::Rejected => Err(PayrollError::Action(
                "Entries can only be rejected if their status is 'Completed', \
                 'Approved' or 'Due'."
                    .to_string(),
            )),
        }
    }
}
