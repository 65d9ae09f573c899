//! Application layer orchestrating the pay-run lifecycle.
//!
//! This module defines the `PayRunEngine`, the entry point for the admin
//! actions (create/run/approve/reject), the background worker sweep, and
//! the ledger-edit recomputation flow.

pub mod engine;
