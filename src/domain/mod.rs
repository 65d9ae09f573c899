//! Domain types and pure computation for the pay-run engine.

pub mod bank;
pub mod component;
pub mod pay_run;
pub mod payee;
pub mod payment;
pub mod ports;
pub mod register;
