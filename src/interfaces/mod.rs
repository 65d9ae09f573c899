//! Transport adapters for loading fixtures and emitting the pay register.

pub mod csv;
