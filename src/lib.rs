//! Taxsim - Federal individual income tax simulator
//!
//! This library provides:
//! - IRS worksheet replicas (payroll tax, SS taxability, deductions and
//!   exemptions, bracket walking, capital gains, Form 6251 AMT, CTC/ACTC,
//!   EITC, Medicare surtax and NIIT, per-paycheck withholding)
//! - Regime orchestrators for current law (2018), the House 2018 proposal,
//!   and the Senate 2018 proposal
//! - Marginal and average effective rate derivation
//! - CSV policy/taxpayer loading and result output

pub mod error;
pub mod policy;
pub mod regime;
pub mod result;
pub mod taxpayer;
pub mod worksheets;

// Re-export commonly used types
pub use error::TaxError;
pub use policy::Policy;
pub use regime::{calculate, Regime};
pub use result::TaxResult;
pub use taxpayer::{FilingStatus, Taxpayer};
