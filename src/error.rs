//! Error taxonomy for the tax calculation engine

use thiserror::Error;

/// Errors surfaced by policy loading, taxpayer validation, and batch I/O.
///
/// Worksheet functions themselves are total over well-formed inputs; the
/// variants here cover the fail-fast paths that run before any tax
/// arithmetic, plus I/O wrapping for the CSV boundaries.
#[derive(Debug, Error)]
pub enum TaxError {
    /// Head-of-household status requires at least one dependent
    #[error("head-of-household filer must claim at least one dependent")]
    HeadOfHouseholdWithoutDependent,

    /// Single filers cannot claim child dependents
    #[error("single filer cannot claim child dependents")]
    SingleWithChildDependent,

    /// Filing status column outside 0..=2
    #[error("unknown filing status code: {0}")]
    UnknownFilingStatus(u8),

    /// Publication 15 publishes no head-of-household withholding table
    #[error("no withholding table for head-of-household filers")]
    UnsupportedWithholdingStatus,

    /// Wages subject to withholding cannot be negative
    #[error("annual wage cannot be negative: {0}")]
    NegativeWage(f64),

    /// A required policy parameter was absent from the parameter file
    #[error("policy parameter `{0}` is missing")]
    MissingParameter(String),

    /// A policy parameter had the wrong number of values
    #[error("policy parameter `{name}` expects {expected} values, found {found}")]
    ParameterArity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Bracket thresholds must be monotonically non-decreasing
    #[error("bracket schedule `{0}` is not monotonically non-decreasing")]
    UnsortedBrackets(&'static str),

    /// Bracket threshold and rate lists must pair up one-to-one
    #[error("bracket schedule `{0}` does not match the rate list length")]
    BracketLengthMismatch(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid numeric value: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}
