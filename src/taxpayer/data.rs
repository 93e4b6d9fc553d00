//! Taxpayer record matching the 15-column household input format

use crate::error::TaxError;
use serde::{Deserialize, Serialize};

/// Filing status of the household
///
/// The wire/CSV representation is the integer code used by the parameter
/// tables: 0 = single, 1 = married filing jointly, 2 = head of household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FilingStatus {
    Single,
    Married,
    HeadOfHousehold,
}

impl FilingStatus {
    /// Index into filing-status-indexed parameter lists
    pub fn index(&self) -> usize {
        match self {
            FilingStatus::Single => 0,
            FilingStatus::Married => 1,
            FilingStatus::HeadOfHousehold => 2,
        }
    }

    /// Number of filers on the return (2 for a joint return)
    pub fn filers(&self) -> u32 {
        match self {
            FilingStatus::Married => 2,
            _ => 1,
        }
    }

    pub fn is_married(&self) -> bool {
        matches!(self, FilingStatus::Married)
    }
}

impl TryFrom<u8> for FilingStatus {
    type Error = TaxError;

    fn try_from(code: u8) -> Result<Self, TaxError> {
        match code {
            0 => Ok(FilingStatus::Single),
            1 => Ok(FilingStatus::Married),
            2 => Ok(FilingStatus::HeadOfHousehold),
            other => Err(TaxError::UnknownFilingStatus(other)),
        }
    }
}

impl From<FilingStatus> for u8 {
    fn from(status: FilingStatus) -> u8 {
        status.index() as u8
    }
}

/// One household's income sources, deduction amounts, and dependent counts
///
/// All currency fields are annual dollar amounts. The engine never mutates a
/// caller's record: regime-specific deduction caps are applied to a private
/// copy inside each orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxpayer {
    /// Filing status (0 = single, 1 = married, 2 = head of household)
    pub filing_status: FilingStatus,

    /// Number of qualifying child dependents
    pub child_dep: u32,

    /// Number of other (non-child) dependents
    pub nonchild_dep: u32,

    /// Wage income of the first earner
    pub ordinary_income1: f64,

    /// Wage income of the second earner
    pub ordinary_income2: f64,

    /// Pass-through business income
    pub business_income: f64,

    /// Social Security benefits received
    pub ss_income: f64,

    /// Qualified dividends and long-term capital gains
    pub qualified_income: f64,

    /// Pre-tax retirement contributions
    #[serde(rename = "401k_contributions")]
    pub contributions_401k: f64,

    /// Deductible medical expenses (already net of the AGI floor)
    pub medical_expenses: f64,

    /// State and local income tax paid
    pub sl_income_tax: f64,

    /// State and local property tax paid
    pub sl_property_tax: f64,

    /// Mortgage interest paid
    pub interest_paid: f64,

    /// Charitable contributions
    pub charity_contributions: f64,

    /// Other itemized deductions
    pub other_itemized: f64,
}

impl Default for Taxpayer {
    fn default() -> Self {
        Self {
            filing_status: FilingStatus::Single,
            child_dep: 0,
            nonchild_dep: 0,
            ordinary_income1: 0.0,
            ordinary_income2: 0.0,
            business_income: 0.0,
            ss_income: 0.0,
            qualified_income: 0.0,
            contributions_401k: 0.0,
            medical_expenses: 0.0,
            sl_income_tax: 0.0,
            sl_property_tax: 0.0,
            interest_paid: 0.0,
            charity_contributions: 0.0,
            other_itemized: 0.0,
        }
    }
}

impl Taxpayer {
    /// Check the filing-status/dependent invariants
    ///
    /// Head of household requires at least one dependent; a single filer
    /// cannot claim child dependents. Runs before any tax arithmetic.
    pub fn validate(&self) -> Result<(), TaxError> {
        if self.filing_status == FilingStatus::HeadOfHousehold
            && self.child_dep == 0
            && self.nonchild_dep == 0
        {
            return Err(TaxError::HeadOfHouseholdWithoutDependent);
        }
        if self.filing_status == FilingStatus::Single && self.child_dep > 0 {
            return Err(TaxError::SingleWithChildDependent);
        }
        Ok(())
    }

    /// Gross income: all five income sources before any adjustment
    pub fn gross_income(&self) -> f64 {
        self.ordinary_income1
            + self.ordinary_income2
            + self.business_income
            + self.ss_income
            + self.qualified_income
    }

    /// Combined wage income of both earners
    pub fn earned_income(&self) -> f64 {
        self.ordinary_income1 + self.ordinary_income2
    }

    /// Combined wage income less pre-tax retirement contributions
    pub fn ordinary_income_after_401k(&self) -> f64 {
        self.earned_income() - self.contributions_401k
    }

    /// Sum of all six itemized deduction components
    pub fn itemized_total(&self) -> f64 {
        self.medical_expenses
            + self.sl_income_tax
            + self.sl_property_tax
            + self.interest_paid
            + self.charity_contributions
            + self.other_itemized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hoh_requires_dependent() {
        let taxpayer = Taxpayer {
            filing_status: FilingStatus::HeadOfHousehold,
            ordinary_income1: 100_000.0,
            ..Default::default()
        };
        assert!(matches!(
            taxpayer.validate(),
            Err(TaxError::HeadOfHouseholdWithoutDependent)
        ));
    }

    #[test]
    fn test_single_with_child_rejected() {
        let taxpayer = Taxpayer {
            filing_status: FilingStatus::Single,
            child_dep: 1,
            ordinary_income1: 100_000.0,
            ..Default::default()
        };
        assert!(matches!(
            taxpayer.validate(),
            Err(TaxError::SingleWithChildDependent)
        ));
    }

    #[test]
    fn test_hoh_with_nonchild_dependent_ok() {
        let taxpayer = Taxpayer {
            filing_status: FilingStatus::HeadOfHousehold,
            nonchild_dep: 1,
            ..Default::default()
        };
        assert!(taxpayer.validate().is_ok());
    }

    #[test]
    fn test_gross_income_sums_all_sources() {
        let taxpayer = Taxpayer {
            filing_status: FilingStatus::Married,
            ordinary_income1: 50_000.0,
            ordinary_income2: 30_000.0,
            business_income: 10_000.0,
            ss_income: 5_000.0,
            qualified_income: 5_000.0,
            contributions_401k: 4_000.0,
            ..Default::default()
        };
        assert_eq!(taxpayer.gross_income(), 100_000.0);
        assert_eq!(taxpayer.ordinary_income_after_401k(), 76_000.0);
    }

    #[test]
    fn test_filing_status_codes() {
        assert_eq!(FilingStatus::try_from(1).unwrap(), FilingStatus::Married);
        assert!(FilingStatus::try_from(3).is_err());
        assert_eq!(u8::from(FilingStatus::HeadOfHousehold), 2);
    }
}
