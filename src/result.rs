//! Flat result record assembled by the regime orchestrators
//!
//! Field order matters: the CSV output mirrors the struct's declaration
//! order, one row per taxpayer. Optional fields only apply to some regimes
//! (the House personal credit, the Senate dependent credit, marginal rates
//! when requested) and serialize as empty cells when absent.

use crate::worksheets::deductions::DeductionType;
use serde::Serialize;

/// Every intermediate and final quantity from one regime calculation
#[derive(Debug, Clone, Serialize)]
pub struct TaxResult {
    pub gross_income: f64,
    pub employee_payroll_tax: f64,
    pub employer_payroll_tax: f64,
    pub ordinary_income_after_401k: f64,
    pub agi: f64,
    pub taxable_income: f64,
    pub deduction_type: DeductionType,
    pub deductions: f64,
    pub personal_exemption_amt: f64,
    pub pease_limitation_amt: f64,
    pub income_tax_before_credits: f64,
    pub qualified_income_tax: f64,
    /// Form 1040 line 44: lesser of ordinary and worksheet tax
    pub selected_tax_before_credits: f64,
    pub amt: f64,
    pub income_tax_before_credits_with_amt: f64,
    pub ctc: f64,
    pub actc: f64,
    pub eitc: f64,
    /// House proposal only: flat per-filer credit
    pub personal_credit: Option<f64>,
    /// Senate proposal only: credit for non-child dependents
    pub dep_credit: Option<f64>,
    pub income_tax_after_nonrefundable_credits: f64,
    pub medicare_surtax: f64,
    pub niit: f64,
    pub income_tax_after_credits: f64,
    pub tax_burden: f64,
    pub tax_wedge: f64,
    pub avg_effective_tax_rate: f64,
    pub avg_effective_tax_rate_wo_payroll: f64,
    /// Change in burden per extra dollar of wage income
    pub marginal_rate_ordinary: Option<f64>,
    /// Change in burden per extra dollar of business income
    pub marginal_rate_business: Option<f64>,
}
