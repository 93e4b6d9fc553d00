//! Regime orchestrators
//!
//! Each regime sequences the worksheet functions in dependency order:
//! deduction caps, gross income, payroll, AGI, deductions and exemptions,
//! ordinary tax, the qualified-income override, AMT, nonrefundable credits,
//! additional taxes, then refundable credits. The public entry point
//! validates the taxpayer, runs the pipeline, and derives marginal rates by
//! re-running on perturbed copies.

mod current_law;
mod house;
mod rates;
mod senate;

use crate::error::TaxError;
use crate::policy::Policy;
use crate::result::TaxResult;
use crate::taxpayer::Taxpayer;
use crate::worksheets::round_rate;
use serde::{Deserialize, Serialize};

/// Income perturbation used to probe marginal rates
const MARGINAL_STEP: f64 = 1_000.0;

/// One named, self-consistent set of tax-law rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    CurrentLaw,
    House2018,
    Senate2018,
}

impl Regime {
    pub const ALL: [Regime; 3] = [Regime::CurrentLaw, Regime::House2018, Regime::Senate2018];

    /// Stable name used for parameter and result file stems
    pub fn name(&self) -> &'static str {
        match self {
            Regime::CurrentLaw => "current_law",
            Regime::House2018 => "house_2018",
            Regime::Senate2018 => "senate_2018",
        }
    }

    /// Parameter file name under the params directory
    pub fn param_file(&self) -> &'static str {
        match self {
            Regime::CurrentLaw => "current_law_2018.csv",
            Regime::House2018 => "house_2018.csv",
            Regime::Senate2018 => "senate_2018.csv",
        }
    }

    /// Result file name under the results directory
    pub fn results_file(&self) -> &'static str {
        match self {
            Regime::CurrentLaw => "current_law_results.csv",
            Regime::House2018 => "house_2018_results.csv",
            Regime::Senate2018 => "senate_2018_results.csv",
        }
    }

    /// Embedded 2018 parameter set for this regime
    pub fn builtin_policy(&self) -> Policy {
        match self {
            Regime::CurrentLaw => Policy::current_law_2018(),
            Regime::House2018 => Policy::house_2018(),
            Regime::Senate2018 => Policy::senate_2018(),
        }
    }
}

/// Calculate one taxpayer's liability under one regime, including marginal
/// rates derived from perturbed re-runs
pub fn calculate(
    regime: Regime,
    policy: &Policy,
    taxpayer: &Taxpayer,
) -> Result<TaxResult, TaxError> {
    taxpayer.validate()?;

    let mut result = run_pipeline(regime, policy, taxpayer);

    // Marginal rates: burden delta per extra $1000 of each income type. The
    // perturbed runs never recurse into another perturbation.
    let mut more_wages = taxpayer.clone();
    more_wages.ordinary_income1 += MARGINAL_STEP;
    let wages_result = run_pipeline(regime, policy, &more_wages);
    result.marginal_rate_ordinary = Some(round_rate(
        (wages_result.tax_burden - result.tax_burden) / MARGINAL_STEP,
    ));

    let mut more_business = taxpayer.clone();
    more_business.business_income += MARGINAL_STEP;
    let business_result = run_pipeline(regime, policy, &more_business);
    result.marginal_rate_business = Some(round_rate(
        (business_result.tax_burden - result.tax_burden) / MARGINAL_STEP,
    ));

    Ok(result)
}

fn run_pipeline(regime: Regime, policy: &Policy, taxpayer: &Taxpayer) -> TaxResult {
    match regime {
        Regime::CurrentLaw => current_law::calculate(policy, taxpayer),
        Regime::House2018 => house::calculate(policy, taxpayer),
        Regime::Senate2018 => senate::calculate(policy, taxpayer),
    }
}
