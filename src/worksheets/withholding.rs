//! Per-paycheck federal income tax withholding
//!
//! Percentage Method from IRS Publication 15 (2017), page 43. The
//! withholding table is derived from the annual bracket schedule: shift
//! each threshold by the standard deduction less the personal exemption,
//! then divide into the payroll period. Tables exist only for single and
//! married filers.

use crate::error::TaxError;
use crate::policy::Policy;
use crate::taxpayer::FilingStatus;
use serde::{Deserialize, Serialize};

/// Payroll frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollPeriod {
    Daily,
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl PayrollPeriod {
    fn periods_per_year(&self) -> f64 {
        match self {
            PayrollPeriod::Daily => 260.0,
            PayrollPeriod::Weekly => 52.0,
            PayrollPeriod::Biweekly => 26.0,
            PayrollPeriod::Semimonthly => 24.0,
            PayrollPeriod::Monthly => 12.0,
            PayrollPeriod::Quarterly => 4.0,
            PayrollPeriod::Semiannual => 2.0,
            PayrollPeriod::Annual => 1.0,
        }
    }

    /// Decimal places for the table thresholds; daily tables keep dimes
    fn table_decimals(&self) -> i32 {
        match self {
            PayrollPeriod::Daily => 1,
            _ => 0,
        }
    }
}

fn round_to(amount: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (amount * factor).round() / factor
}

/// Tax to withhold from one paycheck under the Percentage Method
pub fn federal_withholding(
    policy: &Policy,
    payroll_period: PayrollPeriod,
    annual_wage: f64,
    filing_status: FilingStatus,
    allowances: u32,
) -> Result<f64, TaxError> {
    let brackets = match filing_status {
        FilingStatus::Single => &policy.single_brackets,
        FilingStatus::Married => &policy.married_brackets,
        FilingStatus::HeadOfHousehold => return Err(TaxError::UnsupportedWithholdingStatus),
    };
    if annual_wage < 0.0 {
        return Err(TaxError::NegativeWage(annual_wage));
    }

    let periods = payroll_period.periods_per_year();
    let payroll_wage = annual_wage / periods;

    // One withholding allowance per period, rounded to the nearest dime
    let allowance = round_to(policy.personal_exemption / periods, 1);

    let shift =
        policy.standard_deduction[filing_status.index()] - policy.personal_exemption;
    let withholding_table: Vec<f64> = brackets
        .iter()
        .map(|bracket| round_to((bracket + shift) / periods, payroll_period.table_decimals()))
        .collect();

    // Step 1: one allowance times the number claimed
    let step1 = allowances as f64 * allowance;
    // Step 2: amount subject to withholding
    let step2 = payroll_wage - step1;

    // Step 3: walk the per-period table like the annual brackets
    let mut withheld_tax = 0.0;
    let mut running_taxable_income = step2;
    for (threshold, rate) in withholding_table
        .iter()
        .zip(policy.income_tax_rates.iter())
        .rev()
    {
        if step2 > *threshold {
            let applicable = running_taxable_income - threshold;
            running_taxable_income -= applicable;
            withheld_tax += applicable * rate;
        }
    }

    Ok(withheld_tax)
}
