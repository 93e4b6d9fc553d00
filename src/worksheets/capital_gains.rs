//! Qualified Dividends and Capital Gain Tax Worksheet (Form 1040 line 44)
//!
//! Ordinary income fills the rate thresholds first; whatever room remains in
//! the 0% and lower-rate tiers shelters qualified income, and the rest is
//! taxed at the upper rate. Callers must still take the min() of this result
//! and the plain ordinary tax on full taxable income.

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;
use crate::worksheets::brackets;

/// Worksheet tax on taxable income containing qualified income
pub fn qualified_income_tax(
    policy: &Policy,
    taxpayer: &Taxpayer,
    taxable_income: f64,
    income_tax_before_credits: f64,
) -> f64 {
    worksheet(
        policy,
        taxpayer,
        taxable_income,
        income_tax_before_credits,
        |line7| brackets::ordinary_income_tax(policy, taxpayer, line7),
    )
}

/// House-proposal variant: taxes the ordinary portion with the House bracket
/// walk and carries the 12%-bracket phase-out adjustment into line 24
pub fn house_qualified_income_tax(
    policy: &Policy,
    taxpayer: &Taxpayer,
    taxable_income: f64,
    income_tax_before_credits: f64,
    po_amount: f64,
) -> f64 {
    worksheet(
        policy,
        taxpayer,
        taxable_income,
        income_tax_before_credits,
        |line7| brackets::house_ordinary_income_tax(policy, taxpayer, line7) + po_amount,
    )
}

fn worksheet<F>(
    policy: &Policy,
    taxpayer: &Taxpayer,
    taxable_income: f64,
    income_tax_before_credits: f64,
    ordinary_tax: F,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let status = taxpayer.filing_status.index();
    let line1 = taxable_income;
    let line2 = taxpayer.qualified_income;
    let line3 = 0.0; // Form 1040 line 13 (Schedule D gains) not modeled
    let line4 = line3 + line2;
    let line5 = 0.0; // investment interest expense deduction
    let line6 = (line4 - line5).max(0.0);
    let line7 = (line1 - line6).max(0.0); // ordinary portion
    let line8 = policy.cap_gains_lower_threshold[status];
    let line9 = line1.min(line8);
    let line10 = line7.min(line9);
    let line11 = line9 - line10; // taxed at 0%
    let line12 = line1.min(line6);
    let line13 = line11;
    let line14 = line12 - line13;
    let line15 = policy.cap_gains_upper_threshold[status];
    let line16 = line15.min(line1);
    let line17 = line7 + line11;
    let line18 = (line16 - line17).max(0.0);
    let line19 = line14.min(line18);
    let line20 = line19 * policy.cap_gains_lower_rate;
    let line21 = line11 + line19;
    let line22 = line12 - line21;
    let line23 = line22 * policy.cap_gains_upper_rate;
    let line24 = ordinary_tax(line7);
    let line25 = line20 + line23 + line24;
    let line26 = income_tax_before_credits; // tax on line1
    line25.min(line26)
}
