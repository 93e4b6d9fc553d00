//! Alternative Minimum Tax (Form 6251)
//!
//! AMT income starts from AGI less deductions when itemizing (adding back
//! the disallowed items, and reversing the Pease limitation), or plain AGI
//! when taking the standard deduction. The exemption phases out above its
//! own threshold, and the tentative tax uses a two-rate schedule. With
//! qualified income present, lines 36-63 rerun a capital-gains-style
//! bifurcation against the AMT rates.

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;
use crate::worksheets::deductions::{DeductionOutcome, DeductionType};

/// AMT owed plus the intermediate AMT taxable income for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmtOutcome {
    pub amt: f64,
    pub amt_taxable_income: f64,
}

pub fn federal_amt(
    policy: &Policy,
    taxpayer: &Taxpayer,
    deduction: &DeductionOutcome,
    agi: f64,
    income_tax_before_credits: f64,
) -> AmtOutcome {
    let status = taxpayer.filing_status.index();

    // Step 1: AMT income. Only charity and mortgage interest stay deductible.
    let amt_income = match deduction.deduction_type {
        DeductionType::Itemized => {
            let line1 = agi - deduction.deductions; // line 41 on Form 1040
            let line2 = if taxpayer.ss_income > 0.0 {
                taxpayer.medical_expenses
            } else {
                0.0
            };
            let line3 = taxpayer.sl_income_tax + taxpayer.sl_property_tax;
            let line5 = taxpayer.other_itemized;
            let line6 = if agi < policy.itemized_limitation_threshold[status] {
                0.0
            } else {
                // Reverses the Pease limitation applied on Schedule A
                -deduction.pease_limitation
            };
            line1 + line2 + line3 + line5 + line6
        }
        DeductionType::Standard => agi,
    };

    // Step 2: exemption, phased out above the threshold
    let amt_exemption = policy.amt_exemption[status];
    let amt_exemption_po_threshold = policy.amt_exemption_po_threshold[status];
    let line29 = if amt_income > amt_exemption_po_threshold {
        let ws_line4 = amt_income - amt_exemption_po_threshold;
        let ws_line5 = ws_line4 * policy.amt_exemption_po_rate;
        (amt_exemption - ws_line5).max(0.0) // ws_line6
    } else {
        amt_exemption
    };
    let amt_taxable_income = (amt_income - line29).max(0.0); // line 30

    // Step 3: tentative minimum tax. The two-rate schedule is equivalent to
    // taxing everything at the upper rate minus a constant.
    let rate_diff = policy.amt_rate_threshold * policy.amt_rates[1]
        - policy.amt_rate_threshold * policy.amt_rates[0];
    let two_rate_tax = |base: f64| {
        if base <= policy.amt_rate_threshold {
            base * policy.amt_rates[0]
        } else {
            base * policy.amt_rates[1] - rate_diff
        }
    };

    let tentative = if taxpayer.qualified_income == 0.0 {
        // lines 31/33
        if amt_taxable_income < policy.amt_rate_threshold {
            amt_taxable_income * policy.amt_rates[0]
        } else {
            amt_taxable_income * policy.amt_rates[1] - rate_diff
        }
    } else {
        // Tax Computation Using Maximum Capital Gains Rates, lines 36-63
        let line36 = amt_taxable_income;
        let line37 = taxpayer.qualified_income.max(0.0); // cap gains ws line 6
        let line39 = line37; // line 38 (Schedule D line 19) is 0
        let line40 = line36.min(line39);
        let line41 = line36 - line40;
        let line42 = two_rate_tax(line41);
        let line43 = policy.cap_gains_lower_threshold[status];
        let line44 = (deduction.taxable_income_before_qbi - taxpayer.qualified_income).max(0.0);
        let line45 = (line43 - line44).max(0.0);
        let line46 = line36.min(line37);
        let line47 = line45.min(line46);
        let line48 = line46 - line47;
        let line49 = policy.cap_gains_upper_threshold[status];
        let line50 = line45;
        let line51 = (deduction.taxable_income_before_qbi - taxpayer.qualified_income).max(0.0);
        let line52 = line50 + line51;
        let line53 = (line49 - line52).max(0.0);
        let line54 = line48.min(line53);
        let line55 = line54 * policy.cap_gains_lower_rate;
        let line56 = line47 + line54;
        let line58 = if (line56 - line36).abs() > 1e-9 {
            let line57 = line46 - line56;
            line57 * policy.cap_gains_upper_rate
        } else {
            0.0 // lines 59-61 skipped because line 38 is 0
        };
        let line62 = line42 + line55 + line58;
        let line63 = two_rate_tax(line36);
        line62.min(line63)
    };

    let line34 = income_tax_before_credits;
    let amt = (tentative - line34).max(0.0); // line 35

    AmtOutcome {
        amt,
        amt_taxable_income,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheets::{brackets, deductions};
    use approx::assert_relative_eq;

    fn run_current_law(taxpayer: &Taxpayer) -> AmtOutcome {
        let policy = Policy::current_law_2018();
        let agi = crate::worksheets::agi::federal_agi(
            &policy,
            taxpayer,
            taxpayer.ordinary_income_after_401k(),
        );
        let deduction = deductions::current_law(&policy, taxpayer, agi);
        let tax = brackets::ordinary_income_tax(&policy, taxpayer, deduction.taxable_income);
        federal_amt(&policy, taxpayer, &deduction, agi, tax)
    }

    #[test]
    fn test_no_amt_without_preference_items() {
        let taxpayer = Taxpayer {
            ordinary_income1: 300_000.0,
            ..Default::default()
        };
        let outcome = run_current_law(&taxpayer);
        assert_eq!(outcome.amt, 0.0);
    }

    #[test]
    fn test_salt_deduction_triggers_amt() {
        let taxpayer = Taxpayer {
            ordinary_income1: 300_000.0,
            sl_income_tax: 25_000.0,
            ..Default::default()
        };
        let outcome = run_current_law(&taxpayer);
        assert!(outcome.amt > 0.0);
    }

    #[test]
    fn test_exemption_fully_applied_below_phase_out() {
        let policy = Policy::current_law_2018();
        let taxpayer = Taxpayer {
            ordinary_income1: 100_000.0,
            ..Default::default()
        };
        let deduction = deductions::current_law(&policy, &taxpayer, 100_000.0);
        let outcome = federal_amt(&policy, &taxpayer, &deduction, 100_000.0, 0.0);
        // Standard deduction case: AMT income is plain AGI
        assert_relative_eq!(
            outcome.amt_taxable_income,
            100_000.0 - policy.amt_exemption[0],
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_exemption_phases_out() {
        let policy = Policy::current_law_2018();
        let taxpayer = Taxpayer {
            ordinary_income1: 300_000.0,
            ..Default::default()
        };
        let deduction = deductions::current_law(&policy, &taxpayer, 300_000.0);
        let outcome = federal_amt(&policy, &taxpayer, &deduction, 300_000.0, 0.0);
        let expected_exemption =
            policy.amt_exemption[0] - (300_000.0 - policy.amt_exemption_po_threshold[0]) * 0.25;
        assert_relative_eq!(
            outcome.amt_taxable_income,
            300_000.0 - expected_exemption,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_qualified_income_keeps_preferential_rate_in_amt() {
        let with_qualified = Taxpayer {
            ordinary_income1: 200_000.0,
            qualified_income: 50_000.0,
            sl_income_tax: 30_000.0,
            ..Default::default()
        };
        let all_ordinary = Taxpayer {
            ordinary_income1: 250_000.0,
            sl_income_tax: 30_000.0,
            ..Default::default()
        };
        // Same AMT income either way, but the qualified slice is taxed at
        // the capital gains rate instead of the AMT rates
        let a = run_current_law(&with_qualified);
        let b = run_current_law(&all_ordinary);
        assert_relative_eq!(
            a.amt_taxable_income,
            b.amt_taxable_income,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_amt_never_negative() {
        let policy = Policy::current_law_2018();
        let taxpayer = Taxpayer {
            ordinary_income1: 50_000.0,
            ..Default::default()
        };
        let deduction = deductions::current_law(&policy, &taxpayer, 50_000.0);
        // Huge regular tax, tentative minimum is far below it
        let outcome = federal_amt(&policy, &taxpayer, &deduction, 50_000.0, 1_000_000.0);
        assert_eq!(outcome.amt, 0.0);
    }

    #[test]
    fn test_house_amt_unreachable() {
        let policy = Policy::house_2018();
        let taxpayer = Taxpayer {
            ordinary_income1: 500_000.0,
            ..Default::default()
        };
        let deduction = deductions::house_2018(&policy, &taxpayer, 500_000.0);
        let tax = brackets::house_ordinary_income_tax(&policy, &taxpayer, deduction.taxable_income);
        let outcome = federal_amt(&policy, &taxpayer, &deduction, 500_000.0, tax);
        assert_eq!(outcome.amt, 0.0);
        assert_eq!(outcome.amt_taxable_income, 0.0);
    }
}
