//! Child Tax Credit, Additional Child Tax Credit, and EITC
//!
//! CTC follows the Publication 972 worksheet: per-child credit minus an
//! AGI phase-out, with any excess over tax liability spilling into the
//! refundable ACTC subject to the earned-income phase-in. EITC follows the
//! Publication 596 three-segment schedule.

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;
use crate::worksheets::round_cents;

/// Nonrefundable and refundable child credit amounts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChildCredits {
    pub ctc: f64,
    pub actc: f64,
}

/// Child Tax Credit with unlimited refundable portion (current law)
pub fn child_tax_credit(
    policy: &Policy,
    taxpayer: &Taxpayer,
    agi: f64,
    tax_liability: f64,
) -> ChildCredits {
    child_tax_credit_inner(policy, taxpayer, agi, tax_liability, None)
}

/// Child Tax Credit with a per-child cap on the refundable portion; overflow
/// above the cap is reclassified back into the nonrefundable credit
pub fn child_tax_credit_actc_limited(
    policy: &Policy,
    taxpayer: &Taxpayer,
    agi: f64,
    tax_liability: f64,
    actc_limit: f64,
) -> ChildCredits {
    child_tax_credit_inner(policy, taxpayer, agi, tax_liability, Some(actc_limit))
}

fn child_tax_credit_inner(
    policy: &Policy,
    taxpayer: &Taxpayer,
    agi: f64,
    tax_liability: f64,
    actc_limit: Option<f64>,
) -> ChildCredits {
    // Part 1: phase out the credit against AGI
    let line1 = taxpayer.child_dep as f64 * policy.ctc_credit;
    let line4 = agi;
    let line5 = policy.ctc_po_threshold[taxpayer.filing_status.index()];
    let line6 = if line4 > line5 {
        ((line4 - line5) / 1_000.0).ceil() * 1_000.0
    } else {
        0.0
    };
    let line7 = line6 * policy.ctc_po_rate;
    let line8 = if line1 > line7 { line1 - line7 } else { 0.0 };

    if line8 <= tax_liability {
        return ChildCredits {
            ctc: line8,
            actc: 0.0,
        };
    }

    // Additional Child Tax Credit: phase in against earned income
    let actc_line1 = line8;
    let actc_line2 = taxpayer.earned_income();
    let actc_line4 = if actc_line2 > policy.additional_ctc_threshold {
        (actc_line2 - policy.additional_ctc_threshold) * policy.additional_ctc_rate
    } else {
        0.0 // no qualified ACTC income
    };

    let mut ctc = (actc_line1 - actc_line4).max(0.0);
    let mut actc = actc_line1.min(actc_line4);

    if let Some(per_child_limit) = actc_limit {
        let cap = taxpayer.child_dep as f64 * per_child_limit;
        if actc > cap {
            let overage = actc - cap;
            actc -= overage;
            ctc += overage;
        }
    }

    if line1 >= policy.additional_ctc_threshold && actc_line4 < actc_line1 {
        // The phased-in amount may exceed what this filer can actually claim
        // without withholding and EITC data; this can overestimate ACTC.
        log::warn!(
            "taxpayer with earned income of ${} may not be eligible for the \
             full additional child tax credit",
            actc_line2
        );
    }

    ChildCredits { ctc, actc }
}

/// Earned Income Tax Credit (Publication 596)
///
/// Phase-in proportional to earned income up to the threshold, flat maximum
/// through the phase-out start, then linear to zero at the maximum income.
pub fn earned_income_credit(policy: &Policy, taxpayer: &Taxpayer) -> f64 {
    let income = taxpayer.earned_income();
    let dependents = (taxpayer.child_dep as usize).min(3);

    let (phaseout, max_income) = if taxpayer.filing_status.is_married() {
        (
            policy.eitc_phaseout_married[dependents],
            policy.eitc_max_income_married[dependents],
        )
    } else {
        (
            policy.eitc_phaseout_single[dependents],
            policy.eitc_max_income_single[dependents],
        )
    };
    let threshold = policy.eitc_threshold[dependents];
    let max_credit = policy.eitc_max[dependents];

    let eitc = if income < threshold {
        income * (max_credit / threshold)
    } else if income <= phaseout {
        max_credit
    } else {
        (max_credit + (phaseout - income) * (max_credit / (max_income - phaseout))).max(0.0)
    };

    round_cents(eitc)
}
