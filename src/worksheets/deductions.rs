//! Taxable income worksheets: exemptions, deductions, and the Pease limitation
//!
//! Three variants share the same skeleton: personal exemption, standard
//! deduction, itemized deduction sum, Pease limitation, then the greater of
//! itemized and standard. They diverge exactly where the proposals diverge
//! from current law (Publication 501 and the Itemized Deductions
//! Worksheet, Schedule A instructions line 29).

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;
use serde::{Deserialize, Serialize};

/// Which deduction the filer ended up taking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductionType {
    Standard,
    Itemized,
}

/// Everything the rest of the pipeline needs from the deduction worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionOutcome {
    /// Taxable income after exemptions and all deductions
    pub taxable_income: f64,
    pub deduction_type: DeductionType,
    /// Total deduction taken (itemized after limitation, or standard)
    pub deductions: f64,
    pub personal_exemption: f64,
    /// Amount the Pease limitation removed (reversed later in the AMT)
    pub pease_limitation: f64,
    /// Taxable income before the Senate business-income deduction; equal to
    /// `taxable_income` under the other variants. The AMT worksheet needs
    /// the undeducted figure.
    pub taxable_income_before_qbi: f64,
}

/// Exemptions claimed: filers plus all dependents
fn exemptions_claimed(taxpayer: &Taxpayer) -> f64 {
    (taxpayer.filing_status.filers() + taxpayer.child_dep + taxpayer.nonchild_dep) as f64
}

/// Personal exemption with the current-law phase-out
///
/// Excess AGI is rounded up to the nearest phase-out unit ($2,500); each
/// unit removes `po_rate` of the exemption, with the fraction rounded to
/// three decimals per the worksheet.
fn phased_personal_exemption(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> f64 {
    let claimed = exemptions_claimed(taxpayer);
    let threshold = policy.personal_exemption_po_threshold[taxpayer.filing_status.index()];
    let personal_exemption = policy.personal_exemption * claimed;
    if agi > threshold {
        let amt_over_threshold = agi - threshold;
        let line6 = (amt_over_threshold / policy.personal_exemption_po_amt).ceil();
        let line7 = (line6 * policy.personal_exemption_po_rate * 1_000.0).round() / 1_000.0;
        let line8 = personal_exemption * line7;
        (personal_exemption - line8).max(0.0) // aka line9
    } else {
        personal_exemption
    }
}

/// Personal exemption under the proposals: eliminated entirely once AGI
/// passes the phase-out threshold, full below it
fn cliff_personal_exemption(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> f64 {
    let threshold = policy.personal_exemption_po_threshold[taxpayer.filing_status.index()];
    if agi > threshold {
        0.0
    } else {
        policy.personal_exemption * exemptions_claimed(taxpayer)
    }
}

/// Pease limitation. Returns (limitation amount, itemized total after it)
fn pease_limitation(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> (f64, f64) {
    let itemized_total = taxpayer.itemized_total();
    let line1 = itemized_total;
    // line2 could also include investment interest and casualty deductions
    let line2 = taxpayer.medical_expenses;
    if line2 < line1 {
        let line3 = line1 - line2;
        let line4 = line3 * policy.itemized_limitation_amt;
        let line5 = agi;
        let line6 = policy.itemized_limitation_threshold[taxpayer.filing_status.index()];
        if line6 < line5 {
            let line7 = line5 - line6;
            let line8 = line7 * policy.itemized_limitation_rate;
            let line9 = line4.min(line8);
            return (line9, line1 - line9); // aka line10
        }
    }
    (0.0, itemized_total)
}

fn pick_deduction(itemized_total: f64, standard_deduction: f64) -> (f64, DeductionType) {
    let deductions = itemized_total.max(standard_deduction);
    if deductions == standard_deduction {
        (deductions, DeductionType::Standard)
    } else {
        (deductions, DeductionType::Itemized)
    }
}

/// Current-law taxable income (Publication 501 exemption phase-out,
/// additional standard deduction for Social Security recipients)
pub fn current_law(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> DeductionOutcome {
    let status = taxpayer.filing_status.index();
    let personal_exemption = phased_personal_exemption(policy, taxpayer, agi);

    let mut standard_deduction = policy.standard_deduction[status];
    if taxpayer.ss_income > 0.0 {
        standard_deduction += taxpayer.filing_status.filers() as f64
            * policy.additional_standard_deduction[status];
    }

    let (pease, itemized_total) = pease_limitation(policy, taxpayer, agi);
    let (deductions, deduction_type) = pick_deduction(itemized_total, standard_deduction);
    let taxable_income = (agi - personal_exemption - deductions).max(0.0);

    DeductionOutcome {
        taxable_income,
        deduction_type,
        deductions,
        personal_exemption,
        pease_limitation: pease,
        taxable_income_before_qbi: taxable_income,
    }
}

/// House 2018 taxable income: additional standard deduction eliminated,
/// personal exemption eliminated above the threshold rather than phased
pub fn house_2018(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> DeductionOutcome {
    let status = taxpayer.filing_status.index();
    let personal_exemption = cliff_personal_exemption(policy, taxpayer, agi);
    let standard_deduction = policy.standard_deduction[status];

    let (pease, itemized_total) = pease_limitation(policy, taxpayer, agi);
    let (deductions, deduction_type) = pick_deduction(itemized_total, standard_deduction);
    let taxable_income = (agi - personal_exemption - deductions).max(0.0);

    DeductionOutcome {
        taxable_income,
        deduction_type,
        deductions,
        personal_exemption,
        pease_limitation: pease,
        taxable_income_before_qbi: taxable_income,
    }
}

/// Deduction rate for qualified pass-through business income under the
/// Senate proposal (conference agreement, December 15, 2017)
const BUSINESS_DEDUCTION_RATE: f64 = 0.20;

/// Senate 2018 taxable income: keeps the additional standard deduction,
/// eliminates the exemption above the threshold, and adds the 20%
/// qualified-business-income deduction with its own phase-out window
pub fn senate_2018(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> DeductionOutcome {
    let status = taxpayer.filing_status.index();
    let personal_exemption = cliff_personal_exemption(policy, taxpayer, agi);

    let mut standard_deduction = policy.standard_deduction[status];
    if taxpayer.ss_income > 0.0 {
        standard_deduction += taxpayer.filing_status.filers() as f64
            * policy.additional_standard_deduction[status];
    }

    let (pease, itemized_total) = pease_limitation(policy, taxpayer, agi);
    let (mut deductions, deduction_type) = pick_deduction(itemized_total, standard_deduction);

    let taxable_income_before = (agi - personal_exemption - deductions).max(0.0);

    let mut qualified_business_income = taxpayer.business_income * BUSINESS_DEDUCTION_RATE;
    let taxable_income_limit = taxable_income_before * BUSINESS_DEDUCTION_RATE;

    let (po_start, po_length) = if taxpayer.filing_status.is_married() {
        (315_000.0, 100_000.0)
    } else {
        (315_000.0 / 2.0, 50_000.0)
    };

    if taxable_income_before > po_start {
        let taxable_income_over = taxable_income_before - po_start;
        if taxable_income_over > po_length {
            qualified_business_income = 0.0;
        } else {
            let multiplier = 1.0 - (taxable_income_over / po_length);
            qualified_business_income *= multiplier;
        }
    }

    let business_income_deduction = qualified_business_income.min(taxable_income_limit);
    deductions += business_income_deduction;

    let taxable_income = (agi - personal_exemption - deductions).max(0.0);

    DeductionOutcome {
        taxable_income,
        deduction_type,
        deductions,
        personal_exemption,
        pease_limitation: pease,
        taxable_income_before_qbi: taxable_income_before,
    }
}
