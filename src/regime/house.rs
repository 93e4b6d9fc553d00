//! House 2018 proposal pipeline (H.R.1 as described November 3, 2017)

use crate::policy::Policy;
use crate::regime::rates;
use crate::result::TaxResult;
use crate::taxpayer::Taxpayer;
use crate::worksheets::{agi, amt, brackets, capital_gains, credits, deductions, payroll};
use crate::worksheets::round_cents;

/// State and local property tax deduction cap
const PROPERTY_TAX_CAP: f64 = 10_000.0;
/// Mortgage interest deduction cap (halved from current law)
const MORTGAGE_INTEREST_CAP: f64 = 17_500.0;
/// Per-child cap on the refundable portion of the CTC
const ACTC_REFUNDABLE_LIMIT: f64 = 1_100.0;
/// Flat nonrefundable credit per filer
const PERSONAL_CREDIT: f64 = 300.0;
/// Phase-out of the benefit of the bottom bracket, by filing status
const LOWER_RATE_PO_THRESHOLD: [f64; 3] = [1_000_000.0, 1_200_000.0, 1_000_000.0];
const LOWER_RATE_PO_RATE: f64 = 0.06;

/// Itemized deduction limitations; returns a private copy
pub(super) fn adjust(taxpayer: &Taxpayer) -> Taxpayer {
    let mut adjusted = taxpayer.clone();
    adjusted.sl_property_tax = adjusted.sl_property_tax.min(PROPERTY_TAX_CAP);
    adjusted.interest_paid = adjusted.interest_paid.min(MORTGAGE_INTEREST_CAP);
    adjusted.sl_income_tax = 0.0;
    adjusted.medical_expenses = 0.0;
    adjusted
}

/// Phase-out of the bottom-bracket benefit for very high AGI
///
/// The benefit recaptured is the rate spread between the top and bottom
/// brackets applied over the third bracket threshold, phased in at 6% of
/// AGI over the threshold.
fn lower_rate_phase_out(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> f64 {
    let status = taxpayer.filing_status.index();
    if agi <= LOWER_RATE_PO_THRESHOLD[status] {
        return 0.0;
    }
    let brackets = policy.brackets(taxpayer.filing_status);
    let spread_base = brackets.get(2).copied().unwrap_or(0.0);
    let top_rate = policy.income_tax_rates.last().copied().unwrap_or(0.0);
    let bottom_rate = policy.income_tax_rates.first().copied().unwrap_or(0.0);
    let benefit = top_rate * spread_base - bottom_rate * spread_base;
    benefit.min(LOWER_RATE_PO_RATE * (agi - LOWER_RATE_PO_THRESHOLD[status]))
}

pub(super) fn calculate(policy: &Policy, taxpayer: &Taxpayer) -> TaxResult {
    let taxpayer = adjust(taxpayer);

    let gross_income = taxpayer.gross_income();
    let payroll_taxes = payroll::federal_payroll(policy, &taxpayer);
    let ordinary_income_after_401k = taxpayer.ordinary_income_after_401k();
    let agi = agi::federal_agi(policy, &taxpayer, ordinary_income_after_401k);
    let deduction = deductions::house_2018(policy, &taxpayer, agi);

    let po_amount = lower_rate_phase_out(policy, &taxpayer, agi);
    let income_tax_before_credits =
        brackets::house_ordinary_income_tax(policy, &taxpayer, deduction.taxable_income)
            + po_amount;
    let qualified_income_tax = capital_gains::house_qualified_income_tax(
        policy,
        &taxpayer,
        deduction.taxable_income,
        income_tax_before_credits,
        po_amount,
    );
    let selected_tax_before_credits = income_tax_before_credits.min(qualified_income_tax);

    let amt = amt::federal_amt(policy, &taxpayer, &deduction, agi, selected_tax_before_credits);
    let income_tax_before_credits_with_amt = selected_tax_before_credits + amt.amt;

    let child_credits = credits::child_tax_credit_actc_limited(
        policy,
        &taxpayer,
        agi,
        income_tax_before_credits_with_amt,
        ACTC_REFUNDABLE_LIMIT,
    );
    let eitc = credits::earned_income_credit(policy, &taxpayer);
    let personal_credit = taxpayer.filing_status.filers() as f64 * PERSONAL_CREDIT;

    let income_tax_after_nonrefundable_credits = round_cents(
        (income_tax_before_credits_with_amt - child_credits.ctc - personal_credit).max(0.0),
    );

    let (medicare_surtax, niit) = payroll::medicare_surtax_and_niit(policy, &taxpayer, agi);

    let income_tax_after_credits = round_cents(
        income_tax_after_nonrefundable_credits + medicare_surtax + niit
            - child_credits.actc
            - eitc,
    );

    let rates = rates::effective_rates(income_tax_after_credits, payroll_taxes, gross_income);

    TaxResult {
        gross_income,
        employee_payroll_tax: payroll_taxes.employee,
        employer_payroll_tax: payroll_taxes.employer,
        ordinary_income_after_401k,
        agi,
        taxable_income: deduction.taxable_income,
        deduction_type: deduction.deduction_type,
        deductions: deduction.deductions,
        personal_exemption_amt: deduction.personal_exemption,
        pease_limitation_amt: deduction.pease_limitation,
        income_tax_before_credits,
        qualified_income_tax,
        selected_tax_before_credits,
        amt: amt.amt,
        income_tax_before_credits_with_amt,
        ctc: child_credits.ctc,
        actc: child_credits.actc,
        eitc,
        personal_credit: Some(personal_credit),
        dep_credit: None,
        income_tax_after_nonrefundable_credits,
        medicare_surtax,
        niit,
        income_tax_after_credits,
        tax_burden: rates.tax_burden,
        tax_wedge: rates.tax_wedge,
        avg_effective_tax_rate: rates.avg_effective_tax_rate,
        avg_effective_tax_rate_wo_payroll: rates.avg_effective_tax_rate_wo_payroll,
        marginal_rate_ordinary: None,
        marginal_rate_business: None,
    }
}
