//! Current-law (2018 projected, pre-TCJA) pipeline

use crate::policy::Policy;
use crate::regime::rates;
use crate::result::TaxResult;
use crate::taxpayer::Taxpayer;
use crate::worksheets::{agi, amt, brackets, capital_gains, credits, deductions, payroll};
use crate::worksheets::round_cents;

/// Mortgage interest deduction cap (two-earner limit)
const MORTGAGE_INTEREST_CAP: f64 = 35_000.0;

/// Deduction caps applied before the pipeline runs; returns a private copy
pub(super) fn adjust(taxpayer: &Taxpayer) -> Taxpayer {
    let mut adjusted = taxpayer.clone();
    adjusted.interest_paid = adjusted.interest_paid.min(MORTGAGE_INTEREST_CAP);
    adjusted
}

pub(super) fn calculate(policy: &Policy, taxpayer: &Taxpayer) -> TaxResult {
    let taxpayer = adjust(taxpayer);

    let gross_income = taxpayer.gross_income();
    let payroll_taxes = payroll::federal_payroll(policy, &taxpayer);
    let ordinary_income_after_401k = taxpayer.ordinary_income_after_401k();
    let agi = agi::federal_agi(policy, &taxpayer, ordinary_income_after_401k);
    let deduction = deductions::current_law(policy, &taxpayer, agi);

    let income_tax_before_credits =
        brackets::ordinary_income_tax(policy, &taxpayer, deduction.taxable_income);
    let qualified_income_tax = capital_gains::qualified_income_tax(
        policy,
        &taxpayer,
        deduction.taxable_income,
        income_tax_before_credits,
    );
    // Form 1040 line 44
    let selected_tax_before_credits = income_tax_before_credits.min(qualified_income_tax);

    let amt = amt::federal_amt(policy, &taxpayer, &deduction, agi, selected_tax_before_credits);
    let income_tax_before_credits_with_amt = selected_tax_before_credits + amt.amt;

    let child_credits =
        credits::child_tax_credit(policy, &taxpayer, agi, income_tax_before_credits_with_amt);
    let eitc = credits::earned_income_credit(policy, &taxpayer);

    let income_tax_after_nonrefundable_credits =
        round_cents((income_tax_before_credits_with_amt - child_credits.ctc).max(0.0));

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
        personal_credit: None,
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
