//! Payroll tax withholding, Additional Medicare Tax, and NIIT

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;

/// Payroll tax liabilities split by party
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayrollTaxes {
    pub employee: f64,
    pub employer: f64,
}

/// Federal payroll tax on both wage incomes for both parties
///
/// Social Security tax applies up to the wage base; Medicare tax has its own
/// (effectively unbounded) wage base. Pure arithmetic over non-negative
/// inputs, never fails.
pub fn federal_payroll(policy: &Policy, taxpayer: &Taxpayer) -> PayrollTaxes {
    let mut taxes = PayrollTaxes::default();

    for income in [taxpayer.ordinary_income1, taxpayer.ordinary_income2] {
        let ss_taxable = income.min(policy.ss_wage_base);
        let medicare_taxable = income.min(policy.medicare_wage_base);

        taxes.employee += policy.ss_withholding_rate_employee * ss_taxable
            + policy.medicare_withholding_rate_employee * medicare_taxable;
        taxes.employer += policy.ss_withholding_rate_employer * ss_taxable
            + policy.medicare_withholding_rate_employer * medicare_taxable;
    }

    taxes
}

/// Additional Medicare Tax and Net Investment Income Tax (Form 8960)
///
/// The surtax applies to combined wage income above the filing-status
/// threshold. NIIT applies to the lesser of investment income and the
/// MAGI excess over the same threshold family.
pub fn medicare_surtax_and_niit(policy: &Policy, taxpayer: &Taxpayer, agi: f64) -> (f64, f64) {
    let status = taxpayer.filing_status.index();
    let threshold = policy.additional_medicare_tax_threshold[status];

    let combined_ordinary_income = taxpayer.earned_income();
    let medicare_surtax = if combined_ordinary_income > threshold {
        (combined_ordinary_income - threshold) * policy.additional_medicare_tax_rate
    } else {
        0.0
    };

    // Form 8960: investment income here is qualified income only
    let line12 = taxpayer.qualified_income;
    let line13 = agi; // MAGI
    let line14 = threshold; // follows the same thresholds
    let line15 = (line13 - line14).max(0.0);
    let line16 = line12.min(line15);
    let niit = line16 * policy.niit_rate; // aka line17

    (medicare_surtax, niit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxpayer::FilingStatus;
    use approx::assert_relative_eq;

    fn single_earner(income: f64) -> Taxpayer {
        Taxpayer {
            ordinary_income1: income,
            ..Default::default()
        }
    }

    #[test]
    fn test_payroll_below_wage_base() {
        let policy = Policy::current_law_2018();
        let taxes = federal_payroll(&policy, &single_earner(50_000.0));

        // 6.2% SS + 1.45% Medicare on each side
        assert_relative_eq!(taxes.employee, 50_000.0 * 0.0765, epsilon = 1e-9);
        assert_relative_eq!(taxes.employer, 50_000.0 * 0.0765, epsilon = 1e-9);
    }

    #[test]
    fn test_payroll_ss_capped_at_wage_base() {
        let policy = Policy::current_law_2018();
        let taxes = federal_payroll(&policy, &single_earner(200_000.0));

        let expected = 128_400.0 * 0.062 + 200_000.0 * 0.0145;
        assert_relative_eq!(taxes.employee, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_payroll_two_earners_each_get_own_cap() {
        let policy = Policy::current_law_2018();
        let taxpayer = Taxpayer {
            filing_status: FilingStatus::Married,
            ordinary_income1: 150_000.0,
            ordinary_income2: 150_000.0,
            ..Default::default()
        };
        let taxes = federal_payroll(&policy, &taxpayer);

        let expected = 2.0 * (128_400.0 * 0.062 + 150_000.0 * 0.0145);
        assert_relative_eq!(taxes.employee, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_medicare_surtax_above_threshold() {
        let policy = Policy::current_law_2018();
        let (surtax, _) = medicare_surtax_and_niit(&policy, &single_earner(250_000.0), 250_000.0);
        assert_relative_eq!(surtax, 50_000.0 * 0.009, epsilon = 1e-9);
    }

    #[test]
    fn test_medicare_surtax_below_threshold_is_zero() {
        let policy = Policy::current_law_2018();
        let (surtax, _) = medicare_surtax_and_niit(&policy, &single_earner(150_000.0), 150_000.0);
        assert_eq!(surtax, 0.0);
    }

    #[test]
    fn test_niit_limited_by_investment_income() {
        let policy = Policy::current_law_2018();
        let taxpayer = Taxpayer {
            ordinary_income1: 250_000.0,
            qualified_income: 10_000.0,
            ..Default::default()
        };
        let (_, niit) = medicare_surtax_and_niit(&policy, &taxpayer, 260_000.0);
        // MAGI excess is 60k but investment income is only 10k
        assert_relative_eq!(niit, 10_000.0 * 0.038, epsilon = 1e-9);
    }

    #[test]
    fn test_niit_limited_by_magi_excess() {
        let policy = Policy::current_law_2018();
        let taxpayer = Taxpayer {
            ordinary_income1: 195_000.0,
            qualified_income: 10_000.0,
            ..Default::default()
        };
        let (_, niit) = medicare_surtax_and_niit(&policy, &taxpayer, 205_000.0);
        assert_relative_eq!(niit, 5_000.0 * 0.038, epsilon = 1e-9);
    }
}
