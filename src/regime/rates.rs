//! Burden, wedge, and average effective rate aggregates

use crate::worksheets::payroll::PayrollTaxes;
use crate::worksheets::round_rate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRates {
    pub tax_burden: f64,
    pub tax_wedge: f64,
    pub avg_effective_tax_rate: f64,
    pub avg_effective_tax_rate_wo_payroll: f64,
}

/// Derive burden, wedge, and average rates from a finished calculation
///
/// Burden is income tax plus the employee side of payroll; the wedge adds
/// the employer side. Average rates divide by gross income; a zero-income
/// taxpayer gets rates of 0 with a warning rather than an error.
pub fn effective_rates(
    income_tax_after_credits: f64,
    payroll_taxes: PayrollTaxes,
    gross_income: f64,
) -> EffectiveRates {
    let tax_burden = income_tax_after_credits + payroll_taxes.employee;
    let tax_wedge = tax_burden + payroll_taxes.employer;

    let (avg_effective_tax_rate, avg_effective_tax_rate_wo_payroll) = if gross_income > 0.0 {
        (
            tax_burden / gross_income,
            income_tax_after_credits / gross_income,
        )
    } else {
        log::warn!("taxpayer has gross income of $0; potential refund not reflected in rates");
        (0.0, 0.0)
    };

    EffectiveRates {
        tax_burden,
        tax_wedge,
        avg_effective_tax_rate: round_rate(avg_effective_tax_rate),
        avg_effective_tax_rate_wo_payroll: round_rate(avg_effective_tax_rate_wo_payroll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_burden_and_wedge() {
        let payroll = PayrollTaxes {
            employee: 3_825.0,
            employer: 3_825.0,
        };
        let rates = effective_rates(5_000.0, payroll, 50_000.0);
        assert_relative_eq!(rates.tax_burden, 8_825.0, epsilon = 1e-9);
        assert_relative_eq!(rates.tax_wedge, 12_650.0, epsilon = 1e-9);
        assert_relative_eq!(rates.avg_effective_tax_rate, 0.1765, epsilon = 1e-9);
        assert_relative_eq!(rates.avg_effective_tax_rate_wo_payroll, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_income_rates_are_zero() {
        let rates = effective_rates(-500.0, PayrollTaxes::default(), 0.0);
        assert_eq!(rates.avg_effective_tax_rate, 0.0);
        assert_eq!(rates.avg_effective_tax_rate_wo_payroll, 0.0);
        // Burden still reflects the refund
        assert_eq!(rates.tax_burden, -500.0);
    }

    #[test]
    fn test_negative_burden_allowed_with_income() {
        let rates = effective_rates(-2_000.0, PayrollTaxes::default(), 10_000.0);
        assert!(rates.avg_effective_tax_rate < 0.0);
    }
}
