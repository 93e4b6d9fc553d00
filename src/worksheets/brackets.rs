//! Progressive bracket walk over ordinary income
//!
//! The walk runs from the top bracket down, carving off the slice of taxable
//! income above each threshold at that bracket's rate. Thresholds use a
//! strictly-greater-than comparison so income exactly at a boundary stays in
//! the lower bracket.

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;
use crate::worksheets::round_cents;

/// Tax on ordinary taxable income under the regular marginal schedule
pub fn ordinary_income_tax(policy: &Policy, taxpayer: &Taxpayer, taxable_income: f64) -> f64 {
    let brackets = policy.brackets(taxpayer.filing_status);
    let rates = &policy.income_tax_rates;

    let mut tax = 0.0;
    let mut running_taxable_income = taxable_income;
    for (threshold, rate) in brackets.iter().zip(rates.iter()).rev() {
        if taxable_income > *threshold {
            let applicable = running_taxable_income - threshold;
            running_taxable_income -= applicable;
            tax += applicable * rate;
        }
    }

    round_cents(tax)
}

/// Preferential rate on pass-through business income under the House proposal
const BUSINESS_RATE: f64 = 0.25;

/// House-proposal bracket walk with the pass-through business rate
///
/// Business income stacks on top of ordinary income within taxable income.
/// The slice of business income sitting in brackets at or above the
/// preferential rate is taxed at that rate; the slice below is taxed at the
/// lowest bracket rate.
pub fn house_ordinary_income_tax(
    policy: &Policy,
    taxpayer: &Taxpayer,
    taxable_income: f64,
) -> f64 {
    let brackets = policy.brackets(taxpayer.filing_status);
    let rates = &policy.income_tax_rates;

    let taxable_ordinary_income = (taxable_income - taxpayer.business_income).max(0.0);
    let taxable_business_income = taxable_income - taxable_ordinary_income;

    let ordinary_income_tax = ordinary_income_tax(policy, taxpayer, taxable_ordinary_income);

    if taxable_business_income == 0.0 {
        return ordinary_income_tax;
    }

    // First threshold whose marginal rate reaches the preferential rate;
    // business income below it gets the lowest rate instead
    let kick_in_threshold = brackets
        .iter()
        .zip(rates.iter())
        .find(|(_, rate)| **rate >= BUSINESS_RATE)
        .map(|(threshold, _)| *threshold)
        .unwrap_or(f64::INFINITY);
    let lowest_rate = rates.first().copied().unwrap_or(0.0);

    let business_income_over = (taxable_income
        - kick_in_threshold.max(taxable_ordinary_income))
    .max(0.0);
    let business_income_under = taxable_business_income - business_income_over;
    let business_income_tax =
        business_income_over * BUSINESS_RATE + business_income_under * lowest_rate;

    round_cents(ordinary_income_tax + business_income_tax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxpayer::FilingStatus;
    use approx::assert_relative_eq;

    fn single_filer() -> Taxpayer {
        Taxpayer::default()
    }

    #[test]
    fn test_tax_in_bottom_bracket() {
        let policy = Policy::current_law_2018();
        let tax = ordinary_income_tax(&policy, &single_filer(), 5_000.0);
        assert_relative_eq!(tax, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tax_spans_brackets() {
        let policy = Policy::current_law_2018();
        let tax = ordinary_income_tax(&policy, &single_filer(), 50_000.0);
        // 9525 @ 10% + 29175 @ 15% + 11300 @ 25%
        let expected: f64 = 9_525.0 * 0.10 + (38_700.0 - 9_525.0) * 0.15 + (50_000.0 - 38_700.0) * 0.25;
        assert_relative_eq!(tax, (expected * 100.0).round() / 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_income_at_threshold_stays_in_lower_bracket() {
        let policy = Policy::current_law_2018();
        let tax = ordinary_income_tax(&policy, &single_filer(), 9_525.0);
        assert_relative_eq!(tax, 952.50, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_taxable_income() {
        let policy = Policy::current_law_2018();
        assert_eq!(ordinary_income_tax(&policy, &single_filer(), 0.0), 0.0);
    }

    #[test]
    fn test_equivalent_schedules_agree() {
        // A degenerate bracket of width $1 at the same rate changes nothing
        let mut a = Policy::current_law_2018();
        a.income_tax_rates = vec![0.0, 0.1, 0.2];
        a.single_brackets = vec![0.0, 50_000.0, 100_000.0];
        a.validate().unwrap();

        let mut b = Policy::current_law_2018();
        b.income_tax_rates = vec![0.1, 0.1, 0.2];
        b.single_brackets = vec![50_000.0, 50_001.0, 100_000.0];
        b.validate().unwrap();

        let tax_a = ordinary_income_tax(&a, &single_filer(), 200_000.0);
        let tax_b = ordinary_income_tax(&b, &single_filer(), 200_000.0);
        assert_relative_eq!(tax_a, tax_b, epsilon = 1e-9);
    }

    #[test]
    fn test_house_walk_without_business_income() {
        let policy = Policy::house_2018();
        let tax = house_ordinary_income_tax(&policy, &single_filer(), 87_800.0);
        assert_relative_eq!(
            tax,
            ordinary_income_tax(&policy, &single_filer(), 87_800.0),
            epsilon = 1e-9
        );
        // 45000 @ 12% + 42800 @ 25%
        assert_relative_eq!(tax, 16_100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_house_business_income_capped_at_preferential_rate() {
        let policy = Policy::house_2018();
        let taxpayer = Taxpayer {
            business_income: 100_000.0,
            ..Default::default()
        };
        // 200k of ordinary stacked below, 100k of business on top, all of it
        // in brackets above the kick-in so the 25% cap binds throughout
        let tax = house_ordinary_income_tax(&policy, &taxpayer, 300_000.0);
        let ordinary_part = ordinary_income_tax(&policy, &taxpayer, 200_000.0);
        assert_relative_eq!(tax, ordinary_part + 100_000.0 * 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_house_business_income_below_kick_in_at_lowest_rate() {
        let policy = Policy::house_2018();
        let taxpayer = Taxpayer {
            business_income: 30_000.0,
            ..Default::default()
        };
        // All taxable income is under the 45k kick-in threshold
        let tax = house_ordinary_income_tax(&policy, &taxpayer, 40_000.0);
        assert_relative_eq!(tax, 40_000.0 * 0.12, epsilon = 1e-9);
    }

    #[test]
    fn test_house_business_income_straddles_kick_in() {
        let policy = Policy::house_2018();
        let taxpayer = Taxpayer {
            business_income: 40_000.0,
            ..Default::default()
        };
        // 20k ordinary at the bottom, business spans 20k..60k: 25k of it
        // below the 45k kick-in at 12%, 15k above at 25%
        let tax = house_ordinary_income_tax(&policy, &taxpayer, 60_000.0);
        let expected = 20_000.0 * 0.12 + 25_000.0 * 0.12 + 15_000.0 * 0.25;
        assert_relative_eq!(tax, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_married_brackets_selected() {
        let policy = Policy::current_law_2018();
        let married = Taxpayer {
            filing_status: FilingStatus::Married,
            ..Default::default()
        };
        let single_tax = ordinary_income_tax(&policy, &single_filer(), 100_000.0);
        let married_tax = ordinary_income_tax(&policy, &married, 100_000.0);
        assert!(married_tax < single_tax);
    }
}
