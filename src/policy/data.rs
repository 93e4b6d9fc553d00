//! Policy parameter set for one tax regime
//!
//! Filing-status-indexed parameters hold [single, married, head-of-household]
//! values; EITC tables are indexed by qualifying-child count capped at 3.
//! A `Policy` is built once (from CSV or from the embedded 2018 parameter
//! sets) and never mutated afterward; tests that need to perturb one clone it.

use crate::error::TaxError;
use crate::taxpayer::FilingStatus;
use serde::{Deserialize, Serialize};

/// Complete parameter set for one regime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    // Payroll withholding
    pub ss_withholding_rate_employee: f64,
    pub ss_withholding_rate_employer: f64,
    pub ss_wage_base: f64,
    pub medicare_withholding_rate_employee: f64,
    pub medicare_withholding_rate_employer: f64,
    pub medicare_wage_base: f64,

    // Additional Medicare Tax and Net Investment Income Tax
    pub additional_medicare_tax_rate: f64,
    pub additional_medicare_tax_threshold: [f64; 3],
    pub niit_rate: f64,

    // Social Security taxability (Publication 915)
    pub taxable_ss_base_threshold: [f64; 3],
    pub taxable_ss_top_threshold: [f64; 3],
    pub taxable_ss_base_amt: f64,
    pub taxable_ss_top_amt: f64,

    // Personal exemption and its phase-out
    pub personal_exemption: f64,
    pub personal_exemption_po_threshold: [f64; 3],
    pub personal_exemption_po_amt: f64,
    pub personal_exemption_po_rate: f64,

    // Standard deduction
    pub standard_deduction: [f64; 3],
    pub additional_standard_deduction: [f64; 3],

    // Pease limitation on itemized deductions
    pub itemized_limitation_amt: f64,
    pub itemized_limitation_rate: f64,
    pub itemized_limitation_threshold: [f64; 3],

    // Ordinary income brackets (ascending thresholds, matching rates)
    pub income_tax_rates: Vec<f64>,
    pub single_brackets: Vec<f64>,
    pub married_brackets: Vec<f64>,
    pub hoh_brackets: Vec<f64>,

    // Capital gains worksheet tiers
    pub cap_gains_lower_threshold: [f64; 3],
    pub cap_gains_upper_threshold: [f64; 3],
    pub cap_gains_lower_rate: f64,
    pub cap_gains_upper_rate: f64,

    // Alternative Minimum Tax (Form 6251)
    pub amt_exemption: [f64; 3],
    pub amt_exemption_po_threshold: [f64; 3],
    pub amt_exemption_po_rate: f64,
    pub amt_rate_threshold: f64,
    pub amt_rates: [f64; 2],

    // Child Tax Credit
    pub ctc_credit: f64,
    pub ctc_po_threshold: [f64; 3],
    pub ctc_po_rate: f64,
    pub additional_ctc_threshold: f64,
    pub additional_ctc_rate: f64,

    // Earned Income Tax Credit, indexed by min(child_dep, 3)
    pub eitc_threshold: [f64; 4],
    pub eitc_max: [f64; 4],
    pub eitc_phaseout_single: [f64; 4],
    pub eitc_phaseout_married: [f64; 4],
    pub eitc_max_income_single: [f64; 4],
    pub eitc_max_income_married: [f64; 4],
}

impl Policy {
    /// Bracket threshold schedule for a filing status
    pub fn brackets(&self, status: FilingStatus) -> &[f64] {
        match status {
            FilingStatus::Single => &self.single_brackets,
            FilingStatus::Married => &self.married_brackets,
            FilingStatus::HeadOfHousehold => &self.hoh_brackets,
        }
    }

    /// Check bracket schedule invariants
    ///
    /// Each threshold list must be monotonically non-decreasing and the same
    /// length as the rate list, so the bracket walk pairs them one-to-one.
    pub fn validate(&self) -> Result<(), TaxError> {
        let schedules: [(&'static str, &[f64]); 3] = [
            ("single_brackets", &self.single_brackets),
            ("married_brackets", &self.married_brackets),
            ("hoh_brackets", &self.hoh_brackets),
        ];
        for (name, brackets) in schedules {
            if brackets.len() != self.income_tax_rates.len() {
                return Err(TaxError::BracketLengthMismatch(name));
            }
            if brackets.windows(2).any(|w| w[1] < w[0]) {
                return Err(TaxError::UnsortedBrackets(name));
            }
        }
        Ok(())
    }

    /// Current law parameters for tax year 2018 (pre-TCJA law, as projected)
    pub fn current_law_2018() -> Self {
        Self {
            ss_withholding_rate_employee: 0.062,
            ss_withholding_rate_employer: 0.062,
            ss_wage_base: 128_400.0,
            medicare_withholding_rate_employee: 0.0145,
            medicare_withholding_rate_employer: 0.0145,
            medicare_wage_base: 999_999_999.0,
            additional_medicare_tax_rate: 0.009,
            additional_medicare_tax_threshold: [200_000.0, 250_000.0, 200_000.0],
            niit_rate: 0.038,
            taxable_ss_base_threshold: [25_000.0, 32_000.0, 25_000.0],
            taxable_ss_top_threshold: [34_000.0, 44_000.0, 34_000.0],
            taxable_ss_base_amt: 0.5,
            taxable_ss_top_amt: 0.85,
            personal_exemption: 4_150.0,
            personal_exemption_po_threshold: [266_700.0, 320_000.0, 293_350.0],
            personal_exemption_po_amt: 2_500.0,
            personal_exemption_po_rate: 0.02,
            standard_deduction: [6_500.0, 13_000.0, 9_550.0],
            additional_standard_deduction: [1_550.0, 1_250.0, 1_550.0],
            itemized_limitation_amt: 0.80,
            itemized_limitation_rate: 0.03,
            itemized_limitation_threshold: [266_700.0, 320_000.0, 293_350.0],
            income_tax_rates: vec![0.10, 0.15, 0.25, 0.28, 0.33, 0.35, 0.396],
            single_brackets: vec![
                0.0, 9_525.0, 38_700.0, 93_700.0, 195_450.0, 424_950.0, 426_700.0,
            ],
            married_brackets: vec![
                0.0, 19_050.0, 77_400.0, 156_150.0, 237_950.0, 424_950.0, 480_050.0,
            ],
            hoh_brackets: vec![
                0.0, 13_600.0, 51_850.0, 133_850.0, 216_700.0, 424_950.0, 453_350.0,
            ],
            cap_gains_lower_threshold: [38_700.0, 77_400.0, 51_850.0],
            cap_gains_upper_threshold: [426_700.0, 480_050.0, 453_350.0],
            cap_gains_lower_rate: 0.15,
            cap_gains_upper_rate: 0.20,
            amt_exemption: [55_400.0, 86_200.0, 55_400.0],
            amt_exemption_po_threshold: [123_100.0, 164_100.0, 123_100.0],
            amt_exemption_po_rate: 0.25,
            amt_rate_threshold: 191_100.0,
            amt_rates: [0.26, 0.28],
            ctc_credit: 1_000.0,
            ctc_po_threshold: [75_000.0, 110_000.0, 75_000.0],
            ctc_po_rate: 0.05,
            additional_ctc_threshold: 3_000.0,
            additional_ctc_rate: 0.15,
            eitc_threshold: [6_800.0, 10_200.0, 14_320.0, 14_320.0],
            eitc_max: [520.0, 3_468.0, 5_728.0, 6_444.0],
            eitc_phaseout_single: [8_510.0, 18_700.0, 18_700.0, 18_700.0],
            eitc_phaseout_married: [14_200.0, 24_400.0, 24_400.0, 24_400.0],
            eitc_max_income_single: [15_310.0, 40_402.0, 45_898.0, 49_298.0],
            eitc_max_income_married: [21_000.0, 46_102.0, 51_598.0, 54_998.0],
        }
    }

    /// House 2018 proposal parameters (H.R.1 as described November 3, 2017)
    ///
    /// Four-bracket schedule with a 12% bottom rate, near-doubled standard
    /// deduction, personal exemption and additional standard deduction
    /// eliminated, Pease limitation and AMT repealed (thresholds pushed out
    /// of reach), larger CTC.
    pub fn house_2018() -> Self {
        let unreachable = [999_999_999.0, 999_999_999.0, 999_999_999.0];
        Self {
            personal_exemption: 0.0,
            standard_deduction: [12_200.0, 24_400.0, 18_300.0],
            additional_standard_deduction: [0.0, 0.0, 0.0],
            itemized_limitation_threshold: unreachable,
            income_tax_rates: vec![0.12, 0.25, 0.35, 0.396],
            single_brackets: vec![0.0, 45_000.0, 200_000.0, 500_000.0],
            married_brackets: vec![0.0, 90_000.0, 260_000.0, 1_000_000.0],
            hoh_brackets: vec![0.0, 67_500.0, 230_000.0, 500_000.0],
            amt_exemption: unreachable,
            amt_exemption_po_threshold: unreachable,
            ctc_credit: 1_600.0,
            ctc_po_threshold: [115_000.0, 230_000.0, 115_000.0],
            ..Self::current_law_2018()
        }
    }

    /// Senate 2018 proposal parameters (Chairman's Mark, November 9, 2017)
    ///
    /// Seven lowered rates, near-doubled standard deduction (additional
    /// standard deduction retained), personal exemption and Pease
    /// limitation eliminated, AMT retained with a higher exemption, $2,000
    /// CTC with a much higher phase-out threshold.
    pub fn senate_2018() -> Self {
        let unreachable = [999_999_999.0, 999_999_999.0, 999_999_999.0];
        Self {
            personal_exemption: 0.0,
            standard_deduction: [12_000.0, 24_000.0, 18_000.0],
            itemized_limitation_threshold: unreachable,
            income_tax_rates: vec![0.10, 0.12, 0.22, 0.24, 0.32, 0.35, 0.385],
            single_brackets: vec![
                0.0, 9_525.0, 38_700.0, 70_000.0, 160_000.0, 200_000.0, 500_000.0,
            ],
            married_brackets: vec![
                0.0, 19_050.0, 77_400.0, 140_000.0, 320_000.0, 400_000.0, 1_000_000.0,
            ],
            hoh_brackets: vec![
                0.0, 13_600.0, 51_800.0, 70_000.0, 160_000.0, 200_000.0, 500_000.0,
            ],
            amt_exemption: [70_300.0, 109_400.0, 70_300.0],
            amt_exemption_po_threshold: [500_000.0, 1_000_000.0, 500_000.0],
            ctc_credit: 2_000.0,
            ctc_po_threshold: [200_000.0, 400_000.0, 200_000.0],
            additional_ctc_threshold: 2_500.0,
            ..Self::current_law_2018()
        }
    }
}
