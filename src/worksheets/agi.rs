//! Adjusted gross income and the Social Security taxability worksheet
//!
//! Taxable Social Security follows the worksheet from IRS Publication 915,
//! page 16. Benefits may be partially taxable once provisional income (AGI
//! plus half of benefits) exceeds the base threshold for the filing status.

use crate::policy::Policy;
use crate::taxpayer::Taxpayer;

/// Federal AGI including any taxable Social Security
pub fn federal_agi(policy: &Policy, taxpayer: &Taxpayer, ordinary_income_after_401k: f64) -> f64 {
    let agi =
        ordinary_income_after_401k + taxpayer.business_income + taxpayer.qualified_income;

    if taxpayer.ss_income > 0.0 {
        // Lines 1 through 8 build provisional income: AGI plus half of
        // benefits. No excess over the base threshold means no taxable SS.
        let status = taxpayer.filing_status.index();
        let line1 = taxpayer.ss_income;
        let line2 = line1 / 2.0;
        let line8 = agi + line2;
        let line9 = policy.taxable_ss_base_threshold[status];
        let line10 = (line8 - line9).max(0.0);
        if line10 > 0.0 {
            let line11 =
                policy.taxable_ss_top_threshold[status] - policy.taxable_ss_base_threshold[status];
            let line12 = (line10 - line11).max(0.0);
            let line13 = line10.min(line11);
            let line14 = line13 * policy.taxable_ss_base_amt;
            let line15 = line14.min(line2);
            let line16 = (line12 * policy.taxable_ss_top_amt).max(0.0);
            let line17 = line15 + line16;
            let line18 = taxpayer.ss_income * policy.taxable_ss_top_amt;
            let line19 = line17.min(line18); // Line 20b on 1040
            return agi + line19;
        }
    }
    agi
}
