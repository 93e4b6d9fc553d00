//! CSV-based policy parameter loader
//!
//! Parameter files are row-oriented with no header: column 0 is the
//! parameter name and the remaining columns are its values. One value makes
//! a scalar; three values are indexed by filing status; four by qualifying
//! child count; bracket schedules may be any length.

use super::Policy;
use crate::error::TaxError;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

/// Raw name -> values table parsed from one parameter file
struct ParamTable(HashMap<String, Vec<f64>>);

impl ParamTable {
    fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, TaxError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = HashMap::new();
        for result in csv_reader.records() {
            let record = result?;
            let mut fields = record.iter();
            let name = match fields.next() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };
            let mut values = Vec::new();
            for field in fields {
                if !field.is_empty() {
                    values.push(field.trim().parse::<f64>()?);
                }
            }
            table.insert(name, values);
        }
        Ok(ParamTable(table))
    }

    fn scalar(&self, name: &str) -> Result<f64, TaxError> {
        let values = self.values(name)?;
        if values.len() != 1 {
            return Err(TaxError::ParameterArity {
                name: name.to_string(),
                expected: 1,
                found: values.len(),
            });
        }
        Ok(values[0])
    }

    fn fixed<const N: usize>(&self, name: &str) -> Result<[f64; N], TaxError> {
        let values = self.values(name)?;
        values
            .as_slice()
            .try_into()
            .map_err(|_| TaxError::ParameterArity {
                name: name.to_string(),
                expected: N,
                found: values.len(),
            })
    }

    fn list(&self, name: &str) -> Result<Vec<f64>, TaxError> {
        Ok(self.values(name)?.clone())
    }

    fn values(&self, name: &str) -> Result<&Vec<f64>, TaxError> {
        self.0
            .get(name)
            .ok_or_else(|| TaxError::MissingParameter(name.to_string()))
    }
}

/// Load and validate a policy parameter set from a CSV file
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<Policy, TaxError> {
    let file = std::fs::File::open(path)?;
    load_policy_from_reader(file)
}

/// Load and validate a policy parameter set from any reader
pub fn load_policy_from_reader<R: std::io::Read>(reader: R) -> Result<Policy, TaxError> {
    let table = ParamTable::from_reader(reader)?;
    let policy = Policy {
        ss_withholding_rate_employee: table.scalar("ss_withholding_rate_employee")?,
        ss_withholding_rate_employer: table.scalar("ss_withholding_rate_employer")?,
        ss_wage_base: table.scalar("ss_wage_base")?,
        medicare_withholding_rate_employee: table.scalar("medicare_withholding_rate_employee")?,
        medicare_withholding_rate_employer: table.scalar("medicare_withholding_rate_employer")?,
        medicare_wage_base: table.scalar("medicare_wage_base")?,
        additional_medicare_tax_rate: table.scalar("additional_medicare_tax_rate")?,
        additional_medicare_tax_threshold: table.fixed("additional_medicare_tax_threshold")?,
        niit_rate: table.scalar("niit_rate")?,
        taxable_ss_base_threshold: table.fixed("taxable_ss_base_threshold")?,
        taxable_ss_top_threshold: table.fixed("taxable_ss_top_threshold")?,
        taxable_ss_base_amt: table.scalar("taxable_ss_base_amt")?,
        taxable_ss_top_amt: table.scalar("taxable_ss_top_amt")?,
        personal_exemption: table.scalar("personal_exemption")?,
        personal_exemption_po_threshold: table.fixed("personal_exemption_po_threshold")?,
        personal_exemption_po_amt: table.scalar("personal_exemption_po_amt")?,
        personal_exemption_po_rate: table.scalar("personal_exemption_po_rate")?,
        standard_deduction: table.fixed("standard_deduction")?,
        additional_standard_deduction: table.fixed("additional_standard_deduction")?,
        itemized_limitation_amt: table.scalar("itemized_limitation_amt")?,
        itemized_limitation_rate: table.scalar("itemized_limitation_rate")?,
        itemized_limitation_threshold: table.fixed("itemized_limitation_threshold")?,
        income_tax_rates: table.list("income_tax_rates")?,
        single_brackets: table.list("single_brackets")?,
        married_brackets: table.list("married_brackets")?,
        hoh_brackets: table.list("hoh_brackets")?,
        cap_gains_lower_threshold: table.fixed("cap_gains_lower_threshold")?,
        cap_gains_upper_threshold: table.fixed("cap_gains_upper_threshold")?,
        cap_gains_lower_rate: table.scalar("cap_gains_lower_rate")?,
        cap_gains_upper_rate: table.scalar("cap_gains_upper_rate")?,
        amt_exemption: table.fixed("amt_exemption")?,
        amt_exemption_po_threshold: table.fixed("amt_exemption_po_threshold")?,
        amt_exemption_po_rate: table.scalar("amt_exemption_po_rate")?,
        amt_rate_threshold: table.scalar("amt_rate_threshold")?,
        amt_rates: table.fixed("amt_rates")?,
        ctc_credit: table.scalar("ctc_credit")?,
        ctc_po_threshold: table.fixed("ctc_po_threshold")?,
        ctc_po_rate: table.scalar("ctc_po_rate")?,
        additional_ctc_threshold: table.scalar("additional_ctc_threshold")?,
        additional_ctc_rate: table.scalar("additional_ctc_rate")?,
        eitc_threshold: table.fixed("eitc_threshold")?,
        eitc_max: table.fixed("eitc_max")?,
        eitc_phaseout_single: table.fixed("eitc_phaseout_single")?,
        eitc_phaseout_married: table.fixed("eitc_phaseout_married")?,
        eitc_max_income_single: table.fixed("eitc_max_income_single")?,
        eitc_max_income_married: table.fixed("eitc_max_income_married")?,
    };
    policy.validate()?;
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_table_shapes() {
        let table = ParamTable::from_reader(
            "flat_rate,0.062\nby_status,100,200,300\nbrackets,0,9525,38700\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(table.scalar("flat_rate").unwrap(), 0.062);
        assert_eq!(table.fixed::<3>("by_status").unwrap(), [100.0, 200.0, 300.0]);
        assert_eq!(table.list("brackets").unwrap().len(), 3);
    }

    #[test]
    fn test_missing_parameter() {
        let table = ParamTable::from_reader("flat_rate,0.062\n".as_bytes()).unwrap();
        assert!(matches!(
            table.scalar("absent"),
            Err(TaxError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_wrong_arity() {
        let table = ParamTable::from_reader("by_status,100,200\n".as_bytes()).unwrap();
        assert!(matches!(
            table.fixed::<3>("by_status"),
            Err(TaxError::ParameterArity { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_load_shipped_parameter_files() {
        for name in [
            "params/current_law_2018.csv",
            "params/house_2018.csv",
            "params/senate_2018.csv",
        ] {
            let policy = load_policy(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            policy.validate().unwrap();
        }
    }

    #[test]
    fn test_shipped_current_law_matches_builtin() {
        let loaded = load_policy("params/current_law_2018.csv").unwrap();
        let builtin = Policy::current_law_2018();
        assert_eq!(loaded.standard_deduction, builtin.standard_deduction);
        assert_eq!(loaded.single_brackets, builtin.single_brackets);
        assert_eq!(loaded.eitc_max, builtin.eitc_max);
    }
}
