//! Load taxpayer batches from CSV
//!
//! The input format is one header row naming the 15 taxpayer fields followed
//! by one row of integer values per household.

use super::Taxpayer;
use crate::error::TaxError;
use csv::{Reader, Writer};
use std::path::Path;

/// Load all taxpayers from a CSV file
pub fn load_taxpayers<P: AsRef<Path>>(path: P) -> Result<Vec<Taxpayer>, TaxError> {
    let mut reader = Reader::from_path(path)?;
    collect_taxpayers(&mut reader)
}

/// Load taxpayers from any reader (e.g., string buffer, request body)
pub fn load_taxpayers_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Taxpayer>, TaxError> {
    let mut csv_reader = Reader::from_reader(reader);
    collect_taxpayers(&mut csv_reader)
}

fn collect_taxpayers<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<Taxpayer>, TaxError> {
    let mut taxpayers = Vec::new();
    for result in reader.deserialize() {
        let taxpayer: Taxpayer = result?;
        taxpayers.push(taxpayer);
    }
    Ok(taxpayers)
}

/// Write a blank single-row input template to the given path
pub fn gen_blank_csv<P: AsRef<Path>>(path: P) -> Result<(), TaxError> {
    let mut writer = Writer::from_path(path)?;
    writer.serialize(Taxpayer::default())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxpayer::FilingStatus;

    const SAMPLE: &str = "\
filing_status,child_dep,nonchild_dep,ordinary_income1,ordinary_income2,business_income,ss_income,qualified_income,401k_contributions,medical_expenses,sl_income_tax,sl_property_tax,interest_paid,charity_contributions,other_itemized
1,2,0,60000,40000,0,0,5000,5500,0,4000,3000,8000,1500,0
0,0,0,30000,0,0,0,0,0,0,0,0,0,0,0
";

    #[test]
    fn test_load_taxpayers_from_reader() {
        let taxpayers = load_taxpayers_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(taxpayers.len(), 2);

        let first = &taxpayers[0];
        assert_eq!(first.filing_status, FilingStatus::Married);
        assert_eq!(first.child_dep, 2);
        assert_eq!(first.ordinary_income2, 40_000.0);
        assert_eq!(first.contributions_401k, 5_500.0);

        let second = &taxpayers[1];
        assert_eq!(second.filing_status, FilingStatus::Single);
        assert_eq!(second.gross_income(), 30_000.0);
    }

    #[test]
    fn test_bad_filing_status_rejected() {
        let bad = "\
filing_status,child_dep,nonchild_dep,ordinary_income1,ordinary_income2,business_income,ss_income,qualified_income,401k_contributions,medical_expenses,sl_income_tax,sl_property_tax,interest_paid,charity_contributions,other_itemized
7,0,0,30000,0,0,0,0,0,0,0,0,0,0,0
";
        assert!(load_taxpayers_from_reader(bad.as_bytes()).is_err());
    }
}
