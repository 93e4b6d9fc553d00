//! IRS worksheet replicas
//!
//! Each function in this module tree transcribes one IRS worksheet line by
//! line. The line-by-line sequencing is deliberate: reordering the
//! arithmetic silently changes results at phase-out boundaries, so the
//! implementations follow the printed forms even where a shorter algebraic
//! form exists.

pub mod agi;
pub mod amt;
pub mod brackets;
pub mod capital_gains;
pub mod credits;
pub mod deductions;
pub mod payroll;
pub mod withholding;

/// Round a dollar amount to whole cents
pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Round a rate to four decimal places (basis-point precision)
pub(crate) fn round_rate(rate: f64) -> f64 {
    (rate * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round_cents(1234.5649), 1234.56);
        assert_eq!(round_cents(1234.565), 1234.57);
        assert_eq!(round_rate(0.12345), 0.1235);
    }
}
