//! # Reporting-Period Codes
//!
//! A [`PeriodCode`] names one calendar-month reporting cycle in the
//! canonical `YYYY-MM` form (`"2024-05"`). The lexicographic order of
//! valid codes coincides with chronological order, so sorted listings
//! need no extra parsing.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A `YYYY-MM` reporting-period code, validated at construction.
///
/// # Validation
///
/// - Exactly seven characters: four digits, `-`, two digits
/// - Month must be in `01..=12`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PeriodCode(String);

impl PeriodCode {
    /// Create a period code from a string, validating the `YYYY-MM` format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriodCode`] if the string does
    /// not match the format or the month is out of range.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4] == b'-'
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(ValidationError::InvalidPeriodCode(s));
        }
        let month: u32 = s[5..].parse().expect("two ascii digits");
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidPeriodCode(s));
        }
        Ok(Self(s))
    }

    /// Build a period code from a year and 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriodCode`] if the month is not
    /// in `1..=12` or the year is outside `0..=9999`.
    pub fn from_year_month(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidPeriodCode(format!(
                "{year}-{month}"
            )));
        }
        Ok(Self(format!("{year:04}-{month:02}")))
    }

    /// The calendar year named by this code.
    pub fn year(&self) -> i32 {
        self.0[..4].parse().expect("validated at construction")
    }

    /// The 1-based calendar month named by this code.
    pub fn month(&self) -> u32 {
        self.0[5..].parse().expect("validated at construction")
    }

    /// Access the `YYYY-MM` string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PeriodCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for PeriodCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PeriodCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn period_code_valid() {
        let p = PeriodCode::new("2024-05").unwrap();
        assert_eq!(p.year(), 2024);
        assert_eq!(p.month(), 5);
        assert_eq!(p.as_str(), "2024-05");
    }

    #[test]
    fn period_code_rejects_invalid() {
        assert!(PeriodCode::new("").is_err());
        assert!(PeriodCode::new("2024-13").is_err()); // month out of range
        assert!(PeriodCode::new("2024-00").is_err());
        assert!(PeriodCode::new("2024-5").is_err()); // no zero padding
        assert!(PeriodCode::new("2024/05").is_err()); // wrong separator
        assert!(PeriodCode::new("24-05").is_err()); // short year
        assert!(PeriodCode::new("2024-051").is_err()); // trailing digit
        assert!(PeriodCode::new("abcd-ef").is_err());
    }

    #[test]
    fn from_year_month_pads() {
        let p = PeriodCode::from_year_month(987, 3).unwrap();
        assert_eq!(p.as_str(), "0987-03");
    }

    #[test]
    fn from_year_month_rejects_out_of_range() {
        assert!(PeriodCode::from_year_month(2024, 0).is_err());
        assert!(PeriodCode::from_year_month(2024, 13).is_err());
        assert!(PeriodCode::from_year_month(-1, 6).is_err());
        assert!(PeriodCode::from_year_month(10_000, 6).is_err());
    }

    #[test]
    fn deserialize_rejects_malformed() {
        let result: Result<PeriodCode, _> = serde_json::from_str("\"2024-99\"");
        assert!(result.is_err());
        let ok: PeriodCode = serde_json::from_str("\"2023-12\"").unwrap();
        assert_eq!(ok.as_str(), "2023-12");
    }

    #[test]
    fn lexicographic_order_is_chronological() {
        let a = PeriodCode::new("2023-12").unwrap();
        let b = PeriodCode::new("2024-01").unwrap();
        let c = PeriodCode::new("2024-02").unwrap();
        assert!(a < b && b < c);
    }

    proptest! {
        #[test]
        fn roundtrips_through_year_month(year in 0i32..=9999, month in 1u32..=12) {
            let p = PeriodCode::from_year_month(year, month).unwrap();
            prop_assert_eq!(p.year(), year);
            prop_assert_eq!(p.month(), month);
            prop_assert_eq!(PeriodCode::new(p.as_str()).unwrap(), p);
        }
    }
}
