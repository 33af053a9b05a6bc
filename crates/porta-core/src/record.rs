//! # Distribution Record
//!
//! The fixed-shape numeric record one organisation submits for one
//! reporting period: five named non-negative integer fields, one per
//! distribution region, plus a derived total.
//!
//! The total is never stored on this type — [`DistributionRecord::total`]
//! recomputes it from the five fields on every call, so a stale or
//! tampered stored total can never leak through (the store client ignores
//! the persisted `dist_total` on read and rewrites it on every write).
//!
//! Non-negativity is carried by the type: the fields are unsigned, so a
//! negative value cannot be represented. No further range validation is
//! applied anywhere downstream.

use serde::{Deserialize, Serialize};

/// Five regional distribution figures for one reporting period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    /// New South Wales.
    pub nsw: u64,
    /// Queensland.
    pub qld: u64,
    /// South Australia / Northern Territory.
    pub sant: u64,
    /// Victoria / Tasmania.
    pub victas: u64,
    /// Western Australia.
    pub wa: u64,
}

impl DistributionRecord {
    /// Create a record from the five regional figures.
    pub fn new(nsw: u64, qld: u64, sant: u64, victas: u64, wa: u64) -> Self {
        Self {
            nsw,
            qld,
            sant,
            victas,
            wa,
        }
    }

    /// The derived total: always the sum of the five fields, recomputed
    /// on every call.
    pub fn total(&self) -> u64 {
        self.nsw + self.qld + self.sant + self.victas + self.wa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_fields() {
        let record = DistributionRecord::new(1, 2, 0, 0, 0);
        assert_eq!(record.total(), 3);
    }

    #[test]
    fn default_is_all_zero() {
        let record = DistributionRecord::default();
        assert_eq!(record.total(), 0);
    }

    #[test]
    fn total_tracks_mutation() {
        let mut record = DistributionRecord::new(10, 20, 30, 40, 50);
        assert_eq!(record.total(), 150);
        record.wa = 0;
        assert_eq!(record.total(), 100);
    }
}
