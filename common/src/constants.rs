// Protocol constants

/// Endorsement super-majority as a fraction of the two-epoch guarantor roster.
pub const SUPER_MAJORITY_NUM: usize = 2;
pub const SUPER_MAJORITY_DEN: usize = 3;

/// Slots a pending report may wait for endorsements before eviction.
pub const REPORT_TIMEOUT_SLOTS: u32 = 100;

/// Divisor for the guarantor-assignment epoch of a report slot.
///
/// The upstream protocol derives this from the true epoch length; it is kept
/// as its own constant so a corrected value replaces it in one place.
pub const EPOCH_LENGTH_SLOTS: u32 = 100;

pub const MAX_DEPENDENCIES: usize = 10;
pub const MAX_WORK_REPORT_GAS: u64 = 200_000;
pub const MIN_SERVICE_ITEM_GAS: u64 = 10;
pub const MAX_CORE_INDEX: u16 = 1023;
pub const ANCHOR_MAX_AGE_SLOTS: u32 = 50;

// System disputer markers recorded in the bad-reports ledger.

pub const SYSTEM_VALIDATION: &str = "system_validation";
pub const SYSTEM_TIMEOUT: &str = "system_timeout";
pub const SYSTEM_ACCUMULATION: &str = "system_accumulation";

/// Minimum endorsement count over a two-epoch roster of `total` guarantors.
pub const fn super_majority_threshold(total: usize) -> usize {
    (total * SUPER_MAJORITY_NUM + SUPER_MAJORITY_DEN - 1) / SUPER_MAJORITY_DEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_ceiling_of_two_thirds() {
        assert_eq!(super_majority_threshold(2), 2);
        assert_eq!(super_majority_threshold(3), 2);
        assert_eq!(super_majority_threshold(4), 3);
        assert_eq!(super_majority_threshold(6), 4);
        assert_eq!(super_majority_threshold(1023), 682);
    }

    #[test]
    fn threshold_of_empty_roster_is_zero() {
        assert_eq!(super_majority_threshold(0), 0);
    }
}
