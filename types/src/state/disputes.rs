use jr_common::SlotIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A rejected or disputed digest (a ψ_B entry).
///
/// `disputed_by` holds hex guarantor ids and the system markers; the reason
/// recorded at first insertion is kept on later disputes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadReport {
    pub reason: String,
    pub disputed_by: BTreeSet<String>,
}

impl BadReport {
    pub fn new(reason: impl Into<String>, disputer: impl Into<String>) -> Self {
        let mut disputed_by = BTreeSet::new();
        disputed_by.insert(disputer.into());
        Self {
            reason: reason.into(),
            disputed_by,
        }
    }

    pub fn add_disputer(&mut self, disputer: impl Into<String>) {
        self.disputed_by.insert(disputer.into());
    }
}

/// Per-guarantor dispute tally (a ψ_O entry). `dispute_count` is monotone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenderRecord {
    pub dispute_count: u64,
    pub last_dispute_slot: SlotIndex,
}

impl OffenderRecord {
    pub fn first_charge(slot: SlotIndex) -> Self {
        Self {
            dispute_count: 1,
            last_dispute_slot: slot,
        }
    }

    pub fn charge(&mut self, slot: SlotIndex) {
        self.dispute_count += 1;
        self.last_dispute_slot = slot;
    }
}
