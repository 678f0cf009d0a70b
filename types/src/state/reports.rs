use crate::workloads::WorkReport;
use jr_common::{GuarantorId, SlotIndex, REPORT_TIMEOUT_SLOTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A report waiting for its endorsement super-majority (a ρ entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReport {
    pub report: WorkReport,
    pub received_signatures: BTreeSet<GuarantorId>,
    /// Slot of the first observed guarantee; drives the timeout.
    pub submission_slot: SlotIndex,
}

impl PendingReport {
    pub fn new(report: WorkReport, first_signer: GuarantorId, slot: SlotIndex) -> Self {
        let mut received_signatures = BTreeSet::new();
        received_signatures.insert(first_signer);
        Self {
            report,
            received_signatures,
            submission_slot: slot,
        }
    }

    /// Adds an endorsement; `false` if this identity already signed.
    pub fn insert_signature(&mut self, signer: GuarantorId) -> bool {
        self.received_signatures.insert(signer)
    }

    pub fn signature_count(&self) -> usize {
        self.received_signatures.len()
    }

    pub fn is_timed_out(&self, current_slot: SlotIndex) -> bool {
        current_slot.saturating_sub(self.submission_slot) > REPORT_TIMEOUT_SLOTS
    }
}

/// Processing status of an accumulation-queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Pending,
    Ready,
    Processing,
}

/// An endorsed report awaiting accumulation (an ω entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedReport {
    pub report: WorkReport,
    pub status: QueueStatus,
}

impl QueuedReport {
    pub fn ready(report: WorkReport) -> Self {
        Self {
            report,
            status: QueueStatus::Ready,
        }
    }
}
