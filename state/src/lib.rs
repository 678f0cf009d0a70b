//! The on-chain state container: the four report buckets, the offender
//! ledger and the global state, with the mutation primitives the extrinsic
//! processors are built from.

use jr_common::{GuarantorId, SlotIndex, WorkDigest};
use jr_types::state::{
    BadReport, GlobalState, OffenderRecord, PendingReport, QueuedReport,
};
use jr_types::workloads::WorkReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Owner of the report lifecycle buckets.
///
/// A digest lives in at most one of `rho`/`omega`/`xi`; `xi` is terminal.
/// All cross-references between entries go by digest key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnchainState {
    /// ρ: pending reports with incomplete endorsements.
    #[serde(default)]
    pub rho: BTreeMap<WorkDigest, PendingReport>,
    /// ω: endorsed reports awaiting accumulation.
    #[serde(default)]
    pub omega: BTreeMap<WorkDigest, QueuedReport>,
    /// ξ: finalized history.
    #[serde(default)]
    pub xi: BTreeMap<WorkDigest, WorkReport>,
    /// ψ_B: rejected and disputed digests.
    #[serde(default)]
    pub psi_b: BTreeMap<WorkDigest, BadReport>,
    /// ψ_O: per-guarantor dispute tally.
    #[serde(default)]
    pub psi_o: BTreeMap<GuarantorId, OffenderRecord>,
    #[serde(default)]
    pub global_state: GlobalState,
}

impl OnchainState {
    pub fn new(global_state: GlobalState) -> Self {
        Self {
            global_state,
            ..Default::default()
        }
    }

    /// Dependency-closure membership: ξ ∪ ρ ∪ the current block's digests.
    pub fn digest_is_known(&self, digest: &WorkDigest, current_block: &[WorkDigest]) -> bool {
        self.xi.contains_key(digest)
            || self.rho.contains_key(digest)
            || current_block.contains(digest)
    }

    /// Inserts a bad-report entry, or merges the disputer into an existing
    /// one. The reason recorded first wins.
    pub fn record_bad_report(
        &mut self,
        digest: WorkDigest,
        reason: impl Into<String>,
        disputer: impl Into<String>,
    ) {
        let disputer = disputer.into();
        self.psi_b
            .entry(digest)
            .and_modify(|bad| bad.add_disputer(disputer.clone()))
            .or_insert_with(|| BadReport::new(reason, disputer));
    }

    /// Charges the offender ledger: increments the count and stamps the slot.
    pub fn charge_offender(&mut self, guarantor: GuarantorId, slot: SlotIndex) {
        self.psi_o
            .entry(guarantor)
            .and_modify(|record| record.charge(slot))
            .or_insert_with(|| OffenderRecord::first_charge(slot));
    }

    /// Moves a pending report into the accumulation queue as ready.
    pub fn promote(&mut self, digest: WorkDigest) -> bool {
        match self.rho.remove(&digest) {
            Some(pending) => {
                self.omega.insert(digest, QueuedReport::ready(pending.report));
                true
            }
            None => false,
        }
    }

    /// Moves a queued report into finalized history.
    pub fn finalize(&mut self, digest: WorkDigest) -> bool {
        match self.omega.remove(&digest) {
            Some(queued) => {
                self.xi.insert(digest, queued.report);
                true
            }
            None => false,
        }
    }

    /// Plain-data tree of the full state, for test-vector diffing.
    pub fn snapshot(&self) -> Result<serde_json::Value, StateError> {
        Ok(serde_json::to_value(self)?)
    }
}
