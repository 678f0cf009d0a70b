use crate::error::TransitionError;
use jr_common::{
    super_majority_threshold, SlotIndex, WorkDigest, REPORT_TIMEOUT_SLOTS, SYSTEM_TIMEOUT,
    SYSTEM_VALIDATION,
};
use jr_extrinsics::{GuaranteeValidator, XtError};
use jr_state::OnchainState;
use jr_types::state::PendingReport;
use jr_types::workloads::WorkReport;
use std::collections::btree_map::Entry;

/// Processes a single guarantee extrinsic.
///
/// Model validation failures propagate without touching state. Protocol
/// failures are consumed: the digest is recorded in the bad-reports ledger
/// and the guarantor is charged. Otherwise the endorsement is merged into
/// the pending bucket; reaching the super-majority threshold promotes the
/// digest to the accumulation queue.
///
/// Returns `true` only on promotion.
pub fn process_guarantee_extrinsic(
    report: &WorkReport,
    state: &mut OnchainState,
    current_slot: SlotIndex,
    current_block_digests: &[WorkDigest],
) -> Result<bool, TransitionError> {
    report.validate()?;
    let signable = report.signable_bytes()?;
    let digest = report.digest()?;
    tracing::debug!(%digest, core = report.core_index, "guarantee received");

    let verdict = GuaranteeValidator::new(state).validate(
        report,
        &digest,
        &signable,
        current_slot,
        current_block_digests,
    );
    if let Err(err) = verdict {
        tracing::info!(%digest, reason = err.reason_tag(), "report rejected");
        state.record_bad_report(digest, err.reason_string(), SYSTEM_VALIDATION);
        state.charge_offender(report.guarantor_public_key, current_slot);
        return Ok(false);
    }

    // Endorsement merge. The first observation fixes the submission slot;
    // a repeated identity is a no-op.
    let (signatures, submission_slot) = match state.rho.entry(digest) {
        Entry::Vacant(vacant) => {
            vacant.insert(PendingReport::new(
                report.clone(),
                report.guarantor_public_key,
                current_slot,
            ));
            (1, current_slot)
        }
        Entry::Occupied(mut occupied) => {
            let pending = occupied.get_mut();
            if !pending.insert_signature(report.guarantor_public_key) {
                return Ok(false);
            }
            (pending.signature_count(), pending.submission_slot)
        }
    };

    let roster = report.refinement_context.guarantor_count();
    let threshold = super_majority_threshold(roster);
    if signatures >= threshold {
        state.promote(digest);
        tracing::info!(%digest, signatures, threshold, "report promoted to the accumulation queue");
        return Ok(true);
    }

    if current_slot.saturating_sub(submission_slot) > REPORT_TIMEOUT_SLOTS {
        state.rho.remove(&digest);
        state.record_bad_report(digest, XtError::TimedOut.reason_string(), SYSTEM_TIMEOUT);
        tracing::info!(%digest, "pending report timed out");
    }
    Ok(false)
}

/// Evicts every pending report whose endorsement window has lapsed.
///
/// The same eviction happens lazily on the next guarantee for a digest; this
/// sweep covers digests no further guarantee will touch.
pub fn sweep_timed_out(state: &mut OnchainState, current_slot: SlotIndex) -> Vec<WorkDigest> {
    let expired: Vec<WorkDigest> = state
        .rho
        .iter()
        .filter(|(_, pending)| pending.is_timed_out(current_slot))
        .map(|(digest, _)| *digest)
        .collect();

    for digest in &expired {
        state.rho.remove(digest);
        state.record_bad_report(*digest, XtError::TimedOut.reason_string(), SYSTEM_TIMEOUT);
        tracing::info!(digest = %digest, "pending report timed out");
    }
    expired
}
