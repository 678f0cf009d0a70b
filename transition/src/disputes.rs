use crate::error::TransitionError;
use jr_common::SlotIndex;
use jr_extrinsics::DisputeValidator;
use jr_state::OnchainState;
use jr_types::extrinsics::DisputeXt;

/// Behavior when a dispute names a digest absent from every bucket.
///
/// `SilentNoOp` tolerates replayed disputes; `Strict` surfaces them as a
/// protocol violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisputeTargetPolicy {
    #[default]
    SilentNoOp,
    Strict,
}

/// Processes a dispute extrinsic.
///
/// The target is looked up in the pending bucket, then the accumulation
/// queue, then finalized history. Pending and queued entries are removed;
/// history is immutable, so a late dispute only updates the ledgers. The
/// report's guarantor is charged in every located case.
pub fn process_dispute_extrinsic(
    dispute: &DisputeXt,
    state: &mut OnchainState,
    current_slot: SlotIndex,
    policy: DisputeTargetPolicy,
) -> Result<(), TransitionError> {
    DisputeValidator::validate(dispute)?;
    let digest = dispute.disputed_digest;

    let guarantor = if let Some(pending) = state.rho.remove(&digest) {
        Some(pending.report.guarantor_public_key)
    } else if let Some(queued) = state.omega.remove(&digest) {
        Some(queued.report.guarantor_public_key)
    } else {
        state.xi.get(&digest).map(|report| report.guarantor_public_key)
    };

    let Some(guarantor) = guarantor else {
        return match policy {
            DisputeTargetPolicy::SilentNoOp => {
                tracing::info!(%digest, "dispute target not found, ignoring");
                Ok(())
            }
            DisputeTargetPolicy::Strict => Err(TransitionError::DisputeTargetMissing(digest)),
        };
    };

    tracing::info!(%digest, disputer = %dispute.disputer, "report disputed");
    state.record_bad_report(digest, dispute.reason.clone(), dispute.disputer.to_string());
    state.charge_offender(guarantor, current_slot);
    Ok(())
}
