use crate::error::TransitionError;
use jr_common::SlotIndex;
use jr_extrinsics::AssuranceValidator;
use jr_state::OnchainState;
use jr_types::extrinsics::AssuranceXt;

/// Accepts an availability affirmation.
///
/// Shape-checked and logged only; the hook preserves the extrinsic ordering
/// contract for a future iteration that acts on affirmations (accelerating
/// finality, tilting unresolved disputes).
pub fn process_assurance_extrinsic(
    assurance: &AssuranceXt,
    state: &OnchainState,
    current_slot: SlotIndex,
) -> Result<(), TransitionError> {
    AssuranceValidator::validate(assurance)?;

    let known = state.rho.contains_key(&assurance.report_hash)
        || state.omega.contains_key(&assurance.report_hash)
        || state.xi.contains_key(&assurance.report_hash);
    tracing::info!(
        report = %assurance.report_hash,
        party = %assurance.affirming_party,
        known,
        slot = current_slot,
        "assurance recorded"
    );
    Ok(())
}
