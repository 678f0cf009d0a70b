use crate::{
    accumulate::process_accumulation_queue, assurances::process_assurance_extrinsic,
    disputes::process_dispute_extrinsic, disputes::DisputeTargetPolicy,
    error::TransitionError, guarantees::process_guarantee_extrinsic,
    guarantees::sweep_timed_out,
};
use jr_common::SlotIndex;
use jr_pvm::WorkItemExecutor;
use jr_state::OnchainState;
use jr_types::extrinsics::{AssuranceXt, DisputeXt};
use jr_types::workloads::WorkReport;

/// One block's extrinsics, in their intra-bucket order.
#[derive(Debug, Clone, Default)]
pub struct BlockExtrinsics {
    pub guarantees: Vec<WorkReport>,
    pub assurances: Vec<AssuranceXt>,
    pub disputes: Vec<DisputeXt>,
}

/// Applies a block in the canonical order: guarantees, assurances, disputes,
/// then the timeout sweep and the accumulation drain.
///
/// Digests of reports admitted earlier in the guarantee batch are visible as
/// dependency targets to the reports after them. Returns the per-guarantee
/// promotion outcomes.
pub fn process_block(
    extrinsics: &BlockExtrinsics,
    state: &mut OnchainState,
    current_slot: SlotIndex,
    executor: &dyn WorkItemExecutor,
    policy: DisputeTargetPolicy,
) -> Result<Vec<bool>, TransitionError> {
    let mut current_block_digests = Vec::with_capacity(extrinsics.guarantees.len());
    let mut promotions = Vec::with_capacity(extrinsics.guarantees.len());

    for report in &extrinsics.guarantees {
        let digest = report.digest()?;
        let promoted =
            process_guarantee_extrinsic(report, state, current_slot, &current_block_digests)?;
        promotions.push(promoted);
        if promoted || state.rho.contains_key(&digest) {
            current_block_digests.push(digest);
        }
    }

    for assurance in &extrinsics.assurances {
        process_assurance_extrinsic(assurance, state, current_slot)?;
    }

    for dispute in &extrinsics.disputes {
        process_dispute_extrinsic(dispute, state, current_slot, policy)?;
    }

    sweep_timed_out(state, current_slot);
    process_accumulation_queue(state, current_slot, executor)?;
    Ok(promotions)
}
