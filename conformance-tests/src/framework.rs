use crate::{error_code::ReportsErrorCode, hydrate};
use jr_common::SlotIndex;
use jr_pvm::WorkItemExecutor;
use jr_state::StateError;
use jr_transition::{
    process_accumulation_queue, process_assurance_extrinsic, process_dispute_extrinsic,
    process_guarantee_extrinsic, sweep_timed_out, DisputeTargetPolicy, TransitionError,
};
use jr_types::extrinsics::{AssuranceXt, DisputeXt};
use jr_types::workloads::{WorkReport, WorkReportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Slots added to the first guarantee's lookup anchor when a vector carries
/// no explicit slot.
pub const VECTOR_SLOT_OFFSET: SlotIndex = 65;

#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("vector JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transition error: {0}")]
    Transition(#[from] TransitionError),
    #[error("work report error: {0}")]
    Workload(#[from] WorkReportError),
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("vector carries no slot and no guarantee to derive one from")]
    NoSlot,
}

/// One test vector file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    pub pre_state: Value,
    pub input: Value,
    pub post_state: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<ReportsErrorCode>,
}

#[derive(Debug, Clone, Deserialize)]
struct VectorInput {
    #[serde(default)]
    guarantees: Vec<GuaranteeEntry>,
    #[serde(default)]
    assurances: Vec<AssuranceXt>,
    #[serde(default)]
    disputes: Vec<DisputeXt>,
    #[serde(default)]
    slot: Option<SlotIndex>,
}

#[derive(Debug, Clone, Deserialize)]
struct GuaranteeEntry {
    report: WorkReport,
}

/// Result of driving a vector through the processors.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorOutcome {
    /// Per-guarantee promotion outcomes, in input order.
    pub accepted: Vec<bool>,
    /// First rejection observed while processing guarantees.
    pub error: Option<ReportsErrorCode>,
    pub post_state: Value,
}

/// Runs a vector: hydrates `pre_state`, applies the input extrinsics in
/// canonical block order, sweeps and accumulates, and snapshots the result.
pub fn run_vector(
    vector: &TestVector,
    executor: &dyn WorkItemExecutor,
) -> Result<VectorOutcome, ConformanceError> {
    let mut state = hydrate::onchain_state(&vector.pre_state)?;
    let input: VectorInput = serde_json::from_value(hydrate::normalize(vector.input.clone()))?;
    let slot = resolve_slot(&vector.input, &input)?;

    let mut current_block_digests = Vec::new();
    let mut accepted = Vec::with_capacity(input.guarantees.len());
    let mut first_error = None;

    for entry in &input.guarantees {
        let digest = entry.report.digest()?;
        let already_bad = state.psi_b.contains_key(&digest);

        let promoted =
            process_guarantee_extrinsic(&entry.report, &mut state, slot, &current_block_digests)?;
        accepted.push(promoted);

        if promoted || state.rho.contains_key(&digest) {
            current_block_digests.push(digest);
        } else if !already_bad {
            if let Some(bad) = state.psi_b.get(&digest) {
                let tag = bad.reason.split(':').next().unwrap_or_default();
                first_error.get_or_insert(ReportsErrorCode::from_tag(tag));
            }
        }
    }

    for assurance in &input.assurances {
        process_assurance_extrinsic(assurance, &state, slot)?;
    }
    for dispute in &input.disputes {
        process_dispute_extrinsic(dispute, &mut state, slot, DisputeTargetPolicy::SilentNoOp)?;
    }

    sweep_timed_out(&mut state, slot);
    process_accumulation_queue(&mut state, slot, executor)?;

    Ok(VectorOutcome {
        accepted,
        error: first_error,
        post_state: state.snapshot()?,
    })
}

/// Runs a vector and asserts its recorded expectations.
pub fn check_vector(
    vector: &TestVector,
    executor: &dyn WorkItemExecutor,
) -> Result<(), ConformanceError> {
    let outcome = run_vector(vector, executor)?;
    assert_eq!(outcome.error, vector.expected_error);
    assert_eq!(outcome.post_state, vector.post_state);
    Ok(())
}

/// An explicit `input.slot` wins; otherwise the slot derives from the first
/// guarantee's lookup anchor plus [`VECTOR_SLOT_OFFSET`], falling back to the
/// report's own refinement slot.
fn resolve_slot(raw_input: &Value, input: &VectorInput) -> Result<SlotIndex, ConformanceError> {
    if let Some(slot) = input.slot {
        return Ok(slot);
    }
    if let Some(anchor) = raw_input
        .pointer("/guarantees/0/report/context/lookup_anchor_slot")
        .and_then(Value::as_u64)
    {
        return Ok(anchor as SlotIndex + VECTOR_SLOT_OFFSET);
    }
    input
        .guarantees
        .first()
        .map(|entry| entry.report.refinement_context.current_slot)
        .ok_or(ConformanceError::NoSlot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use jr_common::GuarantorId;
    use jr_pvm::PayloadExecutor;
    use jr_state::OnchainState;
    use jr_types::state::{Account, ServiceRecord};
    use jr_types::workloads::{RefinementContext, ServiceDetails, WorkItem, WorkPackage};
    use rand::rngs::OsRng;
    use serde_json::json;

    const SERVICE_URL: &str = "svc://ledger";
    const PROGRAM_HASH: [u8; 32] = [0x42; 32];

    fn seeded_state() -> OnchainState {
        let mut state = OnchainState::default();
        state
            .global_state
            .accounts
            .insert("alice".into(), Account::with_balance(1000));
        state
            .global_state
            .accounts
            .insert("bob".into(), Account::with_balance(500));
        state.global_state.service_registry.insert(
            SERVICE_URL.into(),
            ServiceRecord {
                code_hash: Some(PROGRAM_HASH),
                owner: "root".into(),
            },
        );
        state
    }

    fn signed_report(keys: &[SigningKey], signer: usize, slot: u32) -> WorkReport {
        let roster: Vec<GuarantorId> = keys
            .iter()
            .map(|k| GuarantorId(k.verifying_key().to_bytes()))
            .collect();
        let mut report = WorkReport {
            work_package: WorkPackage {
                auth_token: "token".into(),
                auth_service: ServiceDetails {
                    host: "ledger.example".into(),
                    url: SERVICE_URL.into(),
                    function: "accumulate".into(),
                },
                context: "vector".into(),
                work_items: vec![WorkItem {
                    id: "item-0".into(),
                    program_hash: PROGRAM_HASH,
                    input_data: "transfer:alice:bob:100".into(),
                    gas_limit: 50,
                }],
            },
            refinement_context: RefinementContext {
                anchor_block_root: [0xaa; 32],
                anchor_block_number: slot - 10,
                beefy_mmr_root: [0xbb; 32],
                current_slot: slot,
                current_epoch: slot / 100,
                current_guarantors: roster.clone(),
                previous_guarantors: vec![],
            },
            pvm_output: "ok".into(),
            gas_used: 40,
            availability_spec: None,
            guarantor_signature: [0u8; 64],
            guarantor_public_key: GuarantorId::default(),
            core_index: 0,
            slot,
            dependencies: vec![],
        };
        report
            .sign_with(&keys[signer].to_bytes(), roster[signer])
            .unwrap();
        report
    }

    #[test]
    fn happy_path_vector_round_trips() {
        let keys: Vec<SigningKey> =
            (0..2).map(|_| SigningKey::generate(&mut OsRng)).collect();
        let pre = seeded_state();
        let slot = 100;
        let first = signed_report(&keys, 0, slot);
        let second = signed_report(&keys, 1, slot);

        // The expected post state, produced by driving the processors
        // directly.
        let mut expected = pre.clone();
        process_guarantee_extrinsic(&first, &mut expected, slot, &[]).unwrap();
        process_guarantee_extrinsic(&second, &mut expected, slot, &[]).unwrap();
        process_accumulation_queue(&mut expected, slot, &PayloadExecutor).unwrap();

        let vector = TestVector {
            pre_state: pre.snapshot().unwrap(),
            input: json!({
                "guarantees": [{"report": first}, {"report": second}],
                "slot": slot,
            }),
            post_state: expected.snapshot().unwrap(),
            expected_error: None,
        };

        let outcome = run_vector(&vector, &PayloadExecutor).unwrap();
        assert_eq!(outcome.accepted, vec![false, true]);
        check_vector(&vector, &PayloadExecutor).unwrap();
    }

    #[test]
    fn rejection_vector_reports_the_error_code() {
        let keys: Vec<SigningKey> =
            (0..1).map(|_| SigningKey::generate(&mut OsRng)).collect();
        let pre = seeded_state();
        let slot = 100;
        let mut report = signed_report(&keys, 0, slot);
        report.gas_used += 1; // breaks the signature

        let mut expected = pre.clone();
        process_guarantee_extrinsic(&report, &mut expected, slot, &[]).unwrap();

        let vector = TestVector {
            pre_state: pre.snapshot().unwrap(),
            input: json!({"guarantees": [{"report": report}], "slot": slot}),
            post_state: expected.snapshot().unwrap(),
            expected_error: Some(ReportsErrorCode::bad_signature),
        };

        check_vector(&vector, &PayloadExecutor).unwrap();
    }

    #[test]
    fn slot_derives_from_the_lookup_anchor() {
        let raw = json!({
            "guarantees": [{"report": {"context": {"lookup_anchor_slot": 35}}}]
        });
        let input = VectorInput {
            guarantees: vec![],
            assurances: vec![],
            disputes: vec![],
            slot: None,
        };
        assert_eq!(resolve_slot(&raw, &input).unwrap(), 100);
    }

    #[test]
    fn empty_vector_has_no_slot() {
        let input = VectorInput {
            guarantees: vec![],
            assurances: vec![],
            disputes: vec![],
            slot: None,
        };
        assert!(matches!(
            resolve_slot(&json!({}), &input),
            Err(ConformanceError::NoSlot)
        ));
    }

    #[test]
    fn dispute_vectors_apply_in_block_order() {
        let keys: Vec<SigningKey> =
            (0..2).map(|_| SigningKey::generate(&mut OsRng)).collect();
        let pre = seeded_state();
        let slot = 100;
        let first = signed_report(&keys, 0, slot);
        let second = signed_report(&keys, 1, slot);
        let digest = first.digest().unwrap();

        let dispute = DisputeXt {
            disputed_digest: digest,
            disputer: GuarantorId([7u8; 32]),
            reason: "bad_output".into(),
        };

        let vector = TestVector {
            pre_state: pre.snapshot().unwrap(),
            input: json!({
                "guarantees": [{"report": first}, {"report": second}],
                "disputes": [dispute],
                "slot": slot,
            }),
            post_state: Value::Null,
            expected_error: None,
        };

        let outcome = run_vector(&vector, &PayloadExecutor).unwrap();
        // The dispute lands after promotion, so nothing accumulates.
        let post: OnchainState = serde_json::from_value(outcome.post_state).unwrap();
        assert!(post.xi.is_empty());
        assert!(post.psi_b.contains_key(&digest));
    }
}
