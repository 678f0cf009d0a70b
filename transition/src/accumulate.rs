use crate::error::TransitionError;
use jr_common::{SlotIndex, WorkDigest, SYSTEM_ACCUMULATION};
use jr_pvm::{PvmError, WorkItemExecutor};
use jr_state::OnchainState;
use jr_types::state::{GlobalState, QueueStatus, QueuedReport};
use jr_types::workloads::WorkReport;
use std::collections::{BTreeMap, BTreeSet};

/// Drains the accumulation queue in dependency order.
///
/// Ready reports execute their work items against a scratch copy of the
/// global state; the copy is committed only when every item of the report
/// succeeds, making the report the atomicity boundary. Successes move to
/// finalized history; failures move to the bad-reports ledger and charge the
/// guarantor. Members of a dependency cycle stay queued untouched.
pub fn process_accumulation_queue(
    state: &mut OnchainState,
    current_slot: SlotIndex,
    executor: &dyn WorkItemExecutor,
) -> Result<(), TransitionError> {
    let order = topological_order(&state.omega);
    tracing::info!(
        queued = state.omega.len(),
        ordered = order.len(),
        "accumulation sweep"
    );

    for digest in order {
        let Some(queued) = state.omega.get_mut(&digest) else {
            continue;
        };
        if queued.status != QueueStatus::Ready {
            continue;
        }
        queued.status = QueueStatus::Processing;
        let report = queued.report.clone();

        match execute_report(&report, &state.global_state, executor) {
            Ok(next_state) => {
                state.global_state = next_state;
                state.finalize(digest);
                tracing::info!(%digest, "report accumulated");
            }
            Err(err) => {
                state.omega.remove(&digest);
                state.record_bad_report(
                    digest,
                    format!("accumulation_failed: {err}"),
                    SYSTEM_ACCUMULATION,
                );
                state.charge_offender(report.guarantor_public_key, current_slot);
                tracing::info!(%digest, error = %err, "report failed accumulation");
            }
        }
    }
    Ok(())
}

fn execute_report(
    report: &WorkReport,
    global_state: &GlobalState,
    executor: &dyn WorkItemExecutor,
) -> Result<GlobalState, PvmError> {
    let mut scratch = global_state.clone();
    for item in &report.work_package.work_items {
        let delta = executor.execute(item, &scratch)?;
        scratch.apply(&delta);
    }
    Ok(scratch)
}

/// Kahn's algorithm over the intra-queue dependency edges.
///
/// Dependencies outside the queue were enforced at admission and carry no
/// edge. Nodes of equal in-degree drain in lexicographic digest order, so
/// the result is independent of insertion order. A cycle leaves its members
/// out of the returned order.
pub fn topological_order(omega: &BTreeMap<WorkDigest, QueuedReport>) -> Vec<WorkDigest> {
    let mut in_degree: BTreeMap<WorkDigest, usize> =
        omega.keys().map(|digest| (*digest, 0)).collect();
    let mut dependents: BTreeMap<WorkDigest, Vec<WorkDigest>> = BTreeMap::new();

    for (digest, queued) in omega {
        for dependency in &queued.report.dependencies {
            if omega.contains_key(dependency) {
                if let Some(degree) = in_degree.get_mut(digest) {
                    *degree += 1;
                }
                dependents.entry(*dependency).or_default().push(*digest);
            }
        }
    }

    let mut ready: BTreeSet<WorkDigest> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(digest, _)| *digest)
        .collect();

    let mut order = Vec::with_capacity(omega.len());
    while let Some(digest) = ready.pop_first() {
        order.push(digest);
        for dependent in dependents.remove(&digest).unwrap_or_default() {
            let degree = in_degree
                .get_mut(&dependent)
                .expect("dependent is an omega key");
            *degree -= 1;
            if *degree == 0 {
                ready.insert(dependent);
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(byte: u8) -> WorkDigest {
        WorkDigest([byte; 32])
    }

    fn queued(deps: &[WorkDigest]) -> QueuedReport {
        let mut report = WorkReport::default();
        report.dependencies = deps.to_vec();
        QueuedReport::ready(report)
    }

    #[test]
    fn dependencies_precede_dependents() {
        let mut omega = BTreeMap::new();
        omega.insert(digest(2), queued(&[digest(1)]));
        omega.insert(digest(1), queued(&[]));
        omega.insert(digest(3), queued(&[digest(2)]));

        assert_eq!(
            topological_order(&omega),
            vec![digest(1), digest(2), digest(3)]
        );
    }

    #[test]
    fn equal_in_degree_breaks_ties_lexicographically() {
        let mut omega = BTreeMap::new();
        omega.insert(digest(9), queued(&[]));
        omega.insert(digest(4), queued(&[]));
        omega.insert(digest(7), queued(&[]));

        assert_eq!(
            topological_order(&omega),
            vec![digest(4), digest(7), digest(9)]
        );
    }

    #[test]
    fn external_dependencies_carry_no_edge() {
        let mut omega = BTreeMap::new();
        omega.insert(digest(1), queued(&[digest(0xee)]));
        assert_eq!(topological_order(&omega), vec![digest(1)]);
    }

    #[test]
    fn cycle_members_are_left_out() {
        let mut omega = BTreeMap::new();
        omega.insert(digest(1), queued(&[digest(2)]));
        omega.insert(digest(2), queued(&[digest(1)]));
        omega.insert(digest(3), queued(&[]));

        assert_eq!(topological_order(&omega), vec![digest(3)]);
    }
}
