use crate::validation::error::{XtError, XtError::*};
use jr_common::{
    SlotIndex, WorkDigest, ANCHOR_MAX_AGE_SLOTS, EPOCH_LENGTH_SLOTS, MAX_DEPENDENCIES,
    MAX_WORK_REPORT_GAS, MIN_SERVICE_ITEM_GAS, REPORT_TIMEOUT_SLOTS,
};
use jr_crypto::verify_signature;
use jr_state::OnchainState;
use jr_types::workloads::WorkReport;

/// Validates a guaranteed work report against the on-chain state.
///
/// # Validation Rules
///
/// Checks run in fixed protocol order; the first failure wins and becomes the
/// bad-report reason:
///
/// 1. The guarantor signature must verify over the signable report bytes.
/// 2. The anchor block must be within `ANCHOR_MAX_AGE_SLOTS` of the current slot.
/// 3. The authorizing service must be registered.
/// 4. When the registration declares a code hash, the first work item's
///    program hash must match it.
/// 5. The guarantor must appear in the roster matching the report's epoch:
///    the current roster for the current epoch, the previous roster for the
///    epoch before it.
/// 6. The report's core must not be engaged.
/// 7. The report slot must not be in the future.
/// 8. The report slot must be within the last rotation window.
/// 9. The dependency count must not exceed `MAX_DEPENDENCIES`.
/// 10. Every dependency must be in finalized history, pending, or earlier in
///     the current block.
/// 11. The reported gas must not exceed `MAX_WORK_REPORT_GAS`.
/// 12. Every work item must carry at least `MIN_SERVICE_ITEM_GAS`.
/// 13. The report digest must not already be in finalized history.
pub struct GuaranteeValidator<'a> {
    state: &'a OnchainState,
}

impl<'a> GuaranteeValidator<'a> {
    pub fn new(state: &'a OnchainState) -> Self {
        Self { state }
    }

    pub fn validate(
        &self,
        report: &WorkReport,
        digest: &WorkDigest,
        signable: &[u8],
        current_slot: SlotIndex,
        current_block_digests: &[WorkDigest],
    ) -> Result<(), XtError> {
        self.check_signature(report, signable)?;
        self.check_anchor_age(report, current_slot)?;
        self.check_service_registration(report)?;
        self.check_guarantor_assignment(report)?;
        self.check_core_engagement(report)?;
        self.check_report_slot(report, current_slot)?;
        self.check_dependencies(report, current_block_digests)?;
        self.check_gas(report)?;
        self.check_recent_history(digest)?;
        Ok(())
    }

    fn check_signature(&self, report: &WorkReport, signable: &[u8]) -> Result<(), XtError> {
        if !verify_signature(
            signable,
            report.guarantor_public_key.as_bytes(),
            &report.guarantor_signature,
        ) {
            return Err(BadSignature);
        }
        Ok(())
    }

    fn check_anchor_age(&self, report: &WorkReport, current_slot: SlotIndex) -> Result<(), XtError> {
        let anchor = report.refinement_context.anchor_block_number;
        if current_slot.saturating_sub(anchor) > ANCHOR_MAX_AGE_SLOTS {
            return Err(AnchorNotRecent {
                anchor,
                current_slot,
                max_age: ANCHOR_MAX_AGE_SLOTS,
            });
        }
        Ok(())
    }

    fn check_service_registration(&self, report: &WorkReport) -> Result<(), XtError> {
        let service_id = &report.work_package.auth_service.url;
        let Some(record) = self.state.global_state.service(service_id) else {
            return Err(BadServiceId(service_id.clone()));
        };

        // Work items are non-empty past model validation.
        if let (Some(declared), Some(first_item)) =
            (record.code_hash, report.work_package.work_items.first())
        {
            if first_item.program_hash != declared {
                return Err(BadCodeHash(service_id.clone()));
            }
        }
        Ok(())
    }

    fn check_guarantor_assignment(&self, report: &WorkReport) -> Result<(), XtError> {
        let context = &report.refinement_context;
        let report_epoch = report.slot / EPOCH_LENGTH_SLOTS;
        let guarantor = &report.guarantor_public_key;

        if report_epoch == context.current_epoch {
            if !context.is_current_guarantor(guarantor) {
                return Err(WrongAssignment(*guarantor, report_epoch));
            }
        } else if report_epoch + 1 == context.current_epoch {
            if !context.is_previous_guarantor(guarantor) {
                return Err(WrongAssignment(*guarantor, report_epoch));
            }
        } else {
            return Err(NotAuthorized(report_epoch));
        }
        Ok(())
    }

    fn check_core_engagement(&self, report: &WorkReport) -> Result<(), XtError> {
        if self.state.global_state.core_is_engaged(report.core_index) {
            return Err(CoreEngaged(report.core_index));
        }
        Ok(())
    }

    fn check_report_slot(&self, report: &WorkReport, current_slot: SlotIndex) -> Result<(), XtError> {
        if report.slot > current_slot {
            return Err(FutureReportSlot {
                report_slot: report.slot,
                current_slot,
            });
        }
        if current_slot - report.slot > REPORT_TIMEOUT_SLOTS {
            return Err(ReportBeforeLastRotation {
                report_slot: report.slot,
                current_slot,
            });
        }
        Ok(())
    }

    fn check_dependencies(
        &self,
        report: &WorkReport,
        current_block_digests: &[WorkDigest],
    ) -> Result<(), XtError> {
        if report.dependencies.len() > MAX_DEPENDENCIES {
            return Err(TooManyDependencies(report.dependencies.len()));
        }
        for dependency in &report.dependencies {
            if !self.state.digest_is_known(dependency, current_block_digests) {
                return Err(DependencyMissing(*dependency));
            }
        }
        Ok(())
    }

    fn check_gas(&self, report: &WorkReport) -> Result<(), XtError> {
        if report.gas_used > MAX_WORK_REPORT_GAS {
            return Err(TooHighWorkReportGas(report.gas_used));
        }
        for item in &report.work_package.work_items {
            if item.gas_limit < MIN_SERVICE_ITEM_GAS {
                return Err(ServiceItemGasTooLow(item.id.clone()));
            }
        }
        Ok(())
    }

    fn check_recent_history(&self, digest: &WorkDigest) -> Result<(), XtError> {
        if self.state.xi.contains_key(digest) {
            return Err(DuplicatePackageInRecentHistory(*digest));
        }
        Ok(())
    }
}
