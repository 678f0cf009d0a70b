use jr_common::{CoreIndex, EpochIndex, GuarantorId, SlotIndex, UnsignedGas, WorkDigest};
use thiserror::Error;

/// Protocol-level rejection of an extrinsic.
///
/// Guarantee variants carry the tag that lands in the bad-reports ledger;
/// shape variants reject the enclosing extrinsic before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XtError {
    // Guarantee validation, in protocol order
    #[error("guarantor signature does not verify over the signable report")]
    BadSignature,
    #[error("anchor block {anchor} is older than {max_age} slots at slot {current_slot}")]
    AnchorNotRecent {
        anchor: SlotIndex,
        current_slot: SlotIndex,
        max_age: u32,
    },
    #[error("service `{0}` is not present in the service registry")]
    BadServiceId(String),
    #[error("work item program hash does not match the code hash registered for `{0}`")]
    BadCodeHash(String),
    #[error("report epoch {0} is outside the two-epoch rotation window")]
    NotAuthorized(EpochIndex),
    #[error("guarantor {0} is not in the roster for report epoch {1}")]
    WrongAssignment(GuarantorId, EpochIndex),
    #[error("core {0} is engaged")]
    CoreEngaged(CoreIndex),
    #[error("report slot {report_slot} is ahead of the current slot {current_slot}")]
    FutureReportSlot {
        report_slot: SlotIndex,
        current_slot: SlotIndex,
    },
    #[error("report slot {report_slot} predates the last rotation at slot {current_slot}")]
    ReportBeforeLastRotation {
        report_slot: SlotIndex,
        current_slot: SlotIndex,
    },
    #[error("report carries {0} dependencies, above the limit")]
    TooManyDependencies(usize),
    #[error("dependency {0} is not in history, pending or the current block")]
    DependencyMissing(WorkDigest),
    #[error("report gas {0} exceeds the per-report limit")]
    TooHighWorkReportGas(UnsignedGas),
    #[error("work item `{0}` is below the minimum service item gas")]
    ServiceItemGasTooLow(String),
    #[error("package digest {0} already present in recent history")]
    DuplicatePackageInRecentHistory(WorkDigest),
    #[error("report timed out awaiting endorsements")]
    TimedOut,

    // Extrinsic shape
    #[error("dispute reason must not be empty")]
    EmptyDisputeReason,
    #[error("assurance reason, when present, must not be empty")]
    EmptyAssuranceReason,
}

impl XtError {
    /// Snake-case tag recorded as the bad-report reason prefix.
    pub fn reason_tag(&self) -> &'static str {
        match self {
            XtError::BadSignature => "bad_signature",
            XtError::AnchorNotRecent { .. } => "anchor_not_recent",
            XtError::BadServiceId(_) => "bad_service_id",
            XtError::BadCodeHash(_) => "bad_code_hash",
            XtError::NotAuthorized(_) => "not_authorized",
            XtError::WrongAssignment(_, _) => "wrong_assignment",
            XtError::CoreEngaged(_) => "core_engaged",
            XtError::FutureReportSlot { .. } => "future_report_slot",
            XtError::ReportBeforeLastRotation { .. } => "report_before_last_rotation",
            XtError::TooManyDependencies(_) => "too_many_dependencies",
            XtError::DependencyMissing(_) => "dependency_missing",
            XtError::TooHighWorkReportGas(_) => "too_high_work_report_gas",
            XtError::ServiceItemGasTooLow(_) => "service_item_gas_too_low",
            XtError::DuplicatePackageInRecentHistory(_) => "duplicate_package_in_recent_history",
            XtError::TimedOut => "timed_out",
            XtError::EmptyDisputeReason => "empty_dispute_reason",
            XtError::EmptyAssuranceReason => "empty_assurance_reason",
        }
    }

    /// Full reason string recorded in the bad-reports ledger.
    pub fn reason_string(&self) -> String {
        match self {
            XtError::TimedOut => self.reason_tag().to_string(),
            other => format!("{}: {}", other.reason_tag(), other),
        }
    }
}
