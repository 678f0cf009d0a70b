use serde::{Deserialize, Serialize};

/// Vector-facing error codes for the reports subsystem.
#[allow(non_camel_case_types)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportsErrorCode {
    bad_signature,
    anchor_not_recent,
    bad_service_id,
    bad_code_hash,
    not_authorized,
    wrong_assignment,
    core_engaged,
    future_report_slot,
    report_before_last_rotation,
    too_many_dependencies,
    dependency_missing,
    too_high_work_report_gas,
    service_item_gas_too_low,
    duplicate_package_in_recent_history,
    timed_out,
    accumulation_failed,
    dispute_target_missing,
    reserved,
}

impl ReportsErrorCode {
    /// Maps a bad-report reason tag onto its vector code; unrecognized tags
    /// collapse to `reserved`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bad_signature" => Self::bad_signature,
            "anchor_not_recent" => Self::anchor_not_recent,
            "bad_service_id" => Self::bad_service_id,
            "bad_code_hash" => Self::bad_code_hash,
            "not_authorized" => Self::not_authorized,
            "wrong_assignment" => Self::wrong_assignment,
            "core_engaged" => Self::core_engaged,
            "future_report_slot" => Self::future_report_slot,
            "report_before_last_rotation" => Self::report_before_last_rotation,
            "too_many_dependencies" => Self::too_many_dependencies,
            "dependency_missing" => Self::dependency_missing,
            "too_high_work_report_gas" => Self::too_high_work_report_gas,
            "service_item_gas_too_low" => Self::service_item_gas_too_low,
            "duplicate_package_in_recent_history" => Self::duplicate_package_in_recent_history,
            "timed_out" => Self::timed_out,
            "accumulation_failed" => Self::accumulation_failed,
            "dispute_target_missing" => Self::dispute_target_missing,
            _ => Self::reserved,
        }
    }
}
