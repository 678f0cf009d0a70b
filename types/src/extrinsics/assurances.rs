use jr_common::{GuarantorId, WorkDigest};
use serde::{Deserialize, Serialize};

/// An availability affirmation for a report.
///
/// Accepted and shape-checked but not yet acted upon; the variant carrying a
/// dispute target is reserved for tilting unresolved disputes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssuranceXt {
    pub report_hash: WorkDigest,
    pub affirming_party: GuarantorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dispute_hash: Option<WorkDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
