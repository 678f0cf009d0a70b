use jr_common::{GuarantorId, WorkDigest};
use serde::{Deserialize, Serialize};

/// A dispute against a previously seen report digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeXt {
    pub disputed_digest: WorkDigest,
    pub disputer: GuarantorId,
    pub reason: String,
}
