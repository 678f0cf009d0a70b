use crate::validation::error::XtError;
use jr_types::extrinsics::DisputeXt;

/// Shape validation for dispute extrinsics. Target resolution happens in the
/// dispute processor, which owns the missing-target policy.
pub struct DisputeValidator;

impl DisputeValidator {
    pub fn validate(dispute: &DisputeXt) -> Result<(), XtError> {
        if dispute.reason.is_empty() {
            return Err(XtError::EmptyDisputeReason);
        }
        Ok(())
    }
}
