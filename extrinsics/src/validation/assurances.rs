use crate::validation::error::XtError;
use jr_types::extrinsics::AssuranceXt;

/// Shape validation for assurance extrinsics.
pub struct AssuranceValidator;

impl AssuranceValidator {
    pub fn validate(assurance: &AssuranceXt) -> Result<(), XtError> {
        if matches!(&assurance.reason, Some(reason) if reason.is_empty()) {
            return Err(XtError::EmptyAssuranceReason);
        }
        Ok(())
    }
}
