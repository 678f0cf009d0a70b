use jr_common::WorkDigest;
use jr_extrinsics::XtError;
use jr_state::StateError;
use jr_types::{ModelError, WorkReportError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransitionError {
    /// Malformed model value; rejected before any state was touched.
    #[error("model validation error: {0}")]
    Model(#[from] ModelError),
    #[error("work report error: {0}")]
    Workload(#[from] WorkReportError),
    /// Extrinsic shape rejection. Protocol failures never surface here;
    /// they are converted into bad-report entries.
    #[error("extrinsic validation error: {0}")]
    Xt(#[from] XtError),
    #[error("state error: {0}")]
    State(#[from] StateError),
    /// Raised only under [`DisputeTargetPolicy::Strict`].
    ///
    /// [`DisputeTargetPolicy::Strict`]: crate::disputes::DisputeTargetPolicy::Strict
    #[error("dispute target {0} is not present in any bucket")]
    DisputeTargetMissing(WorkDigest),
}
