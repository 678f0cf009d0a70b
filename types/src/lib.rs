pub mod error;
pub mod extrinsics;
pub mod state;
pub mod workloads;

pub use error::ModelError;
pub use workloads::{
    AvailabilitySpec, RefinementContext, ServiceDetails, WorkItem, WorkPackage, WorkReport,
    WorkReportError,
};
