//! The four report-lifecycle processors, applied in the canonical block
//! order: guarantees, assurances, disputes, then the accumulation sweep.

pub mod accumulate;
pub mod assurances;
pub mod block;
pub mod disputes;
pub mod error;
pub mod guarantees;

pub use accumulate::process_accumulation_queue;
pub use assurances::process_assurance_extrinsic;
pub use block::{process_block, BlockExtrinsics};
pub use disputes::{process_dispute_extrinsic, DisputeTargetPolicy};
pub use error::TransitionError;
pub use guarantees::{process_guarantee_extrinsic, sweep_timed_out};
