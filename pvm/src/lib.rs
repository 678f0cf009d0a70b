//! The Ψ_A seam: execution of a single work item against the global state.
//!
//! Executors are pure; they read the state and return a [`StateDelta`].
//! Committing (or discarding) deltas is the accumulation processor's job.

pub mod error;
pub mod executor;

pub use error::PvmError;
pub use executor::{PayloadExecutor, WorkItemExecutor};
