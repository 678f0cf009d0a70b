//! JSON test-vector harness for the report state-transition machinery.
//!
//! A vector carries `pre_state`, `input`, `post_state` and an optional
//! `expected_error`; states hydrate into [`jr_state::OnchainState`] through a
//! tolerant mapping and the processors run in canonical block order.

pub mod error_code;
pub mod framework;
pub mod hydrate;

pub use error_code::ReportsErrorCode;
pub use framework::{check_vector, run_vector, TestVector, VectorOutcome};
