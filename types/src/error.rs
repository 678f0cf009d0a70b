use jr_common::CoreIndex;
use thiserror::Error;

/// Malformed model values, rejected before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("work package must carry at least one work item")]
    NoWorkItems,
    #[error("work item `{0}` must have a positive gas limit")]
    ZeroGasLimit(String),
    #[error("availability spec: data fragments {data} outside 1..={total}")]
    FragmentCountOutOfRange { data: u16, total: u16 },
    #[error("availability spec: {hashes} fragment hashes for {total} fragments")]
    FragmentHashesMismatch { hashes: usize, total: u16 },
    #[error("core index {0} exceeds the maximum")]
    CoreIndexOutOfRange(CoreIndex),
}
