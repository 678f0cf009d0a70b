use jr_common::UnsignedGas;
use thiserror::Error;

/// Execution failure of a single work item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PvmError {
    #[error("out of gas: needed {needed}, limit {limit}")]
    OutOfGas { needed: UnsignedGas, limit: UnsignedGas },
    #[error("execution trapped: {0}")]
    Trap(String),
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),
    #[error("malformed directive `{0}`")]
    Malformed(String),
    #[error("account `{0}` does not exist")]
    MissingAccount(String),
    #[error("account `{account}` holds {available}, needed {needed}")]
    InsufficientBalance {
        account: String,
        needed: u64,
        available: u64,
    },
}
