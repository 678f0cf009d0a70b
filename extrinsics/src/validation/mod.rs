pub mod assurances;
pub mod disputes;
pub mod error;
pub mod guarantees;
