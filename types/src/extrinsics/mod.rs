pub mod assurances;
pub mod disputes;

pub use assurances::AssuranceXt;
pub use disputes::DisputeXt;
