pub mod validation;

pub use validation::error::XtError;
pub use validation::{
    assurances::AssuranceValidator, disputes::DisputeValidator, guarantees::GuaranteeValidator,
};
