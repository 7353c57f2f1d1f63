mod optimizer;
mod rprop;

pub use optimizer::Optimizer;
pub use rprop::{rprop_step, Rprop, RpropState, Sign};
