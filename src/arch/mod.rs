mod bptt;
pub mod gradcheck;
pub mod loss;
mod model;
mod params;
pub mod surface;
mod unroll;

pub use bptt::{backpropagate, Backward};
pub use model::LinearRnn;
pub use params::Params;
pub use unroll::unroll;
