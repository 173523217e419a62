mod linear;
mod reified_linear;

pub use linear::*;
pub use reified_linear::*;
