pub mod artifact;
pub mod model;

pub use artifact::*;
pub use model::*;
