mod plane;
mod vec;

pub use plane::*;
pub use vec::*;
