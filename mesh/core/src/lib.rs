mod material;
mod mesh;
mod update;

pub use clod_algebra::*;
pub use material::*;
pub use mesh::*;
pub use update::*;

/// marker for "no index": unmapped map entries, unused attribute corners
pub const UNDEFINED_INDEX: u32 = u32::MAX;
