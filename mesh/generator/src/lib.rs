//! progressive-mesh (continuous level-of-detail) generation.
//!
//! [`Contractor`] repeatedly contracts the cheapest vertex pair under the
//! Garland-Heckbert quadric error metric until only protected or
//! prohibitively expensive contractions remain. every removal is logged by
//! the [`ContractionRecorder`] as a replayable vertex-update record, and a
//! final reordering pass rewrites the mesh into streaming order: the base
//! mesh occupies the front of every array, and
//! [`ClodMesh::set_resolution`](clod_mesh_core::ClodMesh::set_resolution)
//! walks the records to rebuild any intermediate resolution.

mod config;
mod contractor;
mod entity;
mod error;
mod normal_map;
mod pair_finder;
mod pair_hash;
mod pair_heap;
mod quadric;
mod recorder;
mod small_set;


pub use clod_algebra::*;
pub use clod_mesh_core::*;
pub use config::*;
pub use contractor::*;
pub(crate) use entity::*;
pub use error::*;
pub(crate) use normal_map::*;
pub(crate) use pair_finder::*;
pub(crate) use pair_hash::*;
pub(crate) use pair_heap::*;
pub use quadric::*;
pub use recorder::MeshMaps;
pub(crate) use recorder::*;
pub(crate) use small_set::*;

pub(crate) type FastHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
