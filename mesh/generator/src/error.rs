use std::collections::TryReserveError;

use crate::*;

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
  /// the input mesh failed validation; nothing was built
  #[error("invalid input mesh: {0}")]
  InvalidMesh(#[from] MeshError),
  /// the fixed arenas could not be reserved at init
  #[error("arena allocation failed: {0}")]
  OutOfMemory(#[from] TryReserveError),
  /// the progress callback requested a stop. the run is not resumable.
  #[error("cancelled by progress callback")]
  Cancelled,
}
