/// what happens to vertex normals during generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalsMode {
  /// drop normals from the output entirely
  None,
  /// keep and reorder the input normals, but emit no normal rewrites
  #[default]
  NoUpdates,
  /// re-cluster normals around every contraction by crease angle and emit
  /// normal rewrites into the update stream
  TrackSurfaceChanges,
}

/// progress callback: receives percent complete (0..=100) and returns
/// false to request cooperative cancellation. polled between contraction
/// steps; the welding scan precedes the loop and polls at zero percent,
/// as a cancellation point only.
pub type ProgressCallback<'a> = Box<dyn FnMut(f32) -> bool + 'a>;

pub struct ClodConfig<'a> {
  /// vertices closer than this are candidates for welding even when
  /// topologically unconnected; negative disables the pair finder
  pub merge_threshold: f32,
  /// weld within a connected component too, not only across components
  pub merge_within_object: bool,
  pub normals_mode: NormalsMode,
  /// dihedral angle beyond which faces stop sharing a smoothed normal
  pub normals_crease_angle_deg: f32,
  /// a contraction flipping any surviving face's normal by more than this
  /// is deferred at a penalty cost
  pub max_normal_change_deg: f32,
  /// protected vertices, never the removed side of a contraction
  pub base_vertices: Vec<u32>,
  pub progress: Option<ProgressCallback<'a>>,
  /// invoke the progress callback every this many steps
  pub progress_frequency: u32,
  /// collect the quadric error of every removal into the output
  pub record_mesh_damage: bool,
}

impl Default for ClodConfig<'_> {
  fn default() -> Self {
    Self {
      merge_threshold: -1.,
      merge_within_object: false,
      normals_mode: NormalsMode::default(),
      normals_crease_angle_deg: 75.,
      max_normal_change_deg: 90.,
      base_vertices: Vec::new(),
      progress: None,
      progress_frequency: 64,
      record_mesh_damage: false,
    }
  }
}
