use serde::{Deserialize, Serialize};

/// one corner-index triple. used for the position topology and for every
/// attribute channel's per-face indices.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceIndices {
  pub corner: [u32; 3],
}

impl FaceIndices {
  pub fn new(a: u32, b: u32, c: u32) -> Self {
    Self { corner: [a, b, c] }
  }

  /// corner slot of `index`, if the face references it
  pub fn corner_of(&self, index: u32) -> Option<usize> {
    self.corner.iter().position(|c| *c == index)
  }
}

/// which per-face index array a `FaceUpdate` rewrites
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateAttribute {
  Position,
  Normal,
  Diffuse,
  Specular,
  Tex(u32),
}

/// a single corner rewrite. `decreasing` is the index the corner holds
/// below this resolution, `increasing` the one it holds at or above it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceUpdate {
  pub face_index: u32,
  pub attribute: UpdateAttribute,
  pub corner: u32,
  pub decreasing: u32,
  pub increasing: u32,
}

/// everything needed to move one resolution step up or down. each record
/// introduces exactly one position; `num_new_faces` faces follow it in the
/// reordered face arrays, and the attribute counters say how many pool
/// entries become live at this step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexUpdate {
  pub num_new_faces: u32,
  pub num_new_normals: u32,
  pub num_new_tex_coords: u32,
  pub num_new_diffuse_colors: u32,
  pub num_new_specular_colors: u32,
  pub face_updates: Vec<FaceUpdate>,
}
