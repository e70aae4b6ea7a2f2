use serde::{Deserialize, Serialize};

pub const MAX_TEXTURE_LAYERS: usize = 8;

/// per-material attribute usage. the generator only consults which
/// attribute channels a material uses; shading data stays with the host.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshMaterial {
  pub num_texture_layers: u32,
  /// component count (1..=4) of each texture layer, metadata for the host
  pub tex_coord_dimensions: [u32; MAX_TEXTURE_LAYERS],
  pub has_diffuse_colors: bool,
  pub has_specular_colors: bool,
}

impl MeshMaterial {
  pub fn untextured() -> Self {
    Self::default()
  }

  pub fn with_texture_layers(count: u32) -> Self {
    let mut m = Self::default();
    m.num_texture_layers = count;
    m.tex_coord_dimensions[..count as usize].fill(2);
    m
  }
}
