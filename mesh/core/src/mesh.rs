use serde::{Deserialize, Serialize};

use crate::*;

/// the six counts describing one resolution window
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshDescription {
  pub num_positions: u32,
  pub num_faces: u32,
  pub num_normals: u32,
  pub num_tex_coords: u32,
  pub num_diffuse_colors: u32,
  pub num_specular_colors: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum MeshError {
  #[error("face {face} corner {corner} references missing position {index}")]
  CornerOutOfRange { face: u32, corner: u32, index: u32 },
  #[error("{array} face {face} corner {corner} references missing entry {index}")]
  AttributeCornerOutOfRange {
    array: &'static str,
    face: u32,
    corner: u32,
    index: u32,
  },
  #[error("attribute array `{0}` length does not match the face count")]
  AttributeFaceLengthMismatch(&'static str),
  #[error("face {face} uses material {material} but only {count} materials exist")]
  MaterialOutOfRange { face: u32, material: u32, count: u32 },
  #[error("material {0} uses more than {MAX_TEXTURE_LAYERS} texture layers")]
  TooManyTextureLayers(u32),
  #[error("texture layer {0} has no per-face index array")]
  MissingTextureLayerFaces(u32),
}

/// an editable multi-resolution triangle mesh.
///
/// attribute values live in flat pools; topology is one `FaceIndices`
/// triple per face and attribute channel. after progressive-mesh
/// generation the arrays are in streaming order (coarsest entries first)
/// and [`ClodMesh::set_resolution`] replays the vertex-update records to
/// move the active window between the base mesh and full resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClodMesh {
  pub positions: Vec<Vec3>,
  pub normals: Vec<Vec3>,
  pub tex_coords: Vec<Vec4>,
  pub diffuse_colors: Vec<Vec4>,
  pub specular_colors: Vec<Vec4>,

  pub position_faces: Vec<FaceIndices>,
  pub normal_faces: Vec<FaceIndices>,
  /// one face-index array per used texture layer
  pub tex_faces: Vec<Vec<FaceIndices>>,
  pub diffuse_faces: Vec<FaceIndices>,
  pub specular_faces: Vec<FaceIndices>,

  /// material id per face; empty means "all faces use material 0"
  pub face_materials: Vec<u32>,
  pub materials: Vec<MeshMaterial>,

  desc: MeshDescription,
  base_desc: MeshDescription,
  updates: Vec<VertexUpdate>,
  resolution: u32,
}

impl ClodMesh {
  pub fn new(positions: Vec<Vec3>, position_faces: Vec<FaceIndices>) -> Self {
    let mut mesh = Self {
      positions,
      position_faces,
      ..Default::default()
    };
    mesh.refresh_description();
    mesh
  }

  /// recompute the active window from the raw array lengths. call after
  /// filling attribute arrays by hand; meshes with update records manage
  /// their window through [`ClodMesh::set_resolution`] instead.
  pub fn refresh_description(&mut self) {
    self.desc = MeshDescription {
      num_positions: self.positions.len() as u32,
      num_faces: self.position_faces.len() as u32,
      num_normals: self.normals.len() as u32,
      num_tex_coords: self.tex_coords.len() as u32,
      num_diffuse_colors: self.diffuse_colors.len() as u32,
      num_specular_colors: self.specular_colors.len() as u32,
    };
    self.base_desc = self.desc;
  }

  pub fn description(&self) -> &MeshDescription {
    &self.desc
  }

  pub fn base_description(&self) -> &MeshDescription {
    &self.base_desc
  }

  pub fn updates(&self) -> &[VertexUpdate] {
    &self.updates
  }

  pub fn resolution(&self) -> u32 {
    self.resolution
  }

  pub fn max_resolution(&self) -> u32 {
    self.updates.len() as u32
  }

  pub fn material_of_face(&self, face: u32) -> u32 {
    self.face_materials.get(face as usize).copied().unwrap_or(0)
  }

  pub fn material(&self, id: u32) -> MeshMaterial {
    self.materials.get(id as usize).copied().unwrap_or_default()
  }

  pub fn num_texture_layers_used(&self) -> u32 {
    self
      .materials
      .iter()
      .map(|m| m.num_texture_layers)
      .max()
      .unwrap_or(0)
  }

  pub fn attribute_faces(&self, attribute: UpdateAttribute) -> &[FaceIndices] {
    match attribute {
      UpdateAttribute::Position => &self.position_faces,
      UpdateAttribute::Normal => &self.normal_faces,
      UpdateAttribute::Diffuse => &self.diffuse_faces,
      UpdateAttribute::Specular => &self.specular_faces,
      UpdateAttribute::Tex(layer) => &self.tex_faces[layer as usize],
    }
  }

  pub fn attribute_faces_mut(&mut self, attribute: UpdateAttribute) -> &mut [FaceIndices] {
    match attribute {
      UpdateAttribute::Position => &mut self.position_faces,
      UpdateAttribute::Normal => &mut self.normal_faces,
      UpdateAttribute::Diffuse => &mut self.diffuse_faces,
      UpdateAttribute::Specular => &mut self.specular_faces,
      UpdateAttribute::Tex(layer) => &mut self.tex_faces[layer as usize],
    }
  }

  /// install the replay stream. the arrays are expected to already be in
  /// streaming order with the active window at the base mesh.
  pub fn set_updates(&mut self, updates: Vec<VertexUpdate>, base: MeshDescription) {
    self.updates = updates;
    self.base_desc = base;
    self.desc = base;
    self.resolution = 0;
  }

  /// move the active window to resolution `r` (clamped to the valid
  /// range), replaying vertex-update records up or down as needed.
  /// returns the resolution actually reached.
  pub fn set_resolution(&mut self, r: u32) -> u32 {
    let r = r.min(self.max_resolution());
    while self.resolution < r {
      self.step_up();
    }
    while self.resolution > r {
      self.step_down();
    }
    self.resolution
  }

  fn step_up(&mut self) {
    let record = self.resolution as usize;
    let u = &self.updates[record];
    self.desc.num_positions += 1;
    self.desc.num_faces += u.num_new_faces;
    self.desc.num_normals += u.num_new_normals;
    self.desc.num_tex_coords += u.num_new_tex_coords;
    self.desc.num_diffuse_colors += u.num_new_diffuse_colors;
    self.desc.num_specular_colors += u.num_new_specular_colors;

    for i in 0..self.updates[record].face_updates.len() {
      let fu = self.updates[record].face_updates[i];
      self.apply_face_update(fu, true);
    }
    self.resolution += 1;
  }

  fn step_down(&mut self) {
    let record = (self.resolution - 1) as usize;
    for i in (0..self.updates[record].face_updates.len()).rev() {
      let fu = self.updates[record].face_updates[i];
      self.apply_face_update(fu, false);
    }

    let u = &self.updates[record];
    self.desc.num_positions -= 1;
    self.desc.num_faces -= u.num_new_faces;
    self.desc.num_normals -= u.num_new_normals;
    self.desc.num_tex_coords -= u.num_new_tex_coords;
    self.desc.num_diffuse_colors -= u.num_new_diffuse_colors;
    self.desc.num_specular_colors -= u.num_new_specular_colors;
    self.resolution -= 1;
  }

  fn apply_face_update(&mut self, fu: FaceUpdate, increasing: bool) {
    let value = if increasing { fu.increasing } else { fu.decreasing };
    let faces = self.attribute_faces_mut(fu.attribute);
    faces[fu.face_index as usize].corner[fu.corner as usize] = value;
  }

  pub fn validate(&self) -> Result<(), MeshError> {
    let nf = self.position_faces.len();
    let nv = self.positions.len() as u32;

    for (f, face) in self.position_faces.iter().enumerate() {
      for (c, index) in face.corner.iter().enumerate() {
        if *index >= nv {
          return Err(MeshError::CornerOutOfRange {
            face: f as u32,
            corner: c as u32,
            index: *index,
          });
        }
      }
    }

    if !self.normal_faces.is_empty() && self.normal_faces.len() != nf {
      return Err(MeshError::AttributeFaceLengthMismatch("normal_faces"));
    }
    if !self.diffuse_faces.is_empty() && self.diffuse_faces.len() != nf {
      return Err(MeshError::AttributeFaceLengthMismatch("diffuse_faces"));
    }
    if !self.specular_faces.is_empty() && self.specular_faces.len() != nf {
      return Err(MeshError::AttributeFaceLengthMismatch("specular_faces"));
    }
    if !self.face_materials.is_empty() && self.face_materials.len() != nf {
      return Err(MeshError::AttributeFaceLengthMismatch("face_materials"));
    }
    for (layer, faces) in self.tex_faces.iter().enumerate() {
      if faces.len() != nf {
        return Err(MeshError::MissingTextureLayerFaces(layer as u32));
      }
    }

    check_corners("normal_faces", &self.normal_faces, self.normals.len(), false)?;
    check_corners(
      "diffuse_faces",
      &self.diffuse_faces,
      self.diffuse_colors.len(),
      false,
    )?;
    check_corners(
      "specular_faces",
      &self.specular_faces,
      self.specular_colors.len(),
      false,
    )?;
    for faces in &self.tex_faces {
      check_corners("tex_faces", faces, self.tex_coords.len(), true)?;
    }

    let num_materials = self.materials.len() as u32;
    for (m, material) in self.materials.iter().enumerate() {
      if material.num_texture_layers as usize > MAX_TEXTURE_LAYERS {
        return Err(MeshError::TooManyTextureLayers(m as u32));
      }
      if material.num_texture_layers as usize > self.tex_faces.len() {
        return Err(MeshError::MissingTextureLayerFaces(
          self.tex_faces.len() as u32
        ));
      }
    }
    if num_materials > 0 {
      for (f, id) in self.face_materials.iter().enumerate() {
        if *id >= num_materials {
          return Err(MeshError::MaterialOutOfRange {
            face: f as u32,
            material: *id,
            count: num_materials,
          });
        }
      }
    }
    Ok(())
  }
}

/// corner bounds for one attribute channel. texture corners may be
/// [`UNDEFINED_INDEX`] on layers a face's material does not use; the other
/// channels must be fully defined.
fn check_corners(
  array: &'static str,
  faces: &[FaceIndices],
  pool_len: usize,
  allow_undefined: bool,
) -> Result<(), MeshError> {
  for (f, face) in faces.iter().enumerate() {
    for (c, index) in face.corner.iter().enumerate() {
      if *index as usize >= pool_len && !(allow_undefined && *index == UNDEFINED_INDEX) {
        return Err(MeshError::AttributeCornerOutOfRange {
          array,
          face: f as u32,
          corner: c as u32,
          index: *index,
        });
      }
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn two_face_mesh() -> ClodMesh {
    // a quad split on the diagonal 1-2
    let positions = vec![
      vec3(0., 0., 0.),
      vec3(1., 0., 0.),
      vec3(0., 1., 0.),
      vec3(1., 1., 0.),
    ];
    let faces = vec![FaceIndices::new(0, 1, 2), FaceIndices::new(2, 1, 3)];
    ClodMesh::new(positions, faces)
  }

  #[test]
  fn validate_catches_bad_corner() {
    let mut mesh = two_face_mesh();
    mesh.position_faces[1].corner[2] = 9;
    assert!(matches!(
      mesh.validate(),
      Err(MeshError::CornerOutOfRange { face: 1, corner: 2, index: 9 })
    ));
  }

  #[test]
  fn validate_catches_bad_attribute_corner() {
    let mut mesh = two_face_mesh();
    mesh.normals = vec![vec3(0., 0., 1.); 4];
    mesh.normal_faces = vec![FaceIndices::new(0, 1, 2), FaceIndices::new(2, 1, 3)];
    mesh.normal_faces[0].corner[0] = 99;
    assert!(matches!(
      mesh.validate(),
      Err(MeshError::AttributeCornerOutOfRange {
        array: "normal_faces",
        face: 0,
        corner: 0,
        index: 99
      })
    ));
  }

  #[test]
  fn undefined_texture_corners_pass_validation() {
    let mut mesh = two_face_mesh();
    mesh.tex_coords = vec![vec4(0., 0., 0., 0.); 3];
    mesh.tex_faces = vec![vec![
      FaceIndices::new(0, 1, 2),
      FaceIndices::new(2, 1, UNDEFINED_INDEX),
    ]];
    mesh.materials = vec![MeshMaterial::with_texture_layers(1)];
    mesh.face_materials = vec![0, 0];
    assert!(mesh.validate().is_ok());

    // but a plain out-of-range texture corner is still an error
    mesh.tex_faces[0][1].corner[2] = 7;
    assert!(matches!(
      mesh.validate(),
      Err(MeshError::AttributeCornerOutOfRange { array: "tex_faces", .. })
    ));
  }

  #[test]
  fn resolution_window_round_trip() {
    let mut mesh = two_face_mesh();
    // hand-built stream: base = one vertex, no faces; two records restore
    // the mesh one vertex (and one face each) at a time
    let base = MeshDescription {
      num_positions: 2,
      num_faces: 0,
      ..Default::default()
    };
    // coarsest window state for the faces
    mesh.position_faces = vec![FaceIndices::new(0, 1, 1), FaceIndices::new(1, 1, 1)];
    let updates = vec![
      VertexUpdate {
        num_new_faces: 1,
        face_updates: vec![FaceUpdate {
          face_index: 0,
          attribute: UpdateAttribute::Position,
          corner: 2,
          decreasing: 1,
          increasing: 2,
        }],
        ..Default::default()
      },
      VertexUpdate {
        num_new_faces: 1,
        face_updates: vec![FaceUpdate {
          face_index: 1,
          attribute: UpdateAttribute::Position,
          corner: 2,
          decreasing: 1,
          increasing: 3,
        }],
        ..Default::default()
      },
    ];
    mesh.set_updates(updates, base);

    assert_eq!(mesh.description().num_positions, 2);
    assert_eq!(mesh.description().num_faces, 0);

    mesh.set_resolution(2);
    assert_eq!(mesh.description().num_positions, 4);
    assert_eq!(mesh.description().num_faces, 2);
    assert_eq!(mesh.position_faces[0], FaceIndices::new(0, 1, 2));
    assert_eq!(mesh.position_faces[1], FaceIndices::new(1, 1, 3));
    let full = mesh.clone();

    mesh.set_resolution(0);
    assert_eq!(mesh.position_faces[0], FaceIndices::new(0, 1, 1));
    assert_eq!(mesh.position_faces[1], FaceIndices::new(1, 1, 1));

    mesh.set_resolution(2);
    assert_eq!(mesh.position_faces, full.position_faces);
    assert_eq!(mesh.description(), full.description());
  }
}
