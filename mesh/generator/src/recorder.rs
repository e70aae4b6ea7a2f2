use crate::*;

/// crease cosines this close to zero snap to exactly zero, so a 90 degree
/// crease angle behaves symmetrically for slightly-off face normals
const CREASE_COS_EPSILON: f32 = 0.05;

/// old index to new index, per array. [`UNDEFINED_INDEX`] marks entries
/// the generator dropped (unreferenced vertices and attributes, degenerate
/// input faces).
#[derive(Debug, Clone, Default)]
pub struct MeshMaps {
  pub positions: Vec<u32>,
  pub faces: Vec<u32>,
  pub normals: Vec<u32>,
  pub tex_coords: Vec<u32>,
  pub diffuse_colors: Vec<u32>,
  pub specular_colors: Vec<u32>,
}

/// turns contraction decisions into replayable [`VertexUpdate`] records,
/// keeping the owned mesh in sync with the shrinking resolution, and
/// finally rewrites everything into streaming order.
///
/// records accumulate in removal order and are reversed during [`finish`]:
/// replay runs coarse to fine, so the last removal is the first record.
///
/// [`finish`]: ContractionRecorder::finish
pub struct ContractionRecorder {
  mesh: ClodMesh,
  normals_mode: NormalsMode,
  crease_cos: f32,
  has_textures_or_colors: bool,
  num_tex_layers_used: u32,
  normal_map: Option<NormalMap>,

  updates: Vec<VertexUpdate>,
  removed: Vec<VertexId>,
  /// deletion rank per original face index; reversed into final face
  /// order at the end
  face_rank: Vec<u32>,
  num_face_removals: u32,
}

impl ContractionRecorder {
  pub fn new(mesh: ClodMesh, normals_mode: NormalsMode, crease_angle_deg: f32) -> Self {
    let mut crease_cos = crease_angle_deg.clamp(0., 180.).to_radians().cos();
    if crease_cos.abs() < CREASE_COS_EPSILON {
      crease_cos = 0.;
    }

    let has_textures_or_colors = !mesh.tex_coords.is_empty()
      || !mesh.diffuse_colors.is_empty()
      || !mesh.specular_colors.is_empty();

    let normal_map = (normals_mode == NormalsMode::TrackSurfaceChanges)
      .then(|| NormalMap::new(&mesh.normals));

    let num_tex_layers_used = mesh.num_texture_layers_used();
    let num_faces = mesh.position_faces.len();

    Self {
      mesh,
      normals_mode,
      crease_cos,
      has_textures_or_colors,
      num_tex_layers_used,
      normal_map,
      updates: Vec::new(),
      removed: Vec::new(),
      face_rank: vec![UNDEFINED_INDEX; num_faces],
      num_face_removals: 0,
    }
  }

  pub fn mesh(&self) -> &ClodMesh {
    &self.mesh
  }

  /// log one contraction: `deleted` and `updated` are mesh face indices of
  /// the faces destroyed by it and the faces that survive with a rewritten
  /// corner. called before the contractor's topology surgery, while the
  /// mesh faces still reference `remove`.
  pub fn record(&mut self, keep: VertexId, remove: VertexId, deleted: &[u32], updated: &[u32]) {
    for &face in deleted {
      self.face_rank[face as usize] = self.num_face_removals;
      self.num_face_removals += 1;
    }

    let mut face_updates = Vec::with_capacity(updated.len());
    self.record_positions(keep, remove, updated, &mut face_updates);
    if self.has_textures_or_colors {
      self.record_attribute_continuity(keep, remove, deleted, updated, &mut face_updates);
    }

    self.removed.push(remove);
    self.updates.push(VertexUpdate {
      num_new_faces: deleted.len() as u32,
      face_updates,
      ..Default::default()
    });
  }

  /// one Position rewrite per updated face, at the corner that referenced
  /// the removed vertex. applied to the mesh immediately.
  fn record_positions(
    &mut self,
    keep: VertexId,
    remove: VertexId,
    updated: &[u32],
    out: &mut Vec<FaceUpdate>,
  ) {
    for &face in updated {
      let Some(corner) = self.mesh.position_faces[face as usize].corner_of(remove) else {
        continue;
      };
      out.push(FaceUpdate {
        face_index: face,
        attribute: UpdateAttribute::Position,
        corner: corner as u32,
        decreasing: keep,
        increasing: remove,
      });
      self.mesh.position_faces[face as usize].corner[corner] = keep;
    }
  }

  /// propagate texture/color continuity: an updated face inherits, per
  /// layer and color channel, the deleted face's attribute at the kept
  /// corner, but only when the two faces shared the attribute at the
  /// removed corner. deliberate seams stay seams.
  fn record_attribute_continuity(
    &mut self,
    keep: VertexId,
    remove: VertexId,
    deleted: &[u32],
    updated: &[u32],
    out: &mut Vec<FaceUpdate>,
  ) {
    for &up in updated {
      let material_id = self.mesh.material_of_face(up);
      let material = self.mesh.material(material_id);
      let num_layers = material.num_texture_layers as usize;
      if num_layers == 0 && !material.has_diffuse_colors && !material.has_specular_colors {
        continue;
      }

      // the position rewrite already ran, so the corner that referenced
      // the removed vertex now holds the kept one. updated faces never
      // contain both endpoints, so this corner is unique.
      let Some(updated_corner) = self.mesh.position_faces[up as usize].corner_of(keep) else {
        continue;
      };

      let mut layer_done = [false; MAX_TEXTURE_LAYERS];
      let mut diffuse_done = !material.has_diffuse_colors;
      let mut specular_done = !material.has_specular_colors;

      for &del in deleted {
        if self.mesh.material_of_face(del) != material_id {
          continue;
        }
        let del_face = self.mesh.position_faces[del as usize];
        let (Some(del_keep), Some(del_remove)) =
          (del_face.corner_of(keep), del_face.corner_of(remove))
        else {
          continue;
        };

        for (layer, done) in layer_done.iter_mut().enumerate().take(num_layers) {
          if !*done {
            *done = self.fill_update_record(
              UpdateAttribute::Tex(layer as u32),
              del,
              up,
              del_keep,
              del_remove,
              updated_corner,
              out,
            );
          }
        }
        if !diffuse_done {
          diffuse_done = self.fill_update_record(
            UpdateAttribute::Diffuse,
            del,
            up,
            del_keep,
            del_remove,
            updated_corner,
            out,
          );
        }
        if !specular_done {
          specular_done = self.fill_update_record(
            UpdateAttribute::Specular,
            del,
            up,
            del_keep,
            del_remove,
            updated_corner,
            out,
          );
        }

        let all_done =
          diffuse_done && specular_done && layer_done.iter().take(num_layers).all(|d| *d);
        if all_done {
          break;
        }
      }
    }
  }

  fn fill_update_record(
    &mut self,
    attribute: UpdateAttribute,
    deleted_face: u32,
    updated_face: u32,
    deleted_keep_corner: usize,
    deleted_remove_corner: usize,
    updated_corner: usize,
    out: &mut Vec<FaceUpdate>,
  ) -> bool {
    let del = self.mesh.attribute_faces(attribute)[deleted_face as usize];
    let up = self.mesh.attribute_faces(attribute)[updated_face as usize];

    let decreasing = del.corner[deleted_keep_corner];
    let increasing = up.corner[updated_corner];

    // only rewrite where the two faces were continuous at the removed
    // corner
    if increasing != del.corner[deleted_remove_corner] {
      return false;
    }

    out.push(FaceUpdate {
      face_index: updated_face,
      attribute,
      corner: updated_corner as u32,
      decreasing,
      increasing,
    });
    self.mesh.attribute_faces_mut(attribute)[updated_face as usize].corner[updated_corner] =
      decreasing;
    true
  }

  /// re-cluster normals around the contraction and append Normal rewrites
  /// to the record just written. `keep_faces` is the kept vertex's face
  /// set after topology surgery; `neighborhood` holds the face set of
  /// every other vertex on an updated face (empty when the contraction
  /// barely moved any surviving normal).
  pub fn record_attrib_changes(
    &mut self,
    keep: VertexId,
    keep_faces: &[u32],
    neighborhood: &[(VertexId, Vec<u32>)],
  ) {
    if self.normals_mode != NormalsMode::TrackSurfaceChanges {
      return;
    }
    let mut face_updates = Vec::new();
    self.record_vertex_normals(keep, keep_faces, &mut face_updates);
    for (vertex, faces) in neighborhood {
      self.record_vertex_normals(*vertex, faces, &mut face_updates);
    }
    if let Some(update) = self.updates.last_mut() {
      update.face_updates.append(&mut face_updates);
    }
  }

  /// crease-angle clustering at one vertex: sort its faces into an
  /// adjacency ring, split the ring into smoothing groups where the
  /// dihedral cosine drops to the crease threshold, average each group's
  /// normal and snap it to the nearest pre-existing normal.
  fn record_vertex_normals(&mut self, vertex: VertexId, faces: &[u32], out: &mut Vec<FaceUpdate>) {
    if faces.is_empty() {
      return;
    }

    struct FaceExam {
      face: u32, // UNDEFINED_INDEX marks a zero-area face
      normal: Vec3,
    }

    let exams: Vec<FaceExam> = faces
      .iter()
      .map(|&face| {
        let corners = self.mesh.position_faces[face as usize].corner;
        match Plane::from_triangle(
          self.mesh.positions[corners[0] as usize],
          self.mesh.positions[corners[1] as usize],
          self.mesh.positions[corners[2] as usize],
        ) {
          Some((plane, _)) => FaceExam {
            face,
            normal: plane.normal,
          },
          None => FaceExam {
            face: UNDEFINED_INDEX,
            normal: Vec3::default(),
          },
        }
      })
      .collect();

    // adjacency sort into a ring: each step prefers a face sharing two
    // position indices with the previous one, falling back to any
    // remaining face across non-manifold fans
    let mut sorted: Vec<usize> = Vec::with_capacity(exams.len());
    let mut remaining: Vec<usize> = (1..exams.len()).collect();
    let shares_edge = |a: &FaceExam, b: &FaceExam| {
      if a.face == UNDEFINED_INDEX || b.face == UNDEFINED_INDEX {
        return false;
      }
      let ca = self.mesh.position_faces[a.face as usize].corner;
      let cb = self.mesh.position_faces[b.face as usize].corner;
      ca.iter().filter(|v| cb.contains(v)).count() >= 2
    };
    let mut last = 0;
    while !remaining.is_empty() {
      let next = remaining
        .iter()
        .position(|&i| shares_edge(&exams[last], &exams[i]))
        .unwrap_or(remaining.len() - 1);
      last = remaining.swap_remove(next);
      sorted.push(last);
    }
    let ring: Vec<&FaceExam> = std::iter::once(&exams[0])
      .chain(sorted.iter().map(|&i| &exams[i]))
      .collect();

    // mark every face that begins a new smoothing group
    let n = ring.len();
    let mut group_start = vec![false; n];
    let mut first = 0;
    for i in 0..n {
      let prev = ring[(i + n - 1) % n];
      let next = ring[i];
      if prev.face == UNDEFINED_INDEX || next.face == UNDEFINED_INDEX {
        continue;
      }
      let mut cos = prev.normal.dot(next.normal);
      if cos.abs() < CREASE_COS_EPSILON {
        cos = 0.;
      }
      if cos <= self.crease_cos {
        group_start[i] = true;
        if first == 0 {
          first = i;
        }
      }
    }

    // walk the ring once from the first group boundary, flushing each
    // group as the next one begins
    let mut group: Vec<u32> = Vec::new();
    let mut sum = Vec3::default();
    for step in first..first + n {
      let i = step % n;
      if group_start[i] && step != first && !group.is_empty() {
        self.flush_normal_group(vertex, &group, sum, out);
        group.clear();
        sum = Vec3::default();
      }
      let exam = ring[i];
      if exam.face != UNDEFINED_INDEX {
        group.push(exam.face);
        sum += exam.normal;
      }
    }
    if !group.is_empty() {
      self.flush_normal_group(vertex, &group, sum, out);
    }
  }

  fn flush_normal_group(
    &mut self,
    vertex: VertexId,
    group: &[u32],
    normal_sum: Vec3,
    out: &mut Vec<FaceUpdate>,
  ) {
    let average = normal_sum / group.len() as f32;
    let Some((normal_index, _)) = self.normal_map.as_ref().and_then(|m| m.nearest(average)) else {
      return;
    };
    for &face in group {
      self.record_normal_update(face, vertex, normal_index, out);
    }
  }

  fn record_normal_update(
    &mut self,
    face: u32,
    vertex: VertexId,
    normal_index: u32,
    out: &mut Vec<FaceUpdate>,
  ) {
    let Some(corner) = self.mesh.position_faces[face as usize].corner_of(vertex) else {
      return;
    };
    let increasing = self.mesh.normal_faces[face as usize].corner[corner];
    if increasing == normal_index {
      return;
    }
    out.push(FaceUpdate {
      face_index: face,
      attribute: UpdateAttribute::Normal,
      corner: corner as u32,
      decreasing: normal_index,
      increasing,
    });
    self.mesh.normal_faces[face as usize].corner[corner] = normal_index;
  }

  /// zero-face record for a kept vertex whose pair set emptied: replay
  /// reintroduces the vertex without touching any face.
  pub fn record_isolated(&mut self, vertex: VertexId) {
    self.removed.push(vertex);
    self.updates.push(VertexUpdate::default());
  }

  /// the final reordering pass: survivors first, removals in reverse
  /// removal order, every array and every recorded index rewritten, and
  /// the mesh handed back at full resolution with its update stream
  /// installed. `created_faces` are the mesh indices the contractor built
  /// entities for (degenerate input faces never did and are dropped here).
  pub fn finish(mut self, vertices: &[Vertex], created_faces: &[u32]) -> (ClodMesh, MeshMaps) {
    // removal order -> resolution order
    self.updates.reverse();
    self.removed.reverse();

    let (vertex_map, surviving_positions) = self.generate_vertex_map(vertices);
    let (face_map, surviving_faces) = self.generate_face_map(created_faces);

    self.rewrite_arrays(&vertex_map, &face_map, surviving_positions, surviving_faces);
    self.rewrite_records(&vertex_map, &face_map);

    if self.normals_mode == NormalsMode::None {
      self.mesh.normals.clear();
      self.mesh.normal_faces.clear();
    }

    let (normal_map, base_normals) = if self.mesh.normal_faces.is_empty() {
      self.mesh.normals.clear();
      (Vec::new(), 0)
    } else {
      self.reorder_normals(surviving_faces)
    };
    let (tex_map, base_tex) = if self.mesh.tex_coords.is_empty() {
      (Vec::new(), 0)
    } else {
      self.reorder_tex_coords(surviving_faces)
    };
    let (diffuse_map, base_diffuse) = if self.mesh.diffuse_faces.is_empty() {
      self.mesh.diffuse_colors.clear();
      (Vec::new(), 0)
    } else {
      self.reorder_colors(UpdateAttribute::Diffuse, surviving_faces)
    };
    let (specular_map, base_specular) = if self.mesh.specular_faces.is_empty() {
      self.mesh.specular_colors.clear();
      (Vec::new(), 0)
    } else {
      self.reorder_colors(UpdateAttribute::Specular, surviving_faces)
    };

    let base = MeshDescription {
      num_positions: surviving_positions,
      num_faces: surviving_faces,
      num_normals: base_normals,
      num_tex_coords: base_tex,
      num_diffuse_colors: base_diffuse,
      num_specular_colors: base_specular,
    };
    let updates = std::mem::take(&mut self.updates);
    let max = updates.len() as u32;
    self.mesh.set_updates(updates, base);
    self.mesh.set_resolution(max);

    let maps = MeshMaps {
      positions: vertex_map,
      faces: face_map,
      normals: normal_map,
      tex_coords: tex_map,
      diffuse_colors: diffuse_map,
      specular_colors: specular_map,
    };
    (self.mesh, maps)
  }

  /// survivors (connected, never removed) keep their relative order at the
  /// front; removed vertices follow in resolution order, so the record at
  /// step `i` introduces exactly position `surviving + i`. unconnected
  /// input vertices stay unmapped and are dropped.
  fn generate_vertex_map(&self, vertices: &[Vertex]) -> (Vec<u32>, u32) {
    let nv = vertices.len();
    let mut removed = vec![false; nv];
    for &r in &self.removed {
      removed[r as usize] = true;
    }

    let mut map = vec![UNDEFINED_INDEX; nv];
    let mut next = 0u32;
    for (v, vertex) in vertices.iter().enumerate() {
      if vertex.flags.contains(VertexFlags::CONNECTED) && !removed[v] {
        map[v] = next;
        next += 1;
      }
    }
    let surviving = next;
    for (i, &r) in self.removed.iter().enumerate() {
      map[r as usize] = surviving + i as u32;
    }
    (map, surviving)
  }

  /// surviving faces first in original order, then removed faces with
  /// deletion order reversed, keeping each record's new faces contiguous
  /// right behind everything already live at its resolution.
  fn generate_face_map(&self, created_faces: &[u32]) -> (Vec<u32>, u32) {
    let mut map = vec![UNDEFINED_INDEX; self.face_rank.len()];
    let mut next = 0u32;
    for &f in created_faces {
      if self.face_rank[f as usize] == UNDEFINED_INDEX {
        map[f as usize] = next;
        next += 1;
      }
    }
    let surviving = next;
    for (f, &rank) in self.face_rank.iter().enumerate() {
      if rank != UNDEFINED_INDEX {
        map[f] = surviving + (self.num_face_removals - 1 - rank);
      }
    }
    (map, surviving)
  }

  fn rewrite_arrays(
    &mut self,
    vertex_map: &[u32],
    face_map: &[u32],
    surviving_positions: u32,
    surviving_faces: u32,
  ) {
    let new_nv = surviving_positions as usize + self.removed.len();
    let mut positions = vec![Vec3::default(); new_nv];
    for (old, &new) in vertex_map.iter().enumerate() {
      if new != UNDEFINED_INDEX {
        positions[new as usize] = self.mesh.positions[old];
      }
    }
    self.mesh.positions = positions;

    let new_nf = surviving_faces as usize + self.num_face_removals as usize;
    let mut position_faces = vec![FaceIndices::default(); new_nf];
    for (old, &new) in face_map.iter().enumerate() {
      if new != UNDEFINED_INDEX {
        let c = self.mesh.position_faces[old].corner;
        position_faces[new as usize] = FaceIndices::new(
          vertex_map[c[0] as usize],
          vertex_map[c[1] as usize],
          vertex_map[c[2] as usize],
        );
      }
    }
    self.mesh.position_faces = position_faces;

    self.mesh.normal_faces = remap_face_array(&self.mesh.normal_faces, face_map, new_nf);
    self.mesh.diffuse_faces = remap_face_array(&self.mesh.diffuse_faces, face_map, new_nf);
    self.mesh.specular_faces = remap_face_array(&self.mesh.specular_faces, face_map, new_nf);
    for layer in 0..self.num_tex_layers_used as usize {
      self.mesh.tex_faces[layer] = remap_face_array(&self.mesh.tex_faces[layer], face_map, new_nf);
    }

    if !self.mesh.face_materials.is_empty() {
      let mut materials = vec![0u32; new_nf];
      for (old, &new) in face_map.iter().enumerate() {
        if new != UNDEFINED_INDEX {
          materials[new as usize] = self.mesh.face_materials[old];
        }
      }
      self.mesh.face_materials = materials;
    }
  }

  fn rewrite_records(&mut self, vertex_map: &[u32], face_map: &[u32]) {
    for update in &mut self.updates {
      for fu in &mut update.face_updates {
        fu.face_index = face_map[fu.face_index as usize];
        if fu.attribute == UpdateAttribute::Position {
          fu.decreasing = vertex_map[fu.decreasing as usize];
          fu.increasing = vertex_map[fu.increasing as usize];
        }
      }
    }
  }

  /// derive the normal reorder map by walking the base faces, then every
  /// record's new faces and Normal rewrites in resolution order, so the
  /// normals a step introduces sit contiguously in the pool. rewrites the
  /// pool and every touched index; returns the map and the base count.
  fn reorder_normals(&mut self, surviving_faces: u32) -> (Vec<u32>, u32) {
    let mut map = vec![UNDEFINED_INDEX; self.mesh.normals.len()];
    let mut next = 0u32;

    for f in 0..surviving_faces as usize {
      for corner in &mut self.mesh.normal_faces[f].corner {
        *corner = assign(&mut map, &mut next, *corner);
      }
    }
    let base = next;

    let mut updates = std::mem::take(&mut self.updates);
    let mut faces_seen = surviving_faces as usize;
    for update in &mut updates {
      let before = next;
      for f in faces_seen..faces_seen + update.num_new_faces as usize {
        for corner in &mut self.mesh.normal_faces[f].corner {
          *corner = assign(&mut map, &mut next, *corner);
        }
      }
      faces_seen += update.num_new_faces as usize;

      for fu in &mut update.face_updates {
        if fu.attribute == UpdateAttribute::Normal {
          fu.decreasing = assign(&mut map, &mut next, fu.decreasing);
          fu.increasing = assign(&mut map, &mut next, fu.increasing);
        }
      }
      update.num_new_normals = next - before;
    }
    self.updates = updates;

    let mut pool = vec![Vec3::default(); next as usize];
    for (old, &new) in map.iter().enumerate() {
      if new != UNDEFINED_INDEX {
        pool[new as usize] = self.mesh.normals[old];
      }
    }
    self.mesh.normals = pool;
    (map, base)
  }

  /// all texture layers share one coordinate pool and one map. only the
  /// layers a face's material declares are walked; undefined corner slots
  /// are skipped.
  fn reorder_tex_coords(&mut self, surviving_faces: u32) -> (Vec<u32>, u32) {
    let mut map = vec![UNDEFINED_INDEX; self.mesh.tex_coords.len()];
    let mut next = 0u32;

    let mut walk_face = |mesh: &mut ClodMesh, map: &mut Vec<u32>, next: &mut u32, f: usize| {
      let layers = mesh.material(mesh.material_of_face(f as u32)).num_texture_layers;
      for layer in 0..layers as usize {
        for corner in &mut mesh.tex_faces[layer][f].corner {
          if *corner != UNDEFINED_INDEX {
            *corner = assign(map, next, *corner);
          }
        }
      }
    };

    for f in 0..surviving_faces as usize {
      walk_face(&mut self.mesh, &mut map, &mut next, f);
    }
    let base = next;

    let mut updates = std::mem::take(&mut self.updates);
    let mut faces_seen = surviving_faces as usize;
    for update in &mut updates {
      let before = next;
      for f in faces_seen..faces_seen + update.num_new_faces as usize {
        walk_face(&mut self.mesh, &mut map, &mut next, f);
      }
      faces_seen += update.num_new_faces as usize;

      for fu in &mut update.face_updates {
        if let UpdateAttribute::Tex(_) = fu.attribute {
          fu.decreasing = assign(&mut map, &mut next, fu.decreasing);
          fu.increasing = assign(&mut map, &mut next, fu.increasing);
        }
      }
      update.num_new_tex_coords = next - before;
    }
    self.updates = updates;

    let mut pool = vec![Vec4::default(); next as usize];
    for (old, &new) in map.iter().enumerate() {
      if new != UNDEFINED_INDEX {
        pool[new as usize] = self.mesh.tex_coords[old];
      }
    }
    self.mesh.tex_coords = pool;
    (map, base)
  }

  fn reorder_colors(&mut self, attribute: UpdateAttribute, surviving_faces: u32) -> (Vec<u32>, u32) {
    let pool_len = match attribute {
      UpdateAttribute::Diffuse => self.mesh.diffuse_colors.len(),
      _ => self.mesh.specular_colors.len(),
    };
    let mut map = vec![UNDEFINED_INDEX; pool_len];
    let mut next = 0u32;

    for f in 0..surviving_faces as usize {
      for corner in &mut self.mesh.attribute_faces_mut(attribute)[f].corner {
        *corner = assign(&mut map, &mut next, *corner);
      }
    }
    let base = next;

    let mut updates = std::mem::take(&mut self.updates);
    let mut faces_seen = surviving_faces as usize;
    for update in &mut updates {
      let before = next;
      for f in faces_seen..faces_seen + update.num_new_faces as usize {
        for corner in &mut self.mesh.attribute_faces_mut(attribute)[f].corner {
          *corner = assign(&mut map, &mut next, *corner);
        }
      }
      faces_seen += update.num_new_faces as usize;

      for fu in &mut update.face_updates {
        if fu.attribute == attribute {
          fu.decreasing = assign(&mut map, &mut next, fu.decreasing);
          fu.increasing = assign(&mut map, &mut next, fu.increasing);
        }
      }
      match attribute {
        UpdateAttribute::Diffuse => update.num_new_diffuse_colors = next - before,
        _ => update.num_new_specular_colors = next - before,
      }
    }
    self.updates = updates;

    let mut pool = vec![Vec4::default(); next as usize];
    for (old, &new) in map.iter().enumerate() {
      if new != UNDEFINED_INDEX {
        pool[new as usize] = match attribute {
          UpdateAttribute::Diffuse => self.mesh.diffuse_colors[old],
          _ => self.mesh.specular_colors[old],
        };
      }
    }
    match attribute {
      UpdateAttribute::Diffuse => self.mesh.diffuse_colors = pool,
      _ => self.mesh.specular_colors = pool,
    }
    (map, base)
  }
}

fn assign(map: &mut [u32], next: &mut u32, index: u32) -> u32 {
  if map[index as usize] == UNDEFINED_INDEX {
    map[index as usize] = *next;
    *next += 1;
  }
  map[index as usize]
}

fn remap_face_array(src: &[FaceIndices], face_map: &[u32], new_len: usize) -> Vec<FaceIndices> {
  if src.is_empty() {
    return Vec::new();
  }
  let mut out = vec![FaceIndices::default(); new_len];
  for (old, &new) in face_map.iter().enumerate() {
    if new != UNDEFINED_INDEX {
      out[new as usize] = src[old];
    }
  }
  out
}
