use crate::*;

/// sentinel cost for a contraction deferred by the normal-flip check:
/// above any real quadric error, below the base sentinel so deferred pairs
/// still pop before the run ends
pub(crate) const REJECTED_PAIR_COST: f32 = 1e30;
/// sentinel cost for a pair whose endpoints are both protected; the run is
/// over once the heap minimum reaches it
pub(crate) const BASE_PAIR_COST: f32 = 1e35;

/// weight of the penalty plane added along open edges and material/UV
/// seams, discouraging silhouette erosion
const BOUNDARY_EDGE_WEIGHT: f32 = 10.;

/// cos 15 degrees: below this worst-case normal rotation the contraction
/// only re-clusters normals at the kept vertex, not the whole neighborhood
const SMALL_NORMAL_CHANGE_COS: f32 = 0.965_925_8;

pub struct GeneratorOutput {
  /// reordered to streaming order, at full resolution, update stream
  /// installed
  pub mesh: ClodMesh,
  pub maps: MeshMaps,
  /// quadric error of every accepted contraction in removal order, filled
  /// when [`ClodConfig::record_mesh_damage`] is set (isolation records
  /// contribute nothing)
  pub mesh_damage: Vec<f32>,
}

/// run the whole pipeline: init, contract until only protected or
/// prohibitively expensive pairs remain, reorder.
pub fn generate(mesh: ClodMesh, config: ClodConfig) -> Result<GeneratorOutput, GenerateError> {
  let mut contractor = Contractor::new(mesh, config)?;
  contractor.contract_all()?;
  Ok(contractor.finish())
}

#[derive(Debug, PartialEq, Eq)]
enum RunState {
  Initialized,
  Done,
  Cancelled,
}

/// owner of the whole run: entity arenas, pair hash, cost heap and the
/// recorder. one instance per run; nothing is shared or reusable after
/// completion or cancellation.
pub struct Contractor<'a> {
  config: ClodConfig<'a>,
  vertices: Vec<Vertex>,
  faces: Vec<Face>,
  /// mesh indices of the faces that got entities (degenerate input faces
  /// were dropped)
  created_faces: Vec<u32>,
  hash: PairHash,
  heap: PairHeap,
  recorder: ContractionRecorder,
  max_normal_change_cos: f32,
  rejection_streak: u32,
  mesh_damage: Vec<f32>,
  state: RunState,
}

impl<'a> Contractor<'a> {
  pub fn new(mesh: ClodMesh, mut config: ClodConfig<'a>) -> Result<Self, GenerateError> {
    mesh.validate()?;

    let nv = mesh.positions.len();
    let nf = mesh.position_faces.len();

    let mut vertices: Vec<Vertex> = Vec::new();
    vertices.try_reserve_exact(nv)?;
    vertices.extend(mesh.positions.iter().map(|p| Vertex {
      position: *p,
      ..Default::default()
    }));
    for &b in &config.base_vertices {
      if (b as usize) < nv {
        vertices[b as usize].flags |= VertexFlags::BASE;
      }
    }

    let mut faces: Vec<Face> = Vec::new();
    faces.try_reserve_exact(nf)?;
    let mut hash = PairHash::with_expected_pairs(nf * 2)?;
    let mut created_faces = Vec::with_capacity(nf);

    for (index, face) in mesh.position_faces.iter().enumerate() {
      let [a, b, c] = face.corner;
      if a == b || b == c || c == a {
        continue;
      }
      let Some((plane, _)) = Plane::from_triangle(
        mesh.positions[a as usize],
        mesh.positions[b as usize],
        mesh.positions[c as usize],
      ) else {
        continue; // zero-area input faces are dropped at setup
      };

      let fid = faces.len() as FaceId;
      let pairs = [(a, b), (b, c), (c, a)].map(|(x, y)| hash.add_pair(x, y).0);
      for pid in pairs {
        hash[pid].faces.insert(fid);
      }
      for (v, incident) in [(a, [pairs[0], pairs[2]]), (b, [pairs[0], pairs[1]]), (c, [pairs[1], pairs[2]])] {
        let vertex = &mut vertices[v as usize];
        vertex.flags |= VertexFlags::CONNECTED;
        for pid in incident {
          vertex.pairs.insert(pid);
        }
      }

      faces.push(Face {
        pairs,
        index: index as u32,
        plane,
        quadric: Quadric::from_plane(plane, 1.),
      });
      created_faces.push(index as u32);
    }

    let topological_pairs = hash.len();

    // welding: virtual pairs between spatially close vertices
    if config.merge_threshold >= 0. {
      let positions: Vec<Vec3> = vertices.iter().map(|v| v.position).collect();
      let components = (!config.merge_within_object).then(|| label_components(&vertices, &hash));
      let finder = PairFinder::new(&positions, config.merge_threshold);
      let frequency = config.progress_frequency.max(1);
      let progress = &mut config.progress;
      let mut added = 0u32;

      finder.for_each_close_pair(&positions, |v, w| {
        if let Some(components) = &components {
          if components[v as usize] == components[w as usize] {
            return Ok(());
          }
        }
        let (pid, created) = hash.add_pair(v, w);
        if created {
          for end in [v, w] {
            let vertex = &mut vertices[end as usize];
            vertex.flags |= VertexFlags::CONNECTED;
            vertex.pairs.insert(pid);
          }
          added += 1;
          if added % frequency == 0 {
            if let Some(callback) = progress.as_mut() {
              if !callback(0.) {
                return Err(GenerateError::Cancelled);
              }
            }
          }
        }
        Ok(())
      })?;

      log::debug!("pair finder added {added} virtual pairs");
    }

    classify_boundaries(&mesh, &mut hash, &mut vertices, &faces);

    // vertex quadrics: incident face quadrics plus boundary penalties
    for face in &faces {
      let face_quadric = face.quadric;
      for v in hash.face_vertices(face) {
        vertices[v as usize].quadric += face_quadric;
      }
    }
    let pair_ids: Vec<PairId> = hash.pair_ids().collect();
    for &pid in &pair_ids {
      let pair = &hash[pid];
      if !pair.is_boundary() || pair.faces.is_empty() {
        continue;
      }
      let face = &faces[pair.faces.as_slice()[0] as usize];
      let (v1, v2) = (pair.v1, pair.v2);
      let third = hash
        .face_vertices(face)
        .into_iter()
        .find(|v| *v != v1 && *v != v2);
      let Some(third) = third else { continue };
      let quadric = Quadric::from_triangle_edge(
        vertices[v1 as usize].position,
        vertices[v2 as usize].position,
        vertices[third as usize].position,
        BOUNDARY_EDGE_WEIGHT,
      );
      if let Some(q) = quadric {
        vertices[v1 as usize].quadric += q;
        vertices[v2 as usize].quadric += q;
      }
    }

    // all initial costs through the one-shot hash iteration
    let mut heap = PairHeap::with_capacity(hash.len());
    for pid in pair_ids {
      let (cost, keep_second) = pair_cost(&vertices, &hash[pid]);
      let pair = &mut hash[pid];
      pair.keep_second = keep_second;
      pair.heap_handle = heap.insert(cost, pid);
    }

    log::debug!(
      "init: {} vertices, {} faces, {} pairs ({} topological)",
      nv,
      faces.len(),
      hash.len(),
      topological_pairs,
    );

    let max_normal_change_cos = config
      .max_normal_change_deg
      .clamp(0., 180.)
      .to_radians()
      .cos();
    let recorder =
      ContractionRecorder::new(mesh, config.normals_mode, config.normals_crease_angle_deg);

    Ok(Self {
      config,
      vertices,
      faces,
      created_faces,
      hash,
      heap,
      recorder,
      max_normal_change_cos,
      rejection_streak: 0,
      mesh_damage: Vec::new(),
      state: RunState::Initialized,
    })
  }

  /// drive the contraction loop to completion. progress maps the drained
  /// share of the heap to a 0..=100 scale; a `false` from the callback
  /// cancels the run, which is then not resumable.
  pub fn contract_all(&mut self) -> Result<(), GenerateError> {
    let initial = self.heap.len().max(1) as f32;
    let frequency = self.config.progress_frequency.max(1);
    let mut accepted = 0u32;

    loop {
      match self.heap.peek_cost() {
        None => break,
        Some(cost) if cost >= BASE_PAIR_COST => break,
        Some(_) => {}
      }
      if self.contract_next_pair() {
        accepted += 1;
        if accepted % frequency == 0 {
          let percent = 100. * (1. - self.heap.len() as f32 / initial);
          if let Some(callback) = self.config.progress.as_mut() {
            if !callback(percent) {
              self.state = RunState::Cancelled;
              return Err(GenerateError::Cancelled);
            }
          }
        }
      }
    }
    self.state = RunState::Done;
    Ok(())
  }

  /// the final reordering pass. call after [`contract_all`] succeeded.
  ///
  /// [`contract_all`]: Contractor::contract_all
  pub fn finish(self) -> GeneratorOutput {
    debug_assert_eq!(self.state, RunState::Done);
    let (mesh, maps) = self.recorder.finish(&self.vertices, &self.created_faces);
    GeneratorOutput {
      mesh,
      maps,
      mesh_damage: self.mesh_damage,
    }
  }

  /// pop the cheapest pair and either contract it or defer it at the
  /// rejection sentinel. returns whether a contraction was accepted.
  fn contract_next_pair(&mut self) -> bool {
    let Some((pid, cost)) = self.heap.pop() else {
      return false;
    };
    self.hash[pid].heap_handle = INVALID_HEAP_HANDLE;
    let keep = self.hash[pid].kept_vertex();
    let remove = self.hash[pid].removed_vertex();

    let (flips, small_change) = self.normal_flips(keep, remove, pid);
    if flips {
      // the streak bound against the shrinking heap guarantees progress
      if (self.rejection_streak as usize) < self.heap.len() {
        self.rejection_streak += 1;
        self.hash[pid].heap_handle = self.heap.insert(REJECTED_PAIR_COST, pid);
        return false;
      }
      log::warn!(
        "force-accepting a normal-flipping contraction after {} consecutive rejections",
        self.rejection_streak
      );
    }
    self.rejection_streak = 0;

    if self.config.record_mesh_damage {
      let damage = if cost >= REJECTED_PAIR_COST {
        // a deferred pair carries its sentinel; re-derive the real error
        let pair = &self.hash[pid];
        let q = self.vertices[pair.v1 as usize].quadric + self.vertices[pair.v2 as usize].quadric;
        q.error(self.vertices[keep as usize].position)
      } else {
        cost
      };
      self.mesh_damage.push(damage);
    }

    // faces on the pair die; other faces on the removed vertex survive
    // with a rewritten corner
    let mut deleted = FaceSet::new();
    for f in &self.hash[pid].faces {
      deleted.insert(f);
    }
    let remove_faces = self.hash.face_set(&self.vertices[remove as usize]);
    let updated = set_difference(&remove_faces, &deleted);

    let deleted_indices: Vec<u32> = deleted.iter().map(|f| self.faces[f as usize].index).collect();
    let updated_indices: Vec<u32> = updated.iter().map(|f| self.faces[f as usize].index).collect();
    self
      .recorder
      .record(keep, remove, &deleted_indices, &updated_indices);

    self.contract_topology(pid, keep, remove, &deleted);

    if self.config.normals_mode == NormalsMode::TrackSurfaceChanges {
      self.record_normal_changes(keep, &updated, small_change);
    }

    if self.vertices[keep as usize].pairs.is_empty() {
      // protected vertices survive into the base mesh even when isolated
      if !self.vertices[keep as usize].is_base() {
        self.recorder.record_isolated(keep);
      }
    } else {
      self.recost_pairs_of(keep);
    }
    true
  }

  /// detach the contracted pair, unlink its dead faces, and move every
  /// remaining pair of the removed vertex onto the kept one, merging
  /// duplicates
  fn contract_topology(&mut self, pid: PairId, keep: VertexId, remove: VertexId, deleted: &FaceSet) {
    self.vertices[keep as usize].pairs.remove(pid);
    self.vertices[remove as usize].pairs.remove(pid);
    self.hash.delete(pid);

    for fid in deleted {
      let face_pairs = self.faces[fid as usize].pairs;
      for q in face_pairs {
        if q != pid {
          self.hash[q].faces.remove(fid);
        }
      }
    }

    let remove_pairs: Vec<PairId> = self.vertices[remove as usize].pairs.iter().collect();
    for qid in remove_pairs {
      let other = self.hash[qid].other_vertex(remove);
      if let Some(existing) = self.hash.find(keep, other) {
        // an equivalent pair already joins keep and other: merge
        let merged_faces: Vec<FaceId> = self.hash[qid].faces.iter().collect();
        let handle = self.hash[qid].heap_handle;
        for fid in merged_faces {
          self.hash[existing].faces.insert(fid);
          for p in &mut self.faces[fid as usize].pairs {
            if *p == qid {
              *p = existing;
            }
          }
        }
        self.vertices[other as usize].pairs.remove(qid);
        if handle != INVALID_HEAP_HANDLE {
          self.heap.remove(handle);
        }
        self.hash.delete(qid);
      } else {
        self.hash.remove(qid);
        self.hash[qid].replace_vertex(remove, keep);
        self.hash.insert(qid);
        self.vertices[keep as usize].pairs.insert(qid);
      }
    }
    self.vertices[remove as usize].pairs.clear();

    // the survivor accumulates the removed vertex's error history and
    // inherits its boundary status
    let removed_quadric = self.vertices[remove as usize].quadric;
    self.vertices[keep as usize].quadric += removed_quadric;
    let inherited = self.vertices[remove as usize].flags
      & (VertexFlags::BOUNDARY | VertexFlags::TEXTURE_BOUNDARY);
    self.vertices[keep as usize].flags |= inherited;
  }

  /// hand the recorder the normal neighborhood: the kept vertex's faces,
  /// and unless the contraction barely rotated any surviving normal, the
  /// faces of every other vertex on an updated face
  fn record_normal_changes(&mut self, keep: VertexId, updated: &FaceSet, small_change: bool) {
    let keep_faces: Vec<u32> = self
      .hash
      .face_set(&self.vertices[keep as usize])
      .iter()
      .map(|f| self.faces[f as usize].index)
      .collect();

    let mut neighborhood: Vec<(VertexId, Vec<u32>)> = Vec::new();
    if !small_change {
      let mut others = SmallSet::<VertexId, 16>::new();
      for fid in updated {
        for p in self.faces[fid as usize].pairs {
          let pair = &self.hash[p];
          for v in [pair.v1, pair.v2] {
            if v != keep {
              others.insert(v);
            }
          }
        }
      }
      for v in &others {
        let faces: Vec<u32> = self
          .hash
          .face_set(&self.vertices[v as usize])
          .iter()
          .map(|f| self.faces[f as usize].index)
          .collect();
        neighborhood.push((v, faces));
      }
    }

    self
      .recorder
      .record_attrib_changes(keep, &keep_faces, &neighborhood);
  }

  /// every pair touching the kept vertex has a stale cost after a
  /// contraction. pairs that lost all their faces contract for free so
  /// dangling and virtual leftovers clean up promptly.
  fn recost_pairs_of(&mut self, keep: VertexId) {
    let touching: Vec<PairId> = self.vertices[keep as usize].pairs.iter().collect();
    for qid in touching {
      let pair = &self.hash[qid];
      let faceless = pair.faces.is_empty()
        && !self.vertices[pair.v1 as usize].is_base()
        && !self.vertices[pair.v2 as usize].is_base();
      let (cost, keep_second) = if faceless {
        (0., false)
      } else {
        pair_cost(&self.vertices, pair)
      };

      let pair = &mut self.hash[qid];
      pair.keep_second = keep_second;
      if pair.heap_handle != INVALID_HEAP_HANDLE {
        self.heap.update(pair.heap_handle, cost);
      } else {
        pair.heap_handle = self.heap.insert(cost, qid);
      }
    }
  }

  /// compare, for every face that survives this contraction, its cached
  /// normal against the normal after substituting the kept position.
  /// a degenerate result or a rotation past the configured threshold
  /// rejects the pop. the second flag reports a near-unchanged worst case.
  fn normal_flips(&self, keep: VertexId, remove: VertexId, pid: PairId) -> (bool, bool) {
    let keep_pos = self.vertices[keep as usize].position;
    let mesh = self.recorder.mesh();
    let mut worst_cos = 1.0f32;

    let remove_faces = self.hash.face_set(&self.vertices[remove as usize]);
    for fid in &remove_faces {
      if self.hash[pid].faces.contains(fid) {
        continue;
      }
      let face = &self.faces[fid as usize];
      let corners = mesh.position_faces[face.index as usize].corner;
      let p = corners.map(|c| {
        if c == remove {
          keep_pos
        } else {
          self.vertices[c as usize].position
        }
      });
      let Some((plane, _)) = Plane::from_triangle(p[0], p[1], p[2]) else {
        return (true, false);
      };
      let cos = face.plane.normal.dot(plane.normal);
      if cos < self.max_normal_change_cos {
        return (true, false);
      }
      worst_cos = worst_cos.min(cos);
    }
    (false, worst_cos >= SMALL_NORMAL_CHANGE_COS)
  }
}

/// keep-v1 cost is the combined quadric evaluated at v1, symmetric for
/// v2. protection and boundary flags can override which side survives.
fn pair_cost(vertices: &[Vertex], pair: &Pair) -> (f32, bool) {
  let v1 = &vertices[pair.v1 as usize];
  let v2 = &vertices[pair.v2 as usize];

  if v1.is_base() && v2.is_base() {
    return (BASE_PAIR_COST, false);
  }

  let q = v1.quadric + v2.quadric;
  let cost_keep_v1 = q.error(v1.position);
  let cost_keep_v2 = q.error(v2.position);

  if v1.is_base() {
    return (cost_keep_v1, false);
  }
  if v2.is_base() {
    return (cost_keep_v2, true);
  }

  // keep a boundary vertex over an interior one regardless of cost
  match (v1.is_any_boundary(), v2.is_any_boundary()) {
    (true, false) => (cost_keep_v1, false),
    (false, true) => (cost_keep_v2, true),
    _ => {
      if cost_keep_v2 < cost_keep_v1 {
        (cost_keep_v2, true)
      } else {
        (cost_keep_v1, false)
      }
    }
  }
}

/// flag material and attribute seams. a 2-face pair is interior only when
/// both faces agree on material id and carry bit-identical attribute
/// values at the pair's endpoints on every texture layer and color
/// channel.
fn classify_boundaries(
  mesh: &ClodMesh,
  hash: &mut PairHash,
  vertices: &mut [Vertex],
  faces: &[Face],
) {
  let pair_ids: Vec<PairId> = hash.pair_ids().collect();
  for pid in pair_ids {
    let pair = &hash[pid];
    let (v1, v2) = (pair.v1, pair.v2);
    match pair.faces.len() {
      1 => {
        vertices[v1 as usize].flags |= VertexFlags::BOUNDARY;
        vertices[v2 as usize].flags |= VertexFlags::BOUNDARY;
      }
      2 => {
        let fa = faces[pair.faces.as_slice()[0] as usize].index;
        let fb = faces[pair.faces.as_slice()[1] as usize].index;
        if mesh.material_of_face(fa) != mesh.material_of_face(fb) {
          hash[pid].flags |= PairFlags::MATERIAL_BOUNDARY;
          vertices[v1 as usize].flags |= VertexFlags::BOUNDARY;
          vertices[v2 as usize].flags |= VertexFlags::BOUNDARY;
        } else if attributes_disagree(mesh, fa, fb, v1) || attributes_disagree(mesh, fa, fb, v2) {
          hash[pid].flags |= PairFlags::UV_BOUNDARY;
          vertices[v1 as usize].flags |= VertexFlags::TEXTURE_BOUNDARY;
          vertices[v2 as usize].flags |= VertexFlags::TEXTURE_BOUNDARY;
        }
      }
      _ => {}
    }
  }
}

/// whether the two faces (already known to share a material) disagree on
/// any texture or color value at the corner holding `v`
fn attributes_disagree(mesh: &ClodMesh, fa: u32, fb: u32, v: VertexId) -> bool {
  let (Some(ca), Some(cb)) = (
    mesh.position_faces[fa as usize].corner_of(v),
    mesh.position_faces[fb as usize].corner_of(v),
  ) else {
    return false;
  };
  let material = mesh.material(mesh.material_of_face(fa));

  for layer in 0..material.num_texture_layers as usize {
    let ia = mesh.tex_faces[layer][fa as usize].corner[ca];
    let ib = mesh.tex_faces[layer][fb as usize].corner[cb];
    if values_differ(&mesh.tex_coords, ia, ib) {
      return true;
    }
  }
  if material.has_diffuse_colors {
    let ia = mesh.diffuse_faces[fa as usize].corner[ca];
    let ib = mesh.diffuse_faces[fb as usize].corner[cb];
    if values_differ(&mesh.diffuse_colors, ia, ib) {
      return true;
    }
  }
  if material.has_specular_colors {
    let ia = mesh.specular_faces[fa as usize].corner[ca];
    let ib = mesh.specular_faces[fb as usize].corner[cb];
    if values_differ(&mesh.specular_colors, ia, ib) {
      return true;
    }
  }
  false
}

/// equal indices are trivially continuous; distinct indices still count as
/// continuous when the values are bit-identical
fn values_differ(pool: &[Vec4], ia: u32, ib: u32) -> bool {
  if ia == ib {
    return false;
  }
  if ia == UNDEFINED_INDEX || ib == UNDEFINED_INDEX {
    return true;
  }
  let a = pool[ia as usize];
  let b = pool[ib as usize];
  a.x.to_bits() != b.x.to_bits()
    || a.y.to_bits() != b.y.to_bits()
    || a.z.to_bits() != b.z.to_bits()
    || a.w.to_bits() != b.w.to_bits()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vertex_at(position: Vec3, flags: VertexFlags) -> Vertex {
    Vertex {
      position,
      flags,
      ..Default::default()
    }
  }

  #[test]
  fn base_pairs_use_sentinels() {
    let both = vec![
      vertex_at(vec3(0., 0., 0.), VertexFlags::BASE),
      vertex_at(vec3(1., 0., 0.), VertexFlags::BASE),
    ];
    let pair = Pair::new(0, 1);
    assert_eq!(pair_cost(&both, &pair).0, BASE_PAIR_COST);

    let one = vec![
      vertex_at(vec3(0., 0., 0.), VertexFlags::BASE),
      vertex_at(vec3(1., 0., 0.), VertexFlags::empty()),
    ];
    let (_, keep_second) = pair_cost(&one, &pair);
    assert!(!keep_second, "the protected vertex must survive");
  }

  #[test]
  fn boundary_vertex_wins_the_direction() {
    let mut boundary = vertex_at(vec3(0., 0., 0.), VertexFlags::BOUNDARY);
    let mut interior = vertex_at(vec3(1., 0., 0.), VertexFlags::empty());
    // stack the quadrics so the interior side would be cheaper to keep
    boundary.quadric = Quadric::from_plane(Plane::new(vec3(1., 0., 0.), 0.), 1.);
    interior.quadric = Quadric::from_plane(Plane::new(vec3(1., 0., 0.), -1.), 1.);

    let (_, keep_second) = pair_cost(&[boundary, interior], &Pair::new(0, 1));
    assert!(!keep_second, "the boundary vertex must survive");
  }

  /// two triangles on the shared edge 1-2, with 0 and 3 on opposite sides
  /// of it along x
  fn fold_mesh() -> ClodMesh {
    let positions = vec![
      vec3(0., 0., 0.),
      vec3(2., 0., 0.),
      vec3(1., 1., 0.),
      vec3(1., -1., 0.),
    ];
    let faces = vec![FaceIndices::new(0, 1, 2), FaceIndices::new(2, 1, 3)];
    ClodMesh::new(positions, faces)
  }

  #[test]
  fn contractions_that_fold_a_face_are_detected() {
    let contractor = Contractor::new(fold_mesh(), ClodConfig::default()).unwrap();
    let pid = contractor.hash.find(0, 1).unwrap();

    // pulling vertex 1 onto vertex 0 reverses the second face's winding
    let (flips, _) = contractor.normal_flips(0, 1, pid);
    assert!(flips);

    // the other direction only loses the shared face, which dies anyway
    let (flips, small) = contractor.normal_flips(1, 0, pid);
    assert!(!flips);
    assert!(small);
  }

  #[test]
  fn direction_follows_the_cheaper_side() {
    // v0 sits on both planes, v1 on neither: keeping v0 is free
    let mut cheap = vertex_at(vec3(0., 0., 0.), VertexFlags::empty());
    let mut expensive = vertex_at(vec3(1., 2., 0.), VertexFlags::empty());
    cheap.quadric = Quadric::from_plane(Plane::new(vec3(1., 0., 0.), 0.), 1.);
    expensive.quadric = Quadric::from_plane(Plane::new(vec3(0., 1., 0.), 0.), 1.);

    let (cost, keep_second) = pair_cost(&[cheap, expensive], &Pair::new(0, 1));
    assert!(!keep_second);
    assert!(cost < 1e-6);
  }
}
