use smallvec::SmallVec;

use crate::*;

/// one-shot uniform grid over vertex positions, used to find welding
/// candidates: unconnected vertices close enough to contract.
///
/// cells are at least `threshold` wide on every axis, so scanning a cell
/// plus its immediate neighbors covers the full search radius.
pub struct PairFinder {
  threshold2: f32,
  min: Vec3,
  inv_cell: Vec3,
  dims: [i32; 3],
  cells: Vec<SmallVec<[VertexId; 4]>>,
}

/// the 13 neighbor offsets lexicographically after (0, 0, 0); together
/// with the cell itself they visit every unordered cell pair once
const FORWARD_NEIGHBORS: [[i32; 3]; 13] = [
  [1, 0, 0],
  [-1, 1, 0],
  [0, 1, 0],
  [1, 1, 0],
  [-1, -1, 1],
  [0, -1, 1],
  [1, -1, 1],
  [-1, 0, 1],
  [0, 0, 1],
  [1, 0, 1],
  [-1, 1, 1],
  [0, 1, 1],
  [1, 1, 1],
];

impl PairFinder {
  pub fn new(positions: &[Vec3], threshold: f32) -> Self {
    debug_assert!(threshold >= 0.);
    let mut min = vec3(f32::MAX, f32::MAX, f32::MAX);
    let mut max = vec3(f32::MIN, f32::MIN, f32::MIN);
    for p in positions {
      min = min.min_by_component(*p);
      max = max.max_by_component(*p);
    }
    if positions.is_empty() {
      min = Vec3::default();
      max = Vec3::default();
    }
    let extent = max - min;

    // cube-root sizing, tiled down so the cell count never exceeds the
    // vertex count and no cell is narrower than the search radius
    let target = positions.len().max(1);
    let per_axis = (target as f32).cbrt().ceil().max(1.);
    let longest = extent.x.max(extent.y).max(extent.z).max(f32::EPSILON);
    let mut dims = [0i32; 3];
    for (i, e) in [extent.x, extent.y, extent.z].into_iter().enumerate() {
      let mut d = ((e / longest) * per_axis).ceil().max(1.) as i32;
      if threshold > 0. {
        d = d.min(((e / threshold) as i32).max(1));
      }
      dims[i] = d;
    }
    while (dims[0] as usize) * (dims[1] as usize) * (dims[2] as usize) > target {
      let widest = (0..3).max_by_key(|i| dims[*i]).unwrap();
      dims[widest] = (dims[widest] + 1) / 2;
    }

    let inv_cell = vec3(
      dims[0] as f32 / extent.x.max(f32::EPSILON),
      dims[1] as f32 / extent.y.max(f32::EPSILON),
      dims[2] as f32 / extent.z.max(f32::EPSILON),
    );

    let mut finder = Self {
      threshold2: threshold * threshold,
      min,
      inv_cell,
      dims,
      cells: vec![SmallVec::new(); (dims[0] * dims[1] * dims[2]) as usize],
    };
    for (v, p) in positions.iter().enumerate() {
      let cell = finder.cell_of(*p);
      let index = finder.cell_index(cell);
      finder.cells[index].push(v as VertexId);
    }
    finder
  }

  fn cell_of(&self, p: Vec3) -> [i32; 3] {
    let local = p - self.min;
    [
      ((local.x * self.inv_cell.x) as i32).clamp(0, self.dims[0] - 1),
      ((local.y * self.inv_cell.y) as i32).clamp(0, self.dims[1] - 1),
      ((local.z * self.inv_cell.z) as i32).clamp(0, self.dims[2] - 1),
    ]
  }

  fn cell_index(&self, [x, y, z]: [i32; 3]) -> usize {
    ((z * self.dims[1] + y) * self.dims[0] + x) as usize
  }

  /// visit every unordered vertex pair within the threshold, each exactly
  /// once. the visitor may cancel by returning an error.
  pub fn for_each_close_pair(
    &self,
    positions: &[Vec3],
    mut visit: impl FnMut(VertexId, VertexId) -> Result<(), GenerateError>,
  ) -> Result<(), GenerateError> {
    for z in 0..self.dims[2] {
      for y in 0..self.dims[1] {
        for x in 0..self.dims[0] {
          let here = &self.cells[self.cell_index([x, y, z])];

          for (i, v) in here.iter().enumerate() {
            for w in &here[i + 1..] {
              self.visit_if_close(positions, *v, *w, &mut visit)?;
            }
          }

          for [dx, dy, dz] in FORWARD_NEIGHBORS {
            let n = [x + dx, y + dy, z + dz];
            if n[0] < 0 || n[0] >= self.dims[0] || n[1] < 0 || n[1] >= self.dims[1] || n[2] >= self.dims[2] {
              continue;
            }
            let there = &self.cells[self.cell_index(n)];
            for v in here {
              for w in there {
                self.visit_if_close(positions, *v, *w, &mut visit)?;
              }
            }
          }
        }
      }
    }
    Ok(())
  }

  fn visit_if_close(
    &self,
    positions: &[Vec3],
    v: VertexId,
    w: VertexId,
    visit: &mut impl FnMut(VertexId, VertexId) -> Result<(), GenerateError>,
  ) -> Result<(), GenerateError> {
    if positions[v as usize].distance2(positions[w as usize]) <= self.threshold2 {
      visit(v, w)?;
    }
    Ok(())
  }
}

/// label connected components over the existing (topological) pairs, so
/// welding can be restricted to pairs that join separate pieces. isolated
/// vertices each get their own component.
pub fn label_components(vertices: &[Vertex], hash: &PairHash) -> Vec<u32> {
  const UNLABELED: u32 = u32::MAX;
  let mut components = vec![UNLABELED; vertices.len()];
  let mut next = 0u32;
  let mut stack: Vec<VertexId> = Vec::new();

  for seed in 0..vertices.len() {
    if components[seed] != UNLABELED {
      continue;
    }
    components[seed] = next;
    stack.push(seed as VertexId);
    while let Some(v) = stack.pop() {
      for pair in &vertices[v as usize].pairs {
        let other = hash[pair].other_vertex(v);
        if components[other as usize] == UNLABELED {
          components[other as usize] = next;
          stack.push(other);
        }
      }
    }
    next += 1;
  }
  components
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;

  fn brute_force(positions: &[Vec3], threshold: f32) -> Vec<(VertexId, VertexId)> {
    let mut pairs = Vec::new();
    for i in 0..positions.len() {
      for j in i + 1..positions.len() {
        if positions[i].distance2(positions[j]) <= threshold * threshold {
          pairs.push((i as VertexId, j as VertexId));
        }
      }
    }
    pairs.sort();
    pairs
  }

  #[test]
  fn grid_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(11);
    let positions: Vec<Vec3> = (0..300)
      .map(|_| {
        vec3(
          rng.gen_range(-5.0..5.0),
          rng.gen_range(-2.0..2.0),
          rng.gen_range(0.0..10.0),
        )
      })
      .collect();

    for threshold in [0.1, 0.75, 3.0] {
      let finder = PairFinder::new(&positions, threshold);
      let mut found = Vec::new();
      finder
        .for_each_close_pair(&positions, |v, w| {
          found.push((v.min(w), v.max(w)));
          Ok(())
        })
        .unwrap();
      found.sort();
      found.dedup();
      assert_eq!(found, brute_force(&positions, threshold));
    }
  }

  #[test]
  fn coincident_and_single_vertex() {
    let positions = vec![vec3(1., 2., 3.); 4];
    let finder = PairFinder::new(&positions, 0.);
    let mut count = 0;
    finder
      .for_each_close_pair(&positions, |_, _| {
        count += 1;
        Ok(())
      })
      .unwrap();
    assert_eq!(count, 6);

    let one = vec![vec3(0., 0., 0.)];
    let finder = PairFinder::new(&one, 1.);
    finder
      .for_each_close_pair(&one, |_, _| panic!("no pairs from one vertex"))
      .unwrap();
  }

  #[test]
  fn cancellation_propagates() {
    let positions = vec![vec3(0., 0., 0.), vec3(0.1, 0., 0.)];
    let finder = PairFinder::new(&positions, 1.);
    let result = finder.for_each_close_pair(&positions, |_, _| Err(GenerateError::Cancelled));
    assert!(matches!(result, Err(GenerateError::Cancelled)));
  }

  #[test]
  fn components_over_pairs() {
    // two triangles sharing nothing, plus an isolated vertex
    let mut hash = PairHash::with_expected_pairs(8).unwrap();
    let mut vertices = vec![Vertex::default(); 7];
    for (a, b) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
      let (p, _) = hash.add_pair(a, b);
      vertices[a as usize].pairs.insert(p);
      vertices[b as usize].pairs.insert(p);
    }

    let components = label_components(&vertices, &hash);
    assert_eq!(components[0], components[1]);
    assert_eq!(components[1], components[2]);
    assert_eq!(components[3], components[4]);
    assert_eq!(components[4], components[5]);
    assert_ne!(components[0], components[3]);
    assert_ne!(components[6], components[0]);
    assert_ne!(components[6], components[3]);
  }
}
