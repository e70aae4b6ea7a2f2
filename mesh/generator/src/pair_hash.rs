use std::{
  collections::TryReserveError,
  ops::{Index, IndexMut},
};

use crate::*;

fn canonical(v1: VertexId, v2: VertexId) -> (VertexId, VertexId) {
  if v1 < v2 {
    (v1, v2)
  } else {
    (v2, v1)
  }
}

/// owner of every live [`Pair`]: a pooled arena with an embedded free
/// list, plus the canonical unordered-pair index over it. at most one
/// pair exists between any two vertices; duplicates found during topology
/// surgery are merged by the contractor, never left dangling.
pub struct PairHash {
  map: FastHashMap<(VertexId, VertexId), PairId>,
  pairs: Vec<Pair>,
  free: Vec<PairId>,
}

impl PairHash {
  /// `expected` is sized by the caller to ~2x the face count; growth past
  /// it falls back to ordinary allocation.
  pub fn with_expected_pairs(expected: usize) -> Result<Self, TryReserveError> {
    let mut pairs = Vec::new();
    pairs.try_reserve_exact(expected)?;
    let mut map = FastHashMap::default();
    map.try_reserve(expected)?;
    Ok(Self {
      map,
      pairs,
      free: Vec::new(),
    })
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn find(&self, v1: VertexId, v2: VertexId) -> Option<PairId> {
    self.map.get(&canonical(v1, v2)).copied()
  }

  /// find the pair between the two vertices or create a fresh one.
  /// returns the id and whether it was created.
  pub fn add_pair(&mut self, v1: VertexId, v2: VertexId) -> (PairId, bool) {
    debug_assert_ne!(v1, v2, "a pair joins two distinct vertices");
    let key = canonical(v1, v2);
    if let Some(id) = self.map.get(&key) {
      return (*id, false);
    }
    let pair = Pair::new(key.0, key.1);
    let id = match self.free.pop() {
      Some(id) => {
        self.pairs[id as usize] = pair;
        id
      }
      None => {
        self.pairs.push(pair);
        (self.pairs.len() - 1) as PairId
      }
    };
    self.map.insert(key, id);
    (id, true)
  }

  /// unlink from the index without freeing, for re-keying after a vertex
  /// replacement. the caller mutates the endpoints then calls [`insert`].
  ///
  /// [`insert`]: PairHash::insert
  pub fn remove(&mut self, id: PairId) {
    let key = canonical(self.pairs[id as usize].v1, self.pairs[id as usize].v2);
    let unlinked = self.map.remove(&key);
    debug_assert_eq!(unlinked, Some(id));
  }

  /// re-index a pair under its (updated) endpoints
  pub fn insert(&mut self, id: PairId) {
    let key = canonical(self.pairs[id as usize].v1, self.pairs[id as usize].v2);
    let previous = self.map.insert(key, id);
    debug_assert!(previous.is_none(), "duplicate pairs must be merged");
  }

  /// unlink and return the slot to the pool
  pub fn delete(&mut self, id: PairId) {
    self.remove(id);
    self.free.push(id);
  }

  /// iterate every live pair id. used once at startup to seed costs.
  pub fn pair_ids(&self) -> impl Iterator<Item = PairId> + '_ {
    self.map.values().copied()
  }

  /// the vertex two pairs share
  pub fn common_vertex(&self, a: PairId, b: PairId) -> VertexId {
    let pa = &self.pairs[a as usize];
    let pb = &self.pairs[b as usize];
    if pb.has_vertex(pa.v1) {
      pa.v1
    } else {
      debug_assert!(pb.has_vertex(pa.v2));
      pa.v2
    }
  }

  /// the face's corner vertices `(a, b, c)`, recovered from its pairs
  pub fn face_vertices(&self, face: &Face) -> [VertexId; 3] {
    let [pab, pbc, pca] = face.pairs;
    [
      self.common_vertex(pca, pab),
      self.common_vertex(pab, pbc),
      self.common_vertex(pbc, pca),
    ]
  }

  /// all faces around a vertex: the union of its pairs' face sets
  pub fn face_set(&self, vertex: &Vertex) -> FaceSet {
    let mut faces = FaceSet::new();
    for pair in &vertex.pairs {
      for face in &self[pair].faces {
        faces.insert(face);
      }
    }
    faces
  }
}

impl Index<PairId> for PairHash {
  type Output = Pair;
  fn index(&self, id: PairId) -> &Pair {
    &self.pairs[id as usize]
  }
}

impl IndexMut<PairId> for PairHash {
  fn index_mut(&mut self, id: PairId) -> &mut Pair {
    &mut self.pairs[id as usize]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn add_pair_is_canonical_and_deduplicates() {
    let mut hash = PairHash::with_expected_pairs(8).unwrap();
    let (p, created) = hash.add_pair(5, 2);
    assert!(created);
    assert_eq!((hash[p].v1, hash[p].v2), (2, 5));

    let (q, created) = hash.add_pair(2, 5);
    assert!(!created);
    assert_eq!(p, q);
    assert_eq!(hash.len(), 1);
  }

  #[test]
  fn delete_recycles_slots() {
    let mut hash = PairHash::with_expected_pairs(8).unwrap();
    let (p, _) = hash.add_pair(0, 1);
    hash.delete(p);
    assert_eq!(hash.len(), 0);
    assert_eq!(hash.find(0, 1), None);

    let (q, created) = hash.add_pair(3, 4);
    assert!(created);
    assert_eq!(q, p); // pooled slot reused
  }

  #[test]
  fn rekey_after_vertex_replacement() {
    let mut hash = PairHash::with_expected_pairs(8).unwrap();
    let (p, _) = hash.add_pair(1, 9);
    hash.remove(p);
    hash[p].replace_vertex(9, 0);
    hash.insert(p);
    assert_eq!(hash.find(0, 1), Some(p));
    assert_eq!(hash.find(1, 9), None);
  }

  #[test]
  fn common_vertex_of_adjacent_pairs() {
    let mut hash = PairHash::with_expected_pairs(8).unwrap();
    let (ab, _) = hash.add_pair(0, 1);
    let (bc, _) = hash.add_pair(1, 2);
    assert_eq!(hash.common_vertex(ab, bc), 1);
  }
}
