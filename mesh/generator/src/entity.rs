use bitflags::bitflags;

use crate::*;

pub type VertexId = u32;
pub type FaceId = u32;
pub type PairId = u32;

/// scratch face-set type: the faces around one vertex
pub type FaceSet = SmallSet<FaceId, 16>;

bitflags! {
  #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
  pub struct VertexFlags: u8 {
    /// sits on an open edge or a material seam
    const BOUNDARY = 1 << 0;
    /// sits on a texture-coordinate or color discontinuity
    const TEXTURE_BOUNDARY = 1 << 1;
    /// protected: never the removed side of a contraction
    const BASE = 1 << 2;
    /// referenced by at least one face or candidate pair; vertices that
    /// never were are dropped from the reordered output
    const CONNECTED = 1 << 3;
  }
}

bitflags! {
  #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
  pub struct PairFlags: u8 {
    /// the two incident faces disagree on material id
    const MATERIAL_BOUNDARY = 1 << 0;
    /// the two incident faces disagree on texture/color values
    const UV_BOUNDARY = 1 << 1;
  }
}

#[derive(Debug, Clone, Default)]
pub struct Vertex {
  pub position: Vec3,
  pub quadric: Quadric,
  pub pairs: SmallSet<PairId, 8>,
  pub flags: VertexFlags,
}

impl Vertex {
  pub fn is_base(&self) -> bool {
    self.flags.contains(VertexFlags::BASE)
  }

  pub fn is_any_boundary(&self) -> bool {
    self
      .flags
      .intersects(VertexFlags::BOUNDARY | VertexFlags::TEXTURE_BOUNDARY)
  }
}

/// one live triangle. corners are not stored: each is recovered as the
/// vertex its two adjacent pairs share, so vertex replacement during a
/// contraction only ever touches pairs.
#[derive(Debug, Clone)]
pub struct Face {
  /// pair 0 joins corners (a, b), pair 1 (b, c), pair 2 (c, a)
  pub pairs: [PairId; 3],
  /// index into the host mesh's face arrays
  pub index: u32,
  /// plane and quadric are fixed for the whole run: positions never move,
  /// so they are computed once when the face is created
  pub plane: Plane,
  pub quadric: Quadric,
}

pub const INVALID_HEAP_HANDLE: u32 = u32::MAX;

/// a candidate contraction between two distinct vertices, topological
/// (shares faces) or virtual (spatially close, no faces).
#[derive(Debug, Clone)]
pub struct Pair {
  /// canonical order: v1 < v2
  pub v1: VertexId,
  pub v2: VertexId,
  pub faces: SmallSet<FaceId, 2>,
  /// direction bit: true keeps v2 and removes v1
  pub keep_second: bool,
  pub flags: PairFlags,
  /// the cost lives in the heap entry, addressed through this handle
  pub heap_handle: u32,
}

impl Pair {
  pub fn new(v1: VertexId, v2: VertexId) -> Self {
    debug_assert!(v1 < v2);
    Self {
      v1,
      v2,
      faces: SmallSet::new(),
      keep_second: false,
      flags: PairFlags::default(),
      heap_handle: INVALID_HEAP_HANDLE,
    }
  }

  pub fn other_vertex(&self, v: VertexId) -> VertexId {
    debug_assert!(v == self.v1 || v == self.v2);
    if v == self.v1 {
      self.v2
    } else {
      self.v1
    }
  }

  pub fn has_vertex(&self, v: VertexId) -> bool {
    v == self.v1 || v == self.v2
  }

  pub fn kept_vertex(&self) -> VertexId {
    if self.keep_second {
      self.v2
    } else {
      self.v1
    }
  }

  pub fn removed_vertex(&self) -> VertexId {
    if self.keep_second {
      self.v1
    } else {
      self.v2
    }
  }

  /// re-point the `from` endpoint at `to`, restoring canonical order.
  /// the caller re-keys the pair in the hash around this.
  pub fn replace_vertex(&mut self, from: VertexId, to: VertexId) {
    debug_assert!(self.has_vertex(from) && !self.has_vertex(to));
    let kept = self.kept_vertex();
    if self.v1 == from {
      self.v1 = to;
    } else {
      self.v2 = to;
    }
    if self.v1 > self.v2 {
      std::mem::swap(&mut self.v1, &mut self.v2);
    }
    // keep the direction bit pointing at the same survivor
    self.keep_second = self.v2 == if kept == from { to } else { kept };
  }

  /// structural boundary: an open edge, or a flagged discontinuity
  pub fn is_boundary(&self) -> bool {
    self.faces.len() == 1 || !self.flags.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replace_vertex_keeps_canonical_order_and_direction() {
    let mut p = Pair::new(3, 7);
    p.keep_second = true; // keep 7, remove 3
    p.replace_vertex(3, 10);
    assert_eq!((p.v1, p.v2), (7, 10));
    assert_eq!(p.kept_vertex(), 7);
    assert_eq!(p.removed_vertex(), 10);

    let mut q = Pair::new(3, 7);
    q.keep_second = false; // keep 3
    q.replace_vertex(7, 1);
    assert_eq!((q.v1, q.v2), (1, 3));
    assert_eq!(q.kept_vertex(), 3);
  }
}
