use std::ops::{Add, AddAssign};

use crate::*;

/// symmetric 4x4 error matrix stored as its ten distinct coefficients:
///
/// ```txt
/// [a00, a10, a20, b0]
/// [   , a11, a21, b1]
/// [   ,    , a22, b2]
/// [   ,    ,    , c ]
/// ```
///
/// built as the outer product of a plane's coefficients, so that
/// `error(p)` is the squared distance from `p` to the plane; summing
/// quadrics accumulates squared distances to a whole set of planes
/// (Garland-Heckbert).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quadric {
  a00: f32,
  a11: f32,
  a22: f32,
  a10: f32,
  a20: f32,
  a21: f32,
  b0: f32,
  b1: f32,
  b2: f32,
  c: f32,
}

impl Add for Quadric {
  type Output = Self;
  fn add(self, other: Self) -> Self {
    let mut r = self;
    r += other;
    r
  }
}

impl AddAssign for Quadric {
  fn add_assign(&mut self, other: Self) {
    self.a00 += other.a00;
    self.a11 += other.a11;
    self.a22 += other.a22;
    self.a10 += other.a10;
    self.a20 += other.a20;
    self.a21 += other.a21;
    self.b0 += other.b0;
    self.b1 += other.b1;
    self.b2 += other.b2;
    self.c += other.c;
  }
}

impl Quadric {
  pub fn from_plane(plane: Plane, weight: f32) -> Self {
    let Vec3 { x: a, y: b, z: c } = plane.normal;
    let d = plane.d;

    let aw = a * weight;
    let bw = b * weight;
    let cw = c * weight;
    let dw = d * weight;

    Self {
      a00: a * aw,
      a11: b * bw,
      a22: c * cw,
      a10: a * bw,
      a20: a * cw,
      a21: b * cw,
      b0: a * dw,
      b1: b * dw,
      b2: c * dw,
      c: d * dw,
    }
  }

  /// penalty plane for the edge `p0-p1` of a face whose remaining corner
  /// is `p2`: contains the edge, lies perpendicular to the face (its
  /// normal is the in-face direction towards `p2`). contracting away from
  /// the edge then costs proportionally to the drift off the boundary.
  pub fn from_triangle_edge(p0: Vec3, p1: Vec3, p2: Vec3, weight: f32) -> Option<Self> {
    let p10 = p1 - p0;
    let length_sq = p10.length2();

    // projection of p2-p0 onto the unnormalized edge; scale p20 by the
    // squared length instead of normalizing p10 twice
    let p20 = p2 - p0;
    let p20p = p20.dot(p10);

    let mut normal = p20 * length_sq - p10 * p20p;
    if normal.normalize_self() == 0. {
      return None;
    }

    let d = -normal.dot(p0);
    Some(Self::from_plane(Plane::new(normal, d), weight))
  }

  /// evaluate `|p^T Q p|`
  pub fn error(&self, p: Vec3) -> f32 {
    let Vec3 { x, y, z } = p;
    let r = self.a00 * x * x
      + self.a11 * y * y
      + self.a22 * z * z
      + 2. * (self.a10 * x * y + self.a20 * x * z + self.a21 * y * z)
      + 2. * (self.b0 * x + self.b1 * y + self.b2 * z)
      + self.c;
    r.abs()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plane_quadric_measures_squared_distance() {
    let plane = Plane::new(vec3(0., 0., 1.), -1.); // z = 1
    let q = Quadric::from_plane(plane, 1.);
    assert!(q.error(vec3(3., -2., 1.)) < 1e-6);
    assert!((q.error(vec3(0., 0., 3.)) - 4.).abs() < 1e-5);
  }

  #[test]
  fn summed_quadrics_accumulate() {
    let qx = Quadric::from_plane(Plane::new(vec3(1., 0., 0.), 0.), 1.);
    let qz = Quadric::from_plane(Plane::new(vec3(0., 0., 1.), 0.), 1.);
    let q = qx + qz;
    // distance^2 to x=0 plus distance^2 to z=0
    assert!((q.error(vec3(2., 5., 3.)) - 13.).abs() < 1e-5);
  }

  #[test]
  fn edge_quadric_penalizes_leaving_the_edge() {
    // edge on the x axis, face towards +y
    let q =
      Quadric::from_triangle_edge(vec3(0., 0., 0.), vec3(2., 0., 0.), vec3(1., 1., 0.), 1.)
        .unwrap();
    // points on the edge line are free
    assert!(q.error(vec3(5., 0., 0.)) < 1e-6);
    // drifting into the face costs its squared distance
    assert!((q.error(vec3(1., 3., 0.)) - 9.).abs() < 1e-4);
    // perpendicular to the face plane: moving in z is also free
    assert!(q.error(vec3(1., 0., 4.)) < 1e-6);
  }

  #[test]
  fn degenerate_edge_has_no_quadric() {
    let p = vec3(1., 1., 1.);
    assert!(Quadric::from_triangle_edge(p, p * 2., p * 3., 1.).is_none());
  }
}
