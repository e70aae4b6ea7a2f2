use crate::*;

/// plane in implicit form: `normal · p + d = 0`, `normal` is unit length
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
  pub normal: Vec3,
  pub d: f32,
}

impl Plane {
  pub fn new(normal: Vec3, d: f32) -> Self {
    Self { normal, d }
  }

  /// plane through the ccw triangle `(p0, p1, p2)`, together with the
  /// triangle's area. returns `None` when the corners are collinear or
  /// coincident (the cross product vanishes).
  pub fn from_triangle(p0: Vec3, p1: Vec3, p2: Vec3) -> Option<(Self, f32)> {
    let mut normal = (p1 - p0).cross(p2 - p0);
    let double_area = normal.normalize_self();
    if double_area == 0. {
      return None;
    }
    let d = -normal.dot(p0);
    Some((Self { normal, d }, double_area * 0.5))
  }

  #[inline]
  pub fn distance_to(&self, p: Vec3) -> f32 {
    self.normal.dot(p) + self.d
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn triangle_plane() {
    let (plane, area) =
      Plane::from_triangle(vec3(0., 0., 1.), vec3(1., 0., 1.), vec3(0., 1., 1.)).unwrap();
    assert_eq!(plane.normal, vec3(0., 0., 1.));
    assert_eq!(area, 0.5);
    assert!((plane.distance_to(vec3(5., 5., 3.)) - 2.).abs() < 1e-6);
  }

  #[test]
  fn degenerate_triangle_has_no_plane() {
    let p = vec3(1., 2., 3.);
    assert!(Plane::from_triangle(p, p, vec3(4., 5., 6.)).is_none());
    assert!(Plane::from_triangle(p, p * 2., p * 3.).is_none());
  }
}
