use std::{
  fmt,
  ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

macro_rules! impl_vector_ops {
  ($ty: ident, $($field: ident),+) => {
    impl Add for $ty {
      type Output = Self;
      #[inline]
      fn add(self, rhs: Self) -> Self {
        Self { $($field: self.$field + rhs.$field),+ }
      }
    }
    impl Sub for $ty {
      type Output = Self;
      #[inline]
      fn sub(self, rhs: Self) -> Self {
        Self { $($field: self.$field - rhs.$field),+ }
      }
    }
    impl Mul<f32> for $ty {
      type Output = Self;
      #[inline]
      fn mul(self, rhs: f32) -> Self {
        Self { $($field: self.$field * rhs),+ }
      }
    }
    impl Div<f32> for $ty {
      type Output = Self;
      #[inline]
      fn div(self, rhs: f32) -> Self {
        Self { $($field: self.$field / rhs),+ }
      }
    }
    impl Neg for $ty {
      type Output = Self;
      #[inline]
      fn neg(self) -> Self {
        Self { $($field: -self.$field),+ }
      }
    }
    impl AddAssign for $ty {
      #[inline]
      fn add_assign(&mut self, rhs: Self) {
        $(self.$field += rhs.$field;)+
      }
    }
    impl SubAssign for $ty {
      #[inline]
      fn sub_assign(&mut self, rhs: Self) {
        $(self.$field -= rhs.$field;)+
      }
    }
    impl MulAssign<f32> for $ty {
      #[inline]
      fn mul_assign(&mut self, rhs: f32) {
        $(self.$field *= rhs;)+
      }
    }
    impl DivAssign<f32> for $ty {
      #[inline]
      fn div_assign(&mut self, rhs: f32) {
        $(self.$field /= rhs;)+
      }
    }

    unsafe impl bytemuck::Zeroable for $ty {}
    unsafe impl bytemuck::Pod for $ty {}

    impl $ty {
      #[inline]
      pub fn dot(self, rhs: Self) -> f32 {
        let mut r = 0.;
        $(r += self.$field * rhs.$field;)+
        r
      }

      #[inline]
      pub fn length2(self) -> f32 {
        self.dot(self)
      }

      #[inline]
      pub fn length(self) -> f32 {
        self.length2().sqrt()
      }

      #[inline]
      pub fn distance2(self, rhs: Self) -> f32 {
        (self - rhs).length2()
      }

      #[inline]
      pub fn normalize(self) -> Self {
        let mut r = self;
        r.normalize_self();
        r
      }

      /// normalize in place, returning the length the vector had before
      #[inline]
      pub fn normalize_self(&mut self) -> f32 {
        let length = self.length();
        if length != 0. {
          *self /= length;
        }
        length
      }
    }
  };
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
  pub x: f32,
  pub y: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
  pub x: f32,
  pub y: f32,
  pub z: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
  pub x: f32,
  pub y: f32,
  pub z: f32,
  pub w: f32,
}

impl_vector_ops!(Vec2, x, y);
impl_vector_ops!(Vec3, x, y, z);
impl_vector_ops!(Vec4, x, y, z, w);

pub fn vec2(x: f32, y: f32) -> Vec2 {
  Vec2::new(x, y)
}

pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
  Vec3::new(x, y, z)
}

pub fn vec4(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
  Vec4::new(x, y, z, w)
}

impl Vec2 {
  #[inline]
  pub fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  #[inline]
  pub fn splat(v: f32) -> Self {
    Self { x: v, y: v }
  }
}

impl Vec3 {
  #[inline]
  pub fn new(x: f32, y: f32, z: f32) -> Self {
    Self { x, y, z }
  }

  #[inline]
  pub fn splat(v: f32) -> Self {
    Self { x: v, y: v, z: v }
  }

  #[inline]
  pub fn cross(self, rhs: Self) -> Self {
    Self {
      x: self.y * rhs.z - self.z * rhs.y,
      y: self.z * rhs.x - self.x * rhs.z,
      z: self.x * rhs.y - self.y * rhs.x,
    }
  }

  #[inline]
  pub fn min_by_component(self, rhs: Self) -> Self {
    Self {
      x: self.x.min(rhs.x),
      y: self.y.min(rhs.y),
      z: self.z.min(rhs.z),
    }
  }

  #[inline]
  pub fn max_by_component(self, rhs: Self) -> Self {
    Self {
      x: self.x.max(rhs.x),
      y: self.y.max(rhs.y),
      z: self.z.max(rhs.z),
    }
  }
}

impl Vec4 {
  #[inline]
  pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
    Self { x, y, z, w }
  }

  #[inline]
  pub fn splat(v: f32) -> Self {
    Self {
      x: v,
      y: v,
      z: v,
      w: v,
    }
  }
}

impl From<[f32; 2]> for Vec2 {
  fn from(v: [f32; 2]) -> Self {
    Self { x: v[0], y: v[1] }
  }
}

impl From<[f32; 3]> for Vec3 {
  fn from(v: [f32; 3]) -> Self {
    Self {
      x: v[0],
      y: v[1],
      z: v[2],
    }
  }
}

impl From<[f32; 4]> for Vec4 {
  fn from(v: [f32; 4]) -> Self {
    Self {
      x: v[0],
      y: v[1],
      z: v[2],
      w: v[3],
    }
  }
}

impl fmt::Display for Vec3 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cross_is_orthogonal() {
    let a = vec3(1., 2., 3.);
    let b = vec3(-2., 0.5, 4.);
    let c = a.cross(b);
    assert!(c.dot(a).abs() < 1e-5);
    assert!(c.dot(b).abs() < 1e-5);
  }

  #[test]
  fn normalize_self_returns_previous_length() {
    let mut v = vec3(3., 0., 4.);
    let len = v.normalize_self();
    assert_eq!(len, 5.);
    assert!((v.length() - 1.).abs() < 1e-6);

    let mut zero = Vec3::default();
    assert_eq!(zero.normalize_self(), 0.);
    assert_eq!(zero, Vec3::default());
  }
}
