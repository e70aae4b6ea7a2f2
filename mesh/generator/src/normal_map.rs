use std::f32::consts::PI;

use smallvec::SmallVec;

use crate::*;

/// nearest-neighbor lookup over the original normal pool, bucketed by
/// polar coordinates. the recorder snaps every averaged smoothing-group
/// normal back to a pre-existing normal, so replay never needs normals
/// that were not in the input.
pub struct NormalMap {
  normals: Vec<Vec3>,
  bins: FastHashMap<(i32, i32), SmallVec<[u32; 4]>>,
  theta_bins: i32,
  phi_bins: i32,
}

impl NormalMap {
  pub fn new(normals: &[Vec3]) -> Self {
    // enough bins that a typical bin holds a handful of normals
    let bins_per_axis = ((normals.len() as f32).sqrt() as i32).clamp(4, 64);
    let mut map = Self {
      normals: normals.to_vec(),
      bins: FastHashMap::default(),
      theta_bins: bins_per_axis,
      phi_bins: bins_per_axis * 2,
    };
    for (i, n) in normals.iter().enumerate() {
      let key = map.bin_of(*n);
      map.bins.entry(key).or_default().push(i as u32);
    }
    map
  }

  fn bin_of(&self, n: Vec3) -> (i32, i32) {
    let theta = n.z.clamp(-1., 1.).acos(); // [0, pi]
    let phi = n.y.atan2(n.x); // [-pi, pi]
    let t = ((theta / PI) * self.theta_bins as f32) as i32;
    let p = (((phi + PI) / (2. * PI)) * self.phi_bins as f32) as i32;
    (t.min(self.theta_bins - 1), p.min(self.phi_bins - 1))
  }

  /// index and squared distance of the stored normal closest to `n`.
  /// scans the containing bin and an expanding neighbor ring; theta
  /// clamps at the poles, phi wraps.
  pub fn nearest(&self, n: Vec3) -> Option<(u32, f32)> {
    if self.normals.is_empty() {
      return None;
    }
    let (t0, p0) = self.bin_of(n);

    let mut best: Option<(u32, f32)> = None;
    let mut found_at: Option<i32> = None;
    for radius in 0..=self.theta_bins {
      for dt in -radius..=radius {
        let t = t0 + dt;
        if t < 0 || t >= self.theta_bins {
          continue;
        }
        for dp in -radius..=radius {
          // only the ring at this radius; inner cells were already seen
          if dt.abs() != radius && dp.abs() != radius {
            continue;
          }
          let p = (p0 + dp).rem_euclid(self.phi_bins);
          let Some(bucket) = self.bins.get(&(t, p)) else {
            continue;
          };
          for i in bucket {
            let d = self.normals[*i as usize].distance2(n);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
              best = Some((*i, d));
            }
          }
        }
      }
      // one extra ring after the first hit catches close normals that
      // straddle a bin border
      if best.is_some() && found_at.is_none() {
        found_at = Some(radius);
      }
      if found_at.map(|r| radius > r).unwrap_or(false) {
        break;
      }
    }
    best
  }
}
