use smallvec::SmallVec;

/// unordered set with inline storage for the first `N` elements and a heap
/// spill beyond that. adjacency lists here are tiny (a vertex touches a
/// handful of pairs, a pair at most two faces), so linear membership wins
/// over hashing.
#[derive(Debug, Clone)]
pub struct SmallSet<T, const N: usize> {
  items: SmallVec<[T; N]>,
}

impl<T, const N: usize> Default for SmallSet<T, N> {
  fn default() -> Self {
    Self {
      items: SmallVec::new(),
    }
  }
}

impl<T: Copy + PartialEq, const N: usize> SmallSet<T, N> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn contains(&self, value: T) -> bool {
    self.items.contains(&value)
  }

  /// returns false when the value was already present
  pub fn insert(&mut self, value: T) -> bool {
    if self.contains(value) {
      return false;
    }
    self.items.push(value);
    true
  }

  /// returns false when the value was absent. order is not preserved.
  pub fn remove(&mut self, value: T) -> bool {
    if let Some(i) = self.items.iter().position(|v| *v == value) {
      self.items.swap_remove(i);
      true
    } else {
      false
    }
  }

  pub fn clear(&mut self) {
    self.items.clear();
  }

  pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
    self.items.iter().copied()
  }

  pub fn as_slice(&self) -> &[T] {
    &self.items
  }
}

impl<'a, T: Copy + PartialEq, const N: usize> IntoIterator for &'a SmallSet<T, N> {
  type Item = T;
  type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;
  fn into_iter(self) -> Self::IntoIter {
    self.items.iter().copied()
  }
}

pub fn set_difference<T: Copy + PartialEq, const N: usize>(
  a: &SmallSet<T, N>,
  b: &SmallSet<T, N>,
) -> SmallSet<T, N> {
  let mut out = SmallSet::new();
  for v in a {
    if !b.contains(v) {
      out.insert(v);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_deduplicates() {
    let mut s = SmallSet::<u32, 4>::new();
    assert!(s.insert(3));
    assert!(s.insert(7));
    assert!(!s.insert(3));
    assert_eq!(s.len(), 2);
    assert!(s.contains(7));
  }

  #[test]
  fn remove_swaps() {
    let mut s = SmallSet::<u32, 2>::new();
    for v in 0..6 {
      s.insert(v); // spills to the heap
    }
    assert!(s.remove(0));
    assert!(!s.remove(0));
    assert_eq!(s.len(), 5);
    assert!(!s.contains(0));
  }

  #[test]
  fn difference() {
    let mut a = SmallSet::<u32, 4>::new();
    let mut b = SmallSet::<u32, 4>::new();
    for v in [1, 2, 3] {
      a.insert(v);
    }
    for v in [3, 4] {
      b.insert(v);
    }

    let d = set_difference(&a, &b);
    assert_eq!(d.len(), 2);
    assert!(d.contains(1) && d.contains(2) && !d.contains(3));
  }
}
