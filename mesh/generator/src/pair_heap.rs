use crate::*;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
  cost: f32,
  pair: PairId,
  handle: u32,
}

/// binary min-heap over pair costs with stable handles.
///
/// a contraction invalidates the cost of every pair touching either
/// endpoint, so the heap must support arbitrary remove/update in
/// O(log n). each element owns a handle slot holding its current array
/// index; sift swaps keep the slots valid. comparisons are plain `<` with
/// no epsilon; ties resolve in heap-internal order. popping or removing
/// from an empty heap is a caller error, guarded by `len()`.
#[derive(Default)]
pub struct PairHeap {
  entries: Vec<HeapEntry>,
  /// handle -> current index in `entries`
  slots: Vec<u32>,
  free_handles: Vec<u32>,
}

impl PairHeap {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: Vec::with_capacity(capacity),
      slots: Vec::with_capacity(capacity),
      free_handles: Vec::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn insert(&mut self, cost: f32, pair: PairId) -> u32 {
    let handle = match self.free_handles.pop() {
      Some(h) => h,
      None => {
        self.slots.push(0);
        (self.slots.len() - 1) as u32
      }
    };
    let index = self.entries.len();
    self.entries.push(HeapEntry { cost, pair, handle });
    self.slots[handle as usize] = index as u32;
    self.sift_up(index);
    handle
  }

  /// cheapest pair and its cost at insertion time. its handle is dead
  /// afterwards.
  pub fn pop(&mut self) -> Option<(PairId, f32)> {
    if self.entries.is_empty() {
      return None;
    }
    let top = self.entries[0];
    self.free_handles.push(top.handle);
    let last = self.entries.pop().unwrap();
    if !self.entries.is_empty() {
      self.entries[0] = last;
      self.slots[last.handle as usize] = 0;
      self.sift_down(0);
    }
    Some((top.pair, top.cost))
  }

  pub fn peek_cost(&self) -> Option<f32> {
    self.entries.first().map(|e| e.cost)
  }

  pub fn remove(&mut self, handle: u32) {
    let index = self.slots[handle as usize] as usize;
    debug_assert!(index < self.entries.len());
    debug_assert_eq!(self.entries[index].handle, handle);
    self.free_handles.push(handle);

    let last = self.entries.pop().unwrap();
    if index < self.entries.len() {
      self.entries[index] = last;
      self.slots[last.handle as usize] = index as u32;
      self.sift_down(index);
      self.sift_up(self.slots[last.handle as usize] as usize);
    }
  }

  /// local re-heapify after a cost change
  pub fn update(&mut self, handle: u32, cost: f32) {
    let index = self.slots[handle as usize] as usize;
    debug_assert_eq!(self.entries[index].handle, handle);
    self.entries[index].cost = cost;
    self.sift_down(index);
    self.sift_up(self.slots[handle as usize] as usize);
  }

  fn sift_up(&mut self, mut index: usize) {
    while index > 0 {
      let parent = (index - 1) / 2;
      if self.entries[index].cost < self.entries[parent].cost {
        self.swap(index, parent);
        index = parent;
      } else {
        break;
      }
    }
  }

  fn sift_down(&mut self, mut index: usize) {
    loop {
      let left = index * 2 + 1;
      if left >= self.entries.len() {
        break;
      }
      let right = left + 1;
      let mut smallest = left;
      if right < self.entries.len() && self.entries[right].cost < self.entries[left].cost {
        smallest = right;
      }
      if self.entries[smallest].cost < self.entries[index].cost {
        self.swap(index, smallest);
        index = smallest;
      } else {
        break;
      }
    }
  }

  fn swap(&mut self, a: usize, b: usize) {
    self.entries.swap(a, b);
    self.slots[self.entries[a].handle as usize] = a as u32;
    self.slots[self.entries[b].handle as usize] = b as u32;
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;

  #[test]
  fn pops_in_cost_order() {
    let mut heap = PairHeap::default();
    for (i, cost) in [5., 1., 4., 2., 3.].into_iter().enumerate() {
      heap.insert(cost, i as PairId);
    }
    let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|(p, _)| p).collect();
    assert_eq!(order, vec![1, 3, 4, 2, 0]);
  }

  #[test]
  fn remove_by_handle() {
    let mut heap = PairHeap::default();
    let _h0 = heap.insert(1., 0);
    let h1 = heap.insert(2., 1);
    let _h2 = heap.insert(3., 2);
    heap.remove(h1);
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.pop(), Some((0, 1.)));
    assert_eq!(heap.pop(), Some((2, 3.)));
    assert_eq!(heap.pop(), None);
  }

  #[test]
  fn update_moves_both_directions() {
    let mut heap = PairHeap::default();
    let ha = heap.insert(10., 0);
    let hb = heap.insert(20., 1);
    heap.insert(30., 2);

    heap.update(hb, 1.); // up
    heap.update(ha, 40.); // down

    let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|(p, _)| p).collect();
    assert_eq!(order, vec![1, 2, 0]);
  }

  #[test]
  fn randomized_against_model() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut heap = PairHeap::default();
    let mut live: Vec<(u32, f32, PairId)> = Vec::new(); // (handle, cost, pair)

    for pair in 0..500u32 {
      match rng.gen_range(0..4) {
        0 | 1 => {
          let cost = rng.gen_range(0..10_000) as f32;
          let handle = heap.insert(cost, pair);
          live.push((handle, cost, pair));
        }
        2 if !live.is_empty() => {
          let i = rng.gen_range(0..live.len());
          heap.remove(live.swap_remove(i).0);
        }
        3 if !live.is_empty() => {
          let i = rng.gen_range(0..live.len());
          let cost = rng.gen_range(0..10_000) as f32;
          heap.update(live[i].0, cost);
          live[i].1 = cost;
        }
        _ => {}
      }
      assert_eq!(heap.len(), live.len());
    }

    let mut expected: Vec<f32> = live.iter().map(|(_, c, _)| *c).collect();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let drained: Vec<f32> = std::iter::from_fn(|| heap.pop()).map(|(_, c)| c).collect();
    assert_eq!(drained, expected);
  }
}
