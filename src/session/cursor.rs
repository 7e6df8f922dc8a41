//! Shuffle-without-repeat draw order for one level.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::Level;

/// A permutation of `0..len` consumed front to back, reshuffled when used up.
#[derive(Debug, Clone)]
pub struct ShuffleCursor {
  level: Level,
  order: Vec<usize>,
  position: usize,
}

impl ShuffleCursor {
  pub fn new<R: Rng + ?Sized>(level: Level, len: usize, rng: &mut R) -> Self {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    Self {
      level,
      order,
      position: 0,
    }
  }

  pub fn level(&self) -> Level {
    self.level
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn order(&self) -> &[usize] {
    &self.order
  }

  /// Whether this cursor can keep serving `level` with `len` items
  pub fn fits(&self, level: Level, len: usize) -> bool {
    self.level == level && self.order.len() == len
  }

  /// Next offset into the level's item list, or None when the level is empty.
  pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
    if self.order.is_empty() {
      return None;
    }

    if self.position == self.order.len() {
      self.reshuffle(rng);
    }

    let offset = self.order[self.position];
    self.position += 1;
    Some(offset)
  }

  /// Start a new cycle. Its first draw never repeats the last draw of the old one.
  fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    let last = self.order.last().copied();
    self.order.shuffle(rng);
    self.position = 0;

    let n = self.order.len();
    if n > 1 && self.order.first().copied() == last {
      self.order.swap(0, n - 1);
    }
  }
}
