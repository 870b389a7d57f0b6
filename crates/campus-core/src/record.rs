//! The in-memory [`RecordStore`]: a fetched collection plus its filtered view.
//!
//! The raw collection is only ever replaced wholesale (after a fetch) or
//! patched by id (after a successful mutation). The filtered view is derived
//! from the raw collection and the current [`Criteria`] and is recomputed
//! after every change to either; it is never edited on its own.

/// A record with a server-assigned id, unique within its collection.
pub trait Record: Clone {
  fn id(&self) -> u32;
}

/// A set of filter predicates over records of type `T`.
///
/// A criterion whose value is empty is inactive and matches everything, so
/// [`Criteria::matches`] is a logical AND over the active criteria only.
pub trait Criteria<T>: Default {
  fn matches(&self, item: &T) -> bool;

  /// Whether any criterion currently has a value.
  fn is_active(&self) -> bool;
}

/// A fetched collection of `T` and its view filtered by `C`.
#[derive(Debug, Clone)]
pub struct RecordStore<T, C> {
  raw:      Vec<T>,
  filtered: Vec<T>,
  criteria: C,
}

impl<T, C> Default for RecordStore<T, C>
where
  T: Record,
  C: Criteria<T>,
{
  fn default() -> Self { Self::new() }
}

impl<T, C> RecordStore<T, C>
where
  T: Record,
  C: Criteria<T>,
{
  /// An empty store with no active criteria.
  pub fn new() -> Self {
    Self {
      raw:      Vec::new(),
      filtered: Vec::new(),
      criteria: C::default(),
    }
  }

  pub fn raw(&self) -> &[T] { &self.raw }

  pub fn filtered(&self) -> &[T] { &self.filtered }

  pub fn criteria(&self) -> &C { &self.criteria }

  pub fn has_active_filters(&self) -> bool { self.criteria.is_active() }

  pub fn get(&self, id: u32) -> Option<&T> {
    self.raw.iter().find(|r| r.id() == id)
  }

  // ── Raw collection ────────────────────────────────────────────────────

  /// Replace the whole collection, e.g. after a successful list fetch.
  pub fn replace_all(&mut self, items: Vec<T>) {
    self.raw = items;
    self.apply_filters();
  }

  /// Append a newly created record.
  pub fn push(&mut self, item: T) {
    self.raw.push(item);
    self.apply_filters();
  }

  /// Replace the record with the same id as `item`. Returns `false` (and
  /// changes nothing) if no such record exists.
  pub fn replace(&mut self, item: T) -> bool {
    let Some(slot) = self.raw.iter_mut().find(|r| r.id() == item.id()) else {
      return false;
    };
    *slot = item;
    self.apply_filters();
    true
  }

  /// Remove the record with `id`, returning it if it was present.
  pub fn remove(&mut self, id: u32) -> Option<T> {
    let index = self.raw.iter().position(|r| r.id() == id)?;
    let removed = self.raw.remove(index);
    self.apply_filters();
    Some(removed)
  }

  // ── Filtering ─────────────────────────────────────────────────────────

  /// Mutate the criteria and recompute the filtered view.
  pub fn update_criteria(&mut self, f: impl FnOnce(&mut C)) {
    f(&mut self.criteria);
    self.apply_filters();
  }

  /// Recompute `filtered` from `raw` and the current criteria.
  pub fn apply_filters(&mut self) {
    self.filtered = self
      .raw
      .iter()
      .filter(|item| self.criteria.matches(item))
      .cloned()
      .collect();
  }

  /// Reset every criterion and show the whole collection.
  pub fn clear_filters(&mut self) {
    self.criteria = C::default();
    self.filtered = self.raw.clone();
  }
}
