use super::*;

/// Changes to the rendered list, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notification {
  Completed {
    failed: usize,
    loaded: usize,
  },
  Failed { error: FetchError },
  /// Story `id` now occupies `row`; rows at and after it moved down by one.
  Inserted { id: u64, row: usize },
  Reset,
}
