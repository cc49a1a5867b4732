/// Selection and scroll position over the feed's rows.
///
/// The view only knows how many rows exist, and learns about new ones through
/// insert notifications, so it can keep the selected story selected while
/// rows land above it.
#[derive(Debug, Default)]
pub(crate) struct ListView {
  len: usize,
  offset: usize,
  selected: usize,
}

impl ListView {
  pub(crate) fn insert(&mut self, row: usize) {
    if self.len > 0 && row <= self.selected {
      self.selected += 1;
    }

    if self.len > 0 && row <= self.offset {
      self.offset += 1;
    }

    self.len += 1;
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub(crate) fn offset(&self) -> usize {
    let selected = self.selected_index().unwrap_or(0);

    if self.is_empty() {
      0
    } else {
      self.offset.min(selected)
    }
  }

  pub(crate) fn page_down(&mut self, page: usize) {
    self.set_selected(self.selected.saturating_add(page));
  }

  pub(crate) fn page_up(&mut self, page: usize) {
    self.set_selected(self.selected.saturating_sub(page));
  }

  pub(crate) fn reset(&mut self) {
    *self = Self::default();
  }

  pub(crate) fn select_last(&mut self) {
    self.set_selected(self.len.saturating_sub(1));
  }

  pub(crate) fn select_next(&mut self) {
    self.set_selected(self.selected.saturating_add(1));
  }

  pub(crate) fn select_previous(&mut self) {
    self.set_selected(self.selected.saturating_sub(1));
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    if self.is_empty() {
      None
    } else {
      Some(self.selected.min(self.len.saturating_sub(1)))
    }
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    if self.is_empty() {
      self.offset = 0;
    } else {
      self.offset = offset.min(self.len.saturating_sub(1));
    }
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    if self.is_empty() {
      self.selected = 0;
    } else {
      self.selected = index.min(self.len.saturating_sub(1));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn with_rows(len: usize) -> ListView {
    let mut view = ListView::default();

    for row in 0..len {
      view.insert(row);
    }

    view
  }

  #[test]
  fn first_insert_selects_first_row() {
    let mut view = ListView::default();

    view.insert(0);

    assert_eq!(view.selected_index(), Some(0));

    view.select_last();
    assert_eq!(view.selected_index(), Some(0));
  }

  #[test]
  fn insert_above_selection_keeps_story_selected() {
    let mut view = with_rows(3);

    view.set_selected(1);
    view.insert(0);

    assert_eq!(view.selected_index(), Some(2));

    view.insert(3);

    assert_eq!(view.selected_index(), Some(2));

    view.select_last();
    assert_eq!(view.selected_index(), Some(4));
  }

  #[test]
  fn insert_above_offset_keeps_viewport() {
    let mut view = with_rows(10);

    view.set_selected(6);
    view.set_offset(4);
    view.insert(2);

    assert_eq!(view.offset(), 5);
    assert_eq!(view.selected_index(), Some(7));
  }

  #[test]
  fn insert_at_offset_keeps_first_visible_story() {
    let mut view = with_rows(10);

    view.set_selected(6);
    view.set_offset(4);
    view.insert(4);

    assert_eq!(view.offset(), 5);
    assert_eq!(view.selected_index(), Some(7));
  }

  #[test]
  fn paging_is_clamped() {
    let mut view = with_rows(10);

    view.page_down(4);
    assert_eq!(view.selected_index(), Some(4));

    view.page_down(40);
    assert_eq!(view.selected_index(), Some(9));

    view.page_up(100);
    assert_eq!(view.selected_index(), Some(0));
  }

  #[test]
  fn reset_clears_rows_and_selection() {
    let mut view = with_rows(4);

    view.select_last();
    view.reset();

    assert!(view.is_empty());
    assert_eq!(view.selected_index(), None);
    assert_eq!(view.offset(), 0);
  }

  #[test]
  fn selected_index_is_none_when_empty() {
    let view = ListView::default();

    assert_eq!(view.selected_index(), None);
  }

  #[test]
  fn selection_and_offset_are_clamped_to_bounds() {
    let mut view = with_rows(3);

    view.set_selected(10);
    assert_eq!(view.selected_index(), Some(2));

    view.set_offset(10);
    assert_eq!(view.offset(), 2);
  }

  #[test]
  fn stepping_moves_one_row() {
    let mut view = with_rows(3);

    view.select_next();
    view.select_next();
    view.select_next();
    assert_eq!(view.selected_index(), Some(2));

    view.select_previous();
    assert_eq!(view.selected_index(), Some(1));
  }
}
