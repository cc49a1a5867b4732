use super::*;

/// The top stories list: one window of the index, fetched piecemeal.
///
/// `Feed` never performs I/O. `refresh` and `handle_event` return the fetches
/// to start and the row changes to report, and every event is tagged with the
/// generation of the refresh that asked for it so results from an abandoned
/// refresh never reach the list.
pub(crate) struct Feed {
  generation: u64,
  offset: usize,
  outstanding: usize,
  page_size: usize,
  phase: Phase,
  slots: Vec<Slot>,
}

impl Feed {
  pub(crate) fn failed_count(&self) -> usize {
    self
      .slots
      .iter()
      .filter(|slot| matches!(slot, Slot::Failed(_)))
      .count()
  }

  pub(crate) fn handle_event(&mut self, event: Event) -> Transition {
    match event {
      Event::Index { generation, result } => {
        self.handle_index(generation, result)
      }
      Event::Story {
        generation,
        slot,
        story,
      } => self.handle_story(generation, slot, story),
    }
  }

  fn handle_index(
    &mut self,
    generation: u64,
    result: Result<Vec<u64>, FetchError>,
  ) -> Transition {
    if generation != self.generation || self.phase != Phase::LoadingIndex {
      tracing::trace!(generation, "dropping stale index");
      return Transition::default();
    }

    let ids = match result {
      Ok(ids) => ids,
      Err(error) => {
        tracing::warn!(%error, "could not load top stories");

        self.phase = Phase::Failed(error.clone());

        return Transition {
          effects: Vec::new(),
          notifications: vec![Notification::Failed { error }],
        };
      }
    };

    let window = Self::window(&ids, self.offset, self.page_size);

    tracing::info!(
      generation,
      total = ids.len(),
      window = window.len(),
      "loaded top stories index"
    );

    if window.is_empty() {
      self.phase = Phase::Ready;

      return Transition {
        effects: Vec::new(),
        notifications: vec![Notification::Completed {
          failed: 0,
          loaded: 0,
        }],
      };
    }

    self.slots = window.iter().copied().map(Slot::Pending).collect();
    self.outstanding = window.len();
    self.phase = Phase::LoadingDetails;

    Transition {
      effects: window
        .iter()
        .enumerate()
        .map(|(slot, &id)| Effect::FetchStory {
          generation,
          id,
          slot,
        })
        .collect(),
      notifications: Vec::new(),
    }
  }

  fn handle_story(
    &mut self,
    generation: u64,
    slot: usize,
    story: Option<Story>,
  ) -> Transition {
    if generation != self.generation || self.phase != Phase::LoadingDetails {
      tracing::trace!(generation, slot, "dropping stale story");
      return Transition::default();
    }

    let Some(id) = self
      .slots
      .get(slot)
      .filter(|entry| matches!(entry, Slot::Pending(_)))
      .map(Slot::id)
    else {
      return Transition::default();
    };

    let mut notifications = Vec::new();

    match story {
      Some(story) => {
        let row = self.slots[..slot]
          .iter()
          .filter(|entry| entry.story().is_some())
          .count();

        self.slots[slot] = Slot::Resolved(story);

        Slot::renumber(&mut self.slots);

        notifications.push(Notification::Inserted { id, row });
      }
      None => {
        tracing::debug!(id, slot, "story unavailable");
        self.slots[slot] = Slot::Failed(id);
      }
    }

    self.outstanding = self.outstanding.saturating_sub(1);

    if self.outstanding == 0 {
      self.phase = Phase::Ready;

      let (loaded, failed) = (self.row_count(), self.failed_count());

      tracing::info!(generation, loaded, failed, "refresh complete");

      notifications.push(Notification::Completed { failed, loaded });
    }

    Transition {
      effects: Vec::new(),
      notifications,
    }
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.phase.is_loading()
  }

  pub(crate) fn new(page_size: usize, offset: usize) -> Self {
    Self {
      generation: 0,
      offset,
      outstanding: 0,
      page_size,
      phase: Phase::Idle,
      slots: Vec::new(),
    }
  }

  pub(crate) fn phase(&self) -> &Phase {
    &self.phase
  }

  /// Settled stories and the size of the window being loaded.
  pub(crate) fn progress(&self) -> (usize, usize) {
    (self.slots.len() - self.outstanding, self.slots.len())
  }

  /// Starts over. Fetches from earlier refreshes keep running, but their
  /// results are ignored.
  pub(crate) fn refresh(&mut self) -> Transition {
    self.generation = self.generation.wrapping_add(1);
    self.outstanding = 0;
    self.phase = Phase::LoadingIndex;
    self.slots.clear();

    tracing::info!(generation = self.generation, "refreshing top stories");

    Transition {
      effects: vec![Effect::FetchIndex {
        generation: self.generation,
      }],
      notifications: vec![Notification::Reset],
    }
  }

  pub(crate) fn row_count(&self) -> usize {
    self.rows().count()
  }

  pub(crate) fn rows(&self) -> impl Iterator<Item = &Story> {
    self.slots.iter().filter_map(Slot::story)
  }

  #[cfg(test)]
  pub(crate) fn slots(&self) -> &[Slot] {
    &self.slots
  }

  pub(crate) fn story(&self, row: usize) -> Option<&Story> {
    self.rows().nth(row)
  }

  /// `[offset, offset + size)` of `ids`, cut short at the end of the index.
  pub(crate) fn window(ids: &[u64], offset: usize, size: usize) -> &[u64] {
    let start = offset.min(ids.len());
    let end = offset.saturating_add(size).min(ids.len());

    &ids[start..end]
  }
}
