use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
  Failed(u64),
  Pending(u64),
  Resolved(Story),
}

impl Slot {
  pub(crate) fn id(&self) -> u64 {
    match self {
      Self::Failed(id) | Self::Pending(id) => *id,
      Self::Resolved(story) => story.id,
    }
  }

  pub(crate) fn renumber(slots: &mut [Slot]) {
    for (row, story) in slots.iter_mut().filter_map(Slot::story_mut).enumerate()
    {
      story.rank = row + 1;
    }
  }

  pub(crate) fn story(&self) -> Option<&Story> {
    match self {
      Self::Resolved(story) => Some(story),
      Self::Failed(_) | Self::Pending(_) => None,
    }
  }

  fn story_mut(&mut self) -> Option<&mut Story> {
    match self {
      Self::Resolved(story) => Some(story),
      Self::Failed(_) | Self::Pending(_) => None,
    }
  }
}
