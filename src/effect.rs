#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  FetchIndex {
    generation: u64,
  },
  FetchStory {
    generation: u64,
    id: u64,
    slot: usize,
  },
}
