use super::*;

#[derive(Debug)]
pub(crate) enum Event {
  Index {
    generation: u64,
    result: Result<Vec<u64>, FetchError>,
  },
  Story {
    generation: u64,
    slot: usize,
    story: Option<Story>,
  },
}
