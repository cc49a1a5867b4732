use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Phase {
  /// The index could not be fetched. Distinct from a `Ready` list with no
  /// rows.
  Failed(FetchError),
  #[default]
  Idle,
  LoadingDetails,
  LoadingIndex,
  Ready,
}

impl Phase {
  pub(crate) fn is_loading(&self) -> bool {
    matches!(self, Self::LoadingDetails | Self::LoadingIndex)
  }
}
