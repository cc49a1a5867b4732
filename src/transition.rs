use super::*;

/// What the feed wants done after a state change: fetches to start and list
/// changes to report.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Transition {
  pub(crate) effects: Vec<Effect>,
  pub(crate) notifications: Vec<Notification>,
}
