use super::*;

/// Wire shape of `GET /item/{id}.json`.
///
/// Every field a story needs is mandatory here, so a document missing one
/// fails to deserialize as a whole.
#[derive(Debug, Deserialize)]
pub(crate) struct Item {
  pub(crate) by: String,
  pub(crate) id: u64,
  pub(crate) kids: Option<Vec<u64>>,
  pub(crate) score: u64,
  pub(crate) time: i64,
  pub(crate) title: String,
  pub(crate) url: Option<String>,
}
