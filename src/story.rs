use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Story {
  pub(crate) by: String,
  pub(crate) comment_count: usize,
  pub(crate) id: u64,
  pub(crate) link: Option<Url>,
  pub(crate) posted_at: i64,
  /// 1-based position in the rendered list, 0 until the story is placed.
  pub(crate) rank: usize,
  pub(crate) score: u64,
  pub(crate) title: String,
}

impl From<Item> for Story {
  fn from(item: Item) -> Self {
    Self {
      by: item.by,
      comment_count: item.kids.map_or(0, |kids| kids.len()),
      id: item.id,
      link: item.url.and_then(|url| Url::parse(&url).ok()),
      posted_at: item.time,
      rank: 0,
      score: item.score,
      title: item.title,
    }
  }
}

impl Story {
  pub(crate) fn age(&self, now: i64) -> String {
    format_age(now.saturating_sub(self.posted_at))
  }

  pub(crate) fn display_host(&self) -> Option<String> {
    let host = self.link.as_ref()?.host_str()?;

    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
  }

  pub(crate) fn item_url(&self) -> String {
    format!("{ITEM_PAGE_URL}{}", self.id)
  }

  pub(crate) fn open_url(&self) -> String {
    self
      .link
      .as_ref()
      .map_or_else(|| self.item_url(), ToString::to_string)
  }

  pub(crate) fn resource(base_url: &str, id: u64) -> Resource<Story> {
    Resource::json(format!("{base_url}/item/{id}.json"), |item: Item| {
      Some(Story::from(item))
    })
  }

  pub(crate) fn summary(&self, now: i64) -> String {
    format!(
      "{} • {} • {}",
      format_points(self.score),
      format_comments(self.comment_count),
      self.age(now)
    )
  }

  pub(crate) fn top(base_url: &str) -> Resource<Vec<u64>> {
    Resource::json(format!("{base_url}/topstories.json"), Some)
  }
}
