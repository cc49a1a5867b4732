use super::*;

/// A status line message that gives way to the regular status after a few
/// seconds.
#[derive(Clone, Debug)]
pub(crate) struct TransientMessage {
  expires_at: Instant,
  text: String,
}

impl TransientMessage {
  const LIFETIME: Duration = Duration::from_secs(3);

  pub(crate) fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }

  pub(crate) fn new(text: String) -> Self {
    Self {
      expires_at: Instant::now() + Self::LIFETIME,
      text,
    }
  }

  pub(crate) fn text(&self) -> &str {
    &self.text
  }
}
