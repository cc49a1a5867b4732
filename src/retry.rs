use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
  pub(crate) backoff: Duration,
  /// Extra attempts after the first one.
  pub(crate) retries: u32,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      backoff: Duration::from_millis(250),
      retries: 2,
    }
  }
}

impl RetryPolicy {
  fn delay(&self, attempt: u32) -> Duration {
    self.backoff.saturating_mul(2u32.saturating_pow(attempt))
  }

  #[cfg(test)]
  pub(crate) fn none() -> Self {
    Self {
      backoff: Duration::ZERO,
      retries: 0,
    }
  }

  pub(crate) async fn run<T, F, Fut>(
    &self,
    mut operation: F,
  ) -> Result<T, FetchError>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
  {
    let mut attempt = 0;

    loop {
      match operation().await {
        Err(error) if error.is_transient() && attempt < self.retries => {
          let delay = self.delay(attempt);

          tracing::debug!(%error, attempt, ?delay, "retrying request");

          tokio::time::sleep(delay).await;

          attempt += 1;
        }
        result => return result,
      }
    }
  }
}
