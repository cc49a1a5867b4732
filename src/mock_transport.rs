use {super::*, std::collections::VecDeque};

#[derive(Clone)]
struct Reply {
  delay: Duration,
  result: Result<Vec<u8>, FetchError>,
}

/// In-memory transport with scripted replies per URL.
///
/// Replies queued for a URL are served in order; the last one repeats.
/// Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct MockTransport {
  calls: Mutex<Vec<String>>,
  replies: Mutex<HashMap<String, VecDeque<Reply>>>,
}

impl MockTransport {
  pub(crate) fn calls(&self) -> Vec<String> {
    self
      .calls
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  pub(crate) fn calls_to(&self, url: &str) -> usize {
    self.calls().iter().filter(|call| *call == url).count()
  }

  pub(crate) fn fail(self, url: &str, error: FetchError) -> Self {
    self.push(url, Duration::ZERO, Err(error))
  }

  fn push(
    self,
    url: &str,
    delay: Duration,
    result: Result<Vec<u8>, FetchError>,
  ) -> Self {
    self
      .replies
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .entry(url.to_string())
      .or_default()
      .push_back(Reply { delay, result });

    self
  }

  pub(crate) fn reply(self, url: &str, body: &str) -> Self {
    self.reply_after(url, Duration::ZERO, body)
  }

  pub(crate) fn reply_after(
    self,
    url: &str,
    delay: Duration,
    body: &str,
  ) -> Self {
    self.push(url, delay, Ok(body.as_bytes().to_vec()))
  }
}

#[async_trait]
impl Transport for MockTransport {
  async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
    self
      .calls
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(url.to_string());

    let reply = {
      let mut replies =
        self.replies.lock().unwrap_or_else(PoisonError::into_inner);

      match replies.get_mut(url) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
      }
    };

    let Some(reply) = reply else {
      return Err(FetchError::Status {
        status: 404,
        url: url.to_string(),
      });
    };

    if !reply.delay.is_zero() {
      tokio::time::sleep(reply.delay).await;
    }

    reply.result
  }
}
