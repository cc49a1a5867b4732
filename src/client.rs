use super::*;

type Body = Shared<BoxFuture<'static, Result<Arc<[u8]>, FetchError>>>;

/// Fetches resources, one transport request per URL at a time.
///
/// Concurrent fetches of the same URL join the request already in flight.
/// Nothing is kept once a request settles or its waiters are dropped.
#[derive(Clone)]
pub(crate) struct Client {
  in_flight: Arc<Mutex<HashMap<String, Body>>>,
  retry: RetryPolicy,
  transport: Arc<dyn Transport>,
}

/// Forgets a URL's in-flight request when its waiter finishes or is dropped.
struct InFlight<'a> {
  client: &'a Client,
  request: Body,
  url: &'a str,
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    let mut in_flight = self
      .client
      .in_flight
      .lock()
      .unwrap_or_else(PoisonError::into_inner);

    if in_flight
      .get(self.url)
      .is_some_and(|current| current.ptr_eq(&self.request))
    {
      in_flight.remove(self.url);
    }
  }
}

impl Client {
  async fn body(&self, url: &str) -> Result<Arc<[u8]>, FetchError> {
    let request = {
      let mut in_flight = self
        .in_flight
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

      if let Some(request) = in_flight.get(url) {
        tracing::trace!(url, "joining in-flight request");
        request.clone()
      } else {
        let retry = self.retry;
        let transport = Arc::clone(&self.transport);
        let owned = url.to_string();

        let request = async move {
          let body = retry.run(|| transport.get(&owned)).await;
          body.map(Arc::from)
        }
        .boxed()
        .shared();

        in_flight.insert(url.to_string(), request.clone());

        request
      }
    };

    let guard = InFlight {
      client: self,
      request,
      url,
    };

    guard.request.clone().await
  }

  pub(crate) async fn fetch<T>(&self, resource: &Resource<T>) -> Option<T> {
    match self.try_fetch(resource).await {
      Ok(value) => Some(value),
      Err(error) => {
        tracing::debug!(%error, "dropping failed fetch");
        None
      }
    }
  }

  pub(crate) fn new(transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
    Self {
      in_flight: Arc::default(),
      retry,
      transport,
    }
  }

  pub(crate) async fn try_fetch<T>(
    &self,
    resource: &Resource<T>,
  ) -> Result<T, FetchError> {
    let body = self.body(resource.url()).await?;

    resource.decode(&body).ok_or_else(|| FetchError::Decode {
      url: resource.url().to_string(),
    })
  }
}
