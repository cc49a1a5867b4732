use super::*;

type Decode<T> = Arc<dyn Fn(&[u8]) -> Option<T> + Send + Sync>;

/// A remote document and the function that turns its body into a `T`.
///
/// Decoding never fails loudly: a body that does not have the expected shape
/// decodes to `None`.
pub(crate) struct Resource<T> {
  decode: Decode<T>,
  url: String,
}

impl<T> Clone for Resource<T> {
  fn clone(&self) -> Self {
    Self {
      decode: Arc::clone(&self.decode),
      url: self.url.clone(),
    }
  }
}

impl<T> Debug for Resource<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Resource").field("url", &self.url).finish()
  }
}

impl<T> Resource<T> {
  pub(crate) fn decode(&self, body: &[u8]) -> Option<T> {
    (self.decode)(body)
  }

  /// Parses the body as JSON of shape `J`, then hands it to `convert`.
  pub(crate) fn json<J, F>(url: impl Into<String>, convert: F) -> Self
  where
    J: DeserializeOwned,
    F: Fn(J) -> Option<T> + Send + Sync + 'static,
  {
    Self::new(url, move |body| {
      serde_json::from_slice::<J>(body).ok().and_then(&convert)
    })
  }

  pub(crate) fn new<F>(url: impl Into<String>, decode: F) -> Self
  where
    F: Fn(&[u8]) -> Option<T> + Send + Sync + 'static,
  {
    Self {
      decode: Arc::new(decode),
      url: url.into(),
    }
  }

  pub(crate) fn url(&self) -> &str {
    &self.url
  }
}
