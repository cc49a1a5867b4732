use super::*;

#[async_trait]
pub(crate) trait Transport: Send + Sync {
  async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub(crate) struct HttpTransport {
  client: reqwest::Client,
}

impl HttpTransport {
  pub(crate) fn new(timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(concat!("topstories/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("could not build http client")?;

    Ok(Self { client })
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|error| FetchError::transport(url, error))?;

    let status = response.status();

    if !status.is_success() {
      return Err(FetchError::Status {
        status: status.as_u16(),
        url: url.to_string(),
      });
    }

    let body = response
      .bytes()
      .await
      .map_err(|error| FetchError::transport(url, error))?;

    Ok(body.to_vec())
  }
}
