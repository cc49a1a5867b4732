use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
  pub(crate) api_url: String,
  pub(crate) log_file: Option<PathBuf>,
  pub(crate) offset: usize,
  pub(crate) page_size: usize,
  pub(crate) retry: RetryPolicy,
  pub(crate) timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_url: Self::DEFAULT_API_URL.into(),
      log_file: None,
      offset: 0,
      page_size: Self::DEFAULT_PAGE_SIZE,
      retry: RetryPolicy::default(),
      timeout: Duration::from_secs(10),
    }
  }
}

impl Config {
  const DEFAULT_API_URL: &str = "https://hacker-news.firebaseio.com/v0";

  const DEFAULT_PAGE_SIZE: usize = 100;

  pub(crate) fn from_env() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(url) = lookup("TOPSTORIES_API_URL") {
      let url = url.trim().trim_end_matches('/');

      Url::parse(url)
        .with_context(|| format!("invalid TOPSTORIES_API_URL `{url}`"))?;

      config.api_url = url.to_string();
    }

    config.log_file = lookup("TOPSTORIES_LOG_FILE")
      .filter(|path| !path.is_empty())
      .map(PathBuf::from);

    if let Some(offset) = Self::parse(&lookup, "TOPSTORIES_OFFSET")? {
      config.offset = offset;
    }

    if let Some(page_size) = Self::parse(&lookup, "TOPSTORIES_PAGE_SIZE")? {
      ensure!(page_size > 0, "TOPSTORIES_PAGE_SIZE must be at least 1");
      config.page_size = page_size;
    }

    if let Some(retries) = Self::parse(&lookup, "TOPSTORIES_RETRIES")? {
      config.retry.retries = retries;
    }

    if let Some(seconds) = Self::parse(&lookup, "TOPSTORIES_TIMEOUT_SECS")? {
      ensure!(seconds > 0, "TOPSTORIES_TIMEOUT_SECS must be at least 1");
      config.timeout = Duration::from_secs(seconds);
    }

    Ok(config)
  }

  fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
  where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
  {
    lookup(key)
      .map(|value| {
        value
          .trim()
          .parse::<T>()
          .with_context(|| format!("invalid {key} `{value}`"))
      })
      .transpose()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(vars: &[(&str, &str)]) -> Result<Config> {
    let vars = vars
      .iter()
      .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
      .collect::<HashMap<_, _>>();

    Config::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn api_url_loses_trailing_slash() {
    let url = "http://localhost:8080/v0/";

    let config = config(&[("TOPSTORIES_API_URL", url)]).unwrap();

    assert_eq!(config.api_url, "http://localhost:8080/v0");
  }

  #[test]
  fn defaults_apply_without_variables() {
    assert_eq!(config(&[]).unwrap(), Config::default());

    assert_eq!(
      Config::default().api_url,
      "https://hacker-news.firebaseio.com/v0"
    );

    assert_eq!(Config::default().page_size, 100);
  }

  #[test]
  fn invalid_values_name_the_variable() {
    let error = config(&[("TOPSTORIES_PAGE_SIZE", "lots")]).unwrap_err();

    assert_eq!(error.to_string(), "invalid TOPSTORIES_PAGE_SIZE `lots`");

    assert!(config(&[("TOPSTORIES_API_URL", "not a url")]).is_err());
  }

  #[test]
  fn variables_override_defaults() {
    let config = config(&[
      ("TOPSTORIES_LOG_FILE", "/tmp/topstories.log"),
      ("TOPSTORIES_OFFSET", "30"),
      ("TOPSTORIES_PAGE_SIZE", " 30 "),
      ("TOPSTORIES_RETRIES", "0"),
      ("TOPSTORIES_TIMEOUT_SECS", "3"),
    ])
    .unwrap();

    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/topstories.log")));
    assert_eq!(config.offset, 30);
    assert_eq!(config.page_size, 30);
    assert_eq!(config.retry.retries, 0);
    assert_eq!(config.timeout, Duration::from_secs(3));
  }

  #[test]
  fn zero_page_size_is_rejected() {
    let error = config(&[("TOPSTORIES_PAGE_SIZE", "0")]).unwrap_err();

    assert_eq!(error.to_string(), "TOPSTORIES_PAGE_SIZE must be at least 1");
  }
}
