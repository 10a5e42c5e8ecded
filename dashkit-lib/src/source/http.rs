//! JSON-over-HTTP data source

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use url::Url;

use super::DataSource;
use crate::chart::ChartData;
use crate::error::FetchError;

/// Base that relative source locators resolve against.
pub const DEFAULT_BASE_URL: &str = "https://course-js.javascript.ru";

/// Fetches `{"label": number, ...}` from a URL, passing the range as `from`
/// and `to` query parameters.
///
/// Cheap to clone; clones share the HTTP client.
///
/// # Example
///
/// ```
/// use dashkit_lib::HttpSource;
/// use std::time::Duration;
///
/// let source = HttpSource::builder()
///     .url("api/dashboard/orders")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(
///     source.url().as_str(),
///     "https://course-js.javascript.ru/api/dashboard/orders"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: Client,
    request_timeout: Option<Duration>,
}

impl HttpSource {
    pub fn builder() -> HttpSourceBuilder<NoLocator> {
        HttpSourceBuilder::new()
    }

    /// The resolved source URL, without the range parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL requested for `from..to`.
    ///
    /// Existing query parameters are kept; `from` and `to` are replaced by
    /// the range as ISO-8601 instants with millisecond precision.
    pub fn request_url(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Url {
        let mut url = self.url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "from" && key != "to")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(kept)
            .append_pair("from", &from.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("to", &to.to_rfc3339_opts(SecondsFormat::Millis, true));
        url
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        match self.request_timeout {
            Some(limit) if error.is_timeout() => FetchError::TimedOut(limit),
            _ => FetchError::Transport(error),
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChartData, FetchError> {
        let url = self.request_url(from, to);
        log::debug!("GET {url}");

        let request = match self.request_timeout {
            Some(limit) => self.client.get(url).timeout(limit),
            None => self.client.get(url),
        };

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let code = response.status();
        if !code.is_success() {
            // The body is only a diagnostic here; losing it is fine.
            let detail = response.text().await.unwrap_or_default();
            return Err(FetchError::status(code.as_u16(), detail));
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let data: ChartData = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => return Err(FetchError::decode(e, Some(text))),
        };
        log::debug!("Fetched {} buckets", data.len());
        Ok(data)
    }
}

/// Typestate for a builder that has no source locator yet.
pub struct NoLocator;

/// Typestate holding the source locator.
pub struct Locator(String);

/// Builder for [`HttpSource`]; `build` is only available once a locator is
/// given.
pub struct HttpSourceBuilder<L> {
    locator: L,
    base_url: String,
    request_timeout: Option<Duration>,
    client: Option<Client>,
}

impl HttpSourceBuilder<NoLocator> {
    pub fn new() -> Self {
        Self {
            locator: NoLocator,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            client: None,
        }
    }

    /// An absolute URL, or a path resolved against the base URL.
    pub fn url(self, locator: impl Into<String>) -> HttpSourceBuilder<Locator> {
        HttpSourceBuilder {
            locator: Locator(locator.into()),
            base_url: self.base_url,
            request_timeout: self.request_timeout,
            client: self.client,
        }
    }
}

impl Default for HttpSourceBuilder<NoLocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> HttpSourceBuilder<L> {
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Unset means requests may take as long as the server needs.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.request_timeout = Some(limit);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }
}

impl HttpSourceBuilder<Locator> {
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| FetchError::BadUrl(format!("{}: {e}", self.base_url)))?;
        let Locator(locator) = self.locator;
        let url = base
            .join(&locator)
            .map_err(|e| FetchError::BadUrl(format!("{locator}: {e}")))?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder().build()?,
        };

        Ok(HttpSource {
            url,
            client,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_resolves_against_base() {
        let source = HttpSource::builder()
            .base_url("http://localhost:8080")
            .url("api/orders")
            .build()
            .unwrap();
        assert_eq!(source.url().as_str(), "http://localhost:8080/api/orders");
    }

    #[test]
    fn test_absolute_locator_ignores_base() {
        let source = HttpSource::builder()
            .url("https://example.com/sales?x=1")
            .build()
            .unwrap();
        assert_eq!(source.url().host_str(), Some("example.com"));
    }

    #[test]
    fn test_request_url_sets_range() {
        let source = HttpSource::builder()
            .url("api/orders?kind=all&from=old")
            .build()
            .unwrap();
        let url = source.request_url(instant(1), instant(2));
        assert_eq!(
            url.query(),
            Some("kind=all&from=2024-01-01T00%3A00%3A00.000Z&to=2024-01-02T00%3A00%3A00.000Z")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpSource::builder()
            .base_url("not a url")
            .url("api")
            .build()
            .unwrap_err();
        assert!(matches!(err, FetchError::BadUrl(_)));
    }
}
