//! Where chart data comes from

mod http;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::chart::ChartData;
use crate::error::FetchError;

pub use http::{DEFAULT_BASE_URL, HttpSource, HttpSourceBuilder, Locator, NoLocator};

/// Loads the values a chart shows for a time range.
///
/// The chart calls `fetch` exactly once per refresh and never retries. An
/// empty [`ChartData`] means "nothing in this range" and is not an error.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use chrono::{DateTime, Utc};
/// use dashkit_lib::{ChartData, DataSource, FetchError};
///
/// struct Constant;
///
/// #[async_trait]
/// impl DataSource for Constant {
///     async fn fetch(
///         &self,
///         _from: DateTime<Utc>,
///         _to: DateTime<Utc>,
///     ) -> Result<ChartData, FetchError> {
///         Ok([("total", 1.0)].into_iter().collect())
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChartData, FetchError>;
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    async fn fetch(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChartData, FetchError> {
        (**self).fetch(from, to).await
    }
}

/// A source that always returns the same data, whatever the range.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: ChartData,
}

impl StaticSource {
    pub fn new(data: ChartData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(
        &self,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<ChartData, FetchError> {
        Ok(self.data.clone())
    }
}
