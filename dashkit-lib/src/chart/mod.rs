//! A column chart that loads its values from a [`DataSource`].
//!
//! Each refresh moves the chart through `Idle -> Loading -> Populated` or
//! leaves it `Loading` when the source returns nothing or fails. The header
//! shows the aggregated total and the body one bar per bucket.

mod data;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::component::{Component, Mounted};
use crate::error::{ComponentError, Error};
use crate::source::DataSource;
use crate::template;
use crate::template::chart::LOADING_CLASS;

pub use data::{Bar, ChartData};

/// Height of the plot area when none is configured.
pub const DEFAULT_CHART_HEIGHT: u32 = 50;

pub type HeadingFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;
pub type Aggregator = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// The time window a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Range {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// An empty window at the current instant.
    pub fn now() -> Self {
        let now = Utc::now();
        Self { from: now, to: now }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::now()
    }
}

#[derive(Clone)]
pub struct ChartOptions {
    pub label: String,
    /// Target of the "View all" link. No link is rendered when unset.
    pub link: Option<String>,
    pub range: Range,
    pub chart_height: u32,
    pub format_heading: HeadingFormatter,
    pub aggregate: Aggregator,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            link: None,
            range: Range::now(),
            chart_height: DEFAULT_CHART_HEIGHT,
            format_heading: Arc::new(|total: f64| total.to_string()),
            aggregate: Arc::new(|values: &[f64]| values.iter().sum::<f64>()),
        }
    }
}

impl ChartOptions {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn chart_height(mut self, height: u32) -> Self {
        self.chart_height = height;
        self
    }

    pub fn format_heading(mut self, f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.format_heading = Arc::new(f);
        self
    }

    pub fn aggregate(mut self, f: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        self.aggregate = Arc::new(f);
        self
    }
}

impl fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("label", &self.label)
            .field("link", &self.link)
            .field("range", &self.range)
            .field("chart_height", &self.chart_height)
            .finish_non_exhaustive()
    }
}

pub struct ColumnChart<S> {
    options: ChartOptions,
    range: Range,
    source: S,
    mounted: Mounted,
}

impl<S: DataSource> ColumnChart<S> {
    /// Render the chart shell in its loading state. Nothing is fetched until
    /// [`update`](Self::update) or [`refresh`](Self::refresh).
    pub fn new(options: ChartOptions, source: S) -> Result<Self, ComponentError> {
        let markup = template::chart::chart(
            &options.label,
            options.link.as_deref(),
            options.chart_height,
        );
        let mounted = Mounted::new(&markup)?;
        mounted.sub_elements().require("header")?;
        mounted.sub_elements().require("body")?;

        Ok(Self {
            range: options.range,
            options,
            source,
            mounted,
        })
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// `true` while the root carries the loading class.
    pub fn is_loading(&self) -> bool {
        self.mounted
            .element()
            .is_some_and(|root| root.has_class(LOADING_CLASS))
    }

    /// Load `from..to` and redraw.
    ///
    /// The chart enters the loading state and records the range before the
    /// single fetch. Header and body are only filled when the source returns
    /// at least one bucket; an empty result or a failed fetch leaves the chart
    /// loading. The fetched data is returned either way.
    pub async fn update(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChartData, Error> {
        self.start_loading();
        self.range = Range::new(from, to);

        log::debug!("Fetching chart data for {from} .. {to}");
        let data = self.source.fetch(from, to).await?;

        if data.is_empty() {
            log::warn!("No chart data for {from} .. {to}");
            return Ok(data);
        }
        self.populate(&data)?;
        Ok(data)
    }

    /// Re-run [`update`](Self::update) for the current range.
    pub async fn refresh(&mut self) -> Result<ChartData, Error> {
        let Range { from, to } = self.range;
        self.update(from, to).await
    }

    fn start_loading(&self) {
        let Some(root) = self.mounted.element() else {
            return;
        };
        root.add_class(LOADING_CLASS);
        let sub = self.mounted.sub_elements();
        if let Some(header) = sub.get("header") {
            header.set_text_content("");
        }
        if let Some(body) = sub.get("body") {
            body.clear_children();
        }
    }

    // A destroyed chart still fetches but has nothing to draw into.
    fn populate(&self, data: &ChartData) -> Result<(), ComponentError> {
        let Some(root) = self.mounted.element() else {
            return Ok(());
        };
        let sub = self.mounted.sub_elements();
        let header = sub.require("header")?;
        let body = sub.require("body")?;

        let total = (self.options.aggregate)(&data.values());
        let bars = data.bars(self.options.chart_height);
        body.set_inner_html(&template::chart::column_body(&bars))?;
        header.set_text_content(&(self.options.format_heading)(total));
        root.remove_class(LOADING_CLASS);
        Ok(())
    }
}

impl<S> Component for ColumnChart<S> {
    fn mounted(&self) -> &Mounted {
        &self.mounted
    }

    fn mounted_mut(&mut self) -> &mut Mounted {
        &mut self.mounted
    }
}
