//! Subcommand implementations. Each returns the text to print.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, Utc};
use dashkit_lib::chart::Range;
use dashkit_lib::sort::sort_strings;
use dashkit_lib::{
    ChartOptions, ColumnChart, ColumnDescriptor, Component, DataSource, Direction, HttpSource, Row,
    SortableTable, TableOptions,
};

use crate::cli::Command;
use crate::config::Config;
use crate::error::CliError;

/// Days shown when only `--to` (or nothing) is given.
const DEFAULT_SPAN_DAYS: u64 = 30;

pub async fn run(command: Command, config: &Config) -> Result<String, CliError> {
    match command {
        Command::SortStrings { order, items } => Ok(sorted_lines(&items, &order)),
        Command::Table {
            columns,
            rows,
            sort,
            order,
            row_link,
        } => {
            let columns = read(&columns)?;
            let rows = read(&rows)?;
            let options = TableOptions {
                row_link: row_link.unwrap_or_else(|| config.row_link.clone()),
            };
            render_table(&columns, &rows, sort.as_deref(), &order, options)
        }
        Command::Chart {
            url,
            label,
            link,
            from,
            to,
            base_url,
            chart_height,
        } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let mut builder = HttpSource::builder()
                .base_url(base_url.unwrap_or_else(|| config.base_url.clone()))
                .url(url);
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }
            let source = builder.build()?;

            let mut options = ChartOptions::default()
                .label(label)
                .range(range)
                .chart_height(chart_height.unwrap_or(config.chart_height));
            if let Some(link) = link {
                options = options.link(link);
            }
            render_chart(options, source).await
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn sorted_lines(items: &[String], order: &str) -> String {
    sort_strings(items, order)
        .into_iter()
        .map(|item| item + "\n")
        .collect()
}

pub fn render_table(
    columns_json: &str,
    rows_json: &str,
    sort: Option<&str>,
    order: &str,
    options: TableOptions,
) -> Result<String, CliError> {
    let columns: Vec<ColumnDescriptor> =
        serde_json::from_str(columns_json).map_err(|source| CliError::Json {
            what: "columns",
            source,
        })?;
    let rows: Vec<Row> = serde_json::from_str(rows_json).map_err(|source| CliError::Json {
        what: "rows",
        source,
    })?;

    let mut table = SortableTable::with_options(columns, rows, options)?;
    if let Some(field) = sort {
        table.sort(field, Direction::parse_lenient(order))?;
    }
    Ok(html(&table))
}

pub async fn render_chart<S: DataSource>(
    options: ChartOptions,
    source: S,
) -> Result<String, CliError> {
    let mut chart = ColumnChart::new(options, source)?;
    let data = chart.refresh().await?;
    log::info!("Rendered chart with {} buckets", data.len());
    Ok(html(&chart))
}

fn html(component: &impl Component) -> String {
    component
        .element()
        .map(|root| root.outer_html() + "\n")
        .unwrap_or_default()
}

/// Resolve the optional `--from`/`--to` pair into a range.
pub fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Range, CliError> {
    let to = match to {
        Some(text) => parse_instant(text)?,
        None => Utc::now(),
    };
    let from = match from {
        Some(text) => parse_instant(text)?,
        None => to
            .checked_sub_days(Days::new(DEFAULT_SPAN_DAYS))
            .unwrap_or(to),
    };
    Ok(Range::new(from, to))
}

fn parse_instant(text: &str) -> Result<DateTime<Utc>, CliError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| CliError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use dashkit_lib::{ChartData, StaticSource};

    use super::*;

    const COLUMNS: &str = r#"[
        {"id": "title", "title": "Name", "sortable": true, "sortType": "string"},
        {"id": "price", "title": "Price", "sortable": true, "sortType": "number"}
    ]"#;
    const ROWS: &str = r#"[
        {"id": "b", "title": "bread", "price": 10},
        {"id": "a", "title": "Apple", "price": 2}
    ]"#;

    #[test]
    fn test_sorted_lines() {
        let items = ["Hello", "apple", "Banana"].map(String::from);
        assert_eq!(sorted_lines(&items, "asc"), "apple\nBanana\nHello\n");
        assert_eq!(sorted_lines(&[], "asc"), "");
    }

    #[test]
    fn test_render_table_sorted() {
        let html = render_table(COLUMNS, ROWS, Some("title"), "asc", TableOptions::default())
            .unwrap();
        let apple = html.find(r#"data-row-id="a""#).unwrap();
        let bread = html.find(r#"data-row-id="b""#).unwrap();
        assert!(apple < bread);
        assert!(html.contains(r#"data-id="title" data-sortable="true" data-order="asc""#));
    }

    #[test]
    fn test_render_table_errors() {
        assert!(matches!(
            render_table("{", ROWS, None, "asc", TableOptions::default()),
            Err(CliError::Json { what: "columns", .. })
        ));
        assert!(matches!(
            render_table(COLUMNS, ROWS, Some("nope"), "asc", TableOptions::default()),
            Err(CliError::Component(_))
        ));
    }

    #[tokio::test]
    async fn test_render_chart() {
        let data: ChartData = [("2024-01-01", 1.0), ("2024-01-02", 3.0)].into_iter().collect();
        let html = render_chart(ChartOptions::default().label("sales"), StaticSource::new(data))
            .await
            .unwrap();
        assert!(html.contains("Total sales"));
        assert!(html.contains(r#"<div data-element="header" class="column-chart__header">4</div>"#));
        assert!(!html.contains("column-chart_loading"));
    }

    #[test]
    fn test_parse_range() {
        let range = parse_range(Some("2024-01-01"), Some("2024-02-01T12:00:00Z")).unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.to, Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap());

        let range = parse_range(None, Some("2024-01-31")).unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        assert!(matches!(
            parse_range(Some("yesterday"), None),
            Err(CliError::InvalidDate(_))
        ));
    }
}
