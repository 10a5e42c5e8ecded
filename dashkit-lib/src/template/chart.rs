//! Column chart markup.

use chrono::{DateTime, NaiveDate};

use super::escape_html;
use crate::chart::Bar;

pub const LOADING_CLASS: &str = "column-chart_loading";

/// The chart shell. Header and body start empty and the root carries the
/// loading class until the first non-empty refresh.
pub fn chart(label: &str, link: Option<&str>, chart_height: u32) -> String {
    let link = link
        .filter(|link| !link.is_empty())
        .map(|link| {
            format!(
                r#"<a class="column-chart__link" href="{}">View all</a>"#,
                escape_html(link)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="column-chart {loading}" style="--chart-height: {height}">"#,
            r#"<div class="column-chart__title">Total {label}{link}</div>"#,
            r#"<div class="column-chart__container">"#,
            r#"<div data-element="header" class="column-chart__header"></div>"#,
            r#"<div data-element="body" class="column-chart__chart"></div>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        loading = LOADING_CLASS,
        height = chart_height,
        label = escape_html(label),
        link = link,
    )
}

/// Tooltip markup for one bar. It ends up inside an attribute value, so the
/// caller escapes it once more.
pub fn tooltip(label: &str, percent: u32) -> String {
    format!(
        "<span><small>{}</small><br /><strong>{percent}%</strong></span>",
        escape_html(&format_bucket_label(label))
    )
}

pub fn column(bar: &Bar) -> String {
    format!(
        r#"<div style="--value: {}" data-tooltip="{}"></div>"#,
        bar.height,
        escape_html(&tooltip(&bar.label, bar.percent))
    )
}

pub fn column_body(bars: &[Bar]) -> String {
    bars.iter().map(column).collect()
}

/// Format a bucket label as a medium date (`Jan 1, 2024`) when it is an ISO
/// date or instant; any other label is returned unchanged.
pub fn format_bucket_label(label: &str) -> String {
    let date = NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(label)
                .ok()
                .map(|instant| instant.date_naive())
        });
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_shell() {
        let html = chart("orders", Some("/sales"), 50);
        assert!(html.starts_with(
            r#"<div class="column-chart column-chart_loading" style="--chart-height: 50">"#
        ));
        assert!(html.contains(
            r#"Total orders<a class="column-chart__link" href="/sales">View all</a>"#
        ));
    }

    #[test]
    fn test_chart_without_link() {
        assert!(!chart("orders", None, 50).contains("View all"));
        assert!(!chart("orders", Some(""), 50).contains("View all"));
    }

    #[test]
    fn test_format_bucket_label() {
        assert_eq!(format_bucket_label("2024-01-01"), "Jan 1, 2024");
        assert_eq!(format_bucket_label("2024-03-15T10:00:00Z"), "Mar 15, 2024");
        assert_eq!(format_bucket_label("week 3"), "week 3");
    }

    #[test]
    fn test_column_escapes_tooltip() {
        let bar = Bar {
            label: "2024-01-02".into(),
            value: 15.0,
            height: 50,
            percent: 100,
        };
        assert_eq!(
            column(&bar),
            concat!(
                r#"<div style="--value: 50" data-tooltip=""#,
                "&lt;span&gt;&lt;small&gt;Jan 2, 2024&lt;/small&gt;&lt;br /&gt;",
                "&lt;strong&gt;100%&lt;/strong&gt;&lt;/span&gt;",
                r#""></div>"#,
            )
        );
    }
}
