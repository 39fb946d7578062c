//! View Builder Module
//! Assembles the whole dashboard - summary panels, charts and the data
//! table - into one serializable tree. Pure: same dataset in, same tree out.

use crate::charts::{build_charts, ChartSpec};
use crate::data::Dataset;
use crate::stats::{StatsError, Summary};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Rows per page in the data table.
pub const PAGE_SIZE: usize = 10;

pub const DASHBOARD_TITLE: &str = "Property Valuation Dashboard";

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// One summary figure with its label, preformatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryPanel {
    pub label: String,
    pub value: String,
}

/// The interactive table: every column, every row. Sorting, filtering and
/// paging happen client-side against this payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Value>,
    pub page_size: usize,
}

/// The static tree handed to the server for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub panels: Vec<SummaryPanel>,
    pub charts: Vec<ChartSpec>,
    pub table: TableSpec,
}

/// Build the view tree from the loaded dataset and its summary.
pub fn build_view(dataset: &Dataset, summary: &Summary) -> Result<DashboardView, ViewError> {
    let panels = vec![
        SummaryPanel {
            label: "Total Properties".to_string(),
            value: summary.count.to_string(),
        },
        SummaryPanel {
            label: "Avg. Market Value".to_string(),
            value: format_thousands(summary.avg_market_value),
        },
        SummaryPanel {
            label: "Median Market Value".to_string(),
            value: format_thousands(summary.median_market_value),
        },
        SummaryPanel {
            label: "Avg. Land Rate".to_string(),
            value: format_thousands(summary.avg_land_rate),
        },
    ];

    let charts = build_charts(dataset)?;

    let table = TableSpec {
        columns: dataset.columns(),
        rows: dataset.rows_json(),
        page_size: PAGE_SIZE,
    };

    Ok(DashboardView {
        title: DASHBOARD_TITLE.to_string(),
        panels,
        charts,
        table,
    })
}

/// Format a figure with thousands separators and two decimals: 1234567.891
/// becomes "1,234,567.89". Non-finite values render via the default float
/// formatting ("NaN", "inf").
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_separators_and_two_decimals() {
        assert_eq!(format_thousands(1234567.891), "1,234,567.89");
        assert_eq!(format_thousands(200000.0), "200,000.00");
        assert_eq!(format_thousands(60.0), "60.00");
        assert_eq!(format_thousands(999.999), "1,000.00");
    }

    #[test]
    fn formats_small_and_negative_values() {
        assert_eq!(format_thousands(0.0), "0.00");
        assert_eq!(format_thousands(-1234.5), "-1,234.50");
        assert_eq!(format_thousands(-0.001), "0.00");
    }

    #[test]
    fn formats_non_finite_values() {
        assert_eq!(format_thousands(f64::NAN), "NaN");
    }
}
